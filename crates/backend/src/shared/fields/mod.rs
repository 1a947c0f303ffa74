pub mod labels;
pub mod loader;
pub mod normalizer;
pub mod storage;

pub use labels::{FieldHelper, LabelResolver};
pub use loader::{ConfigurationLoader, JsonConfigurationLoader};
pub use normalizer::{FieldNormalizer, IconRenderer, Localizer, NormalizeError};
pub use storage::{FieldStorage, JsonStorage};
