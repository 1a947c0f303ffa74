pub mod affix;
pub mod date;
pub mod fields;
pub mod tca;
