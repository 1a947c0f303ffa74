//! Field kind enumeration with capability flags

/// Semantic kind of a field, governing its storage and configuration shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Link,
    Date,
    Datetime,
    Timestamp,
    Text,
    Richtext,
    Check,
    Radio,
    Select,
    Group,
    File,
    Inline,
    Palette,
    Linebreak,
    Tab,
    Content,
}

impl FieldKind {
    /// Canonical kind name, also used as JSON `name` and icon suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Link => "link",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Text => "text",
            Self::Richtext => "richtext",
            Self::Check => "check",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::Group => "group",
            Self::File => "file",
            Self::Inline => "inline",
            Self::Palette => "palette",
            Self::Linebreak => "linebreak",
            Self::Tab => "tab",
            Self::Content => "content",
        }
    }

    /// Classify a stored type token. Unknown tokens are a
    /// configuration-integrity error and must be treated as fatal by callers.
    pub fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "string" => Self::String,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "link" => Self::Link,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            "timestamp" => Self::Timestamp,
            "text" => Self::Text,
            "richtext" => Self::Richtext,
            "check" => Self::Check,
            "radio" => Self::Radio,
            "select" => Self::Select,
            "group" => Self::Group,
            "file" => Self::File,
            "inline" => Self::Inline,
            "palette" => Self::Palette,
            "linebreak" => Self::Linebreak,
            "tab" => Self::Tab,
            "content" => Self::Content,
            _ => return None,
        })
    }

    /// Grouping kinds have no storage column of their own and only exist to
    /// group other fields.
    pub fn is_grouping_field(&self) -> bool {
        matches!(self, Self::Palette | Self::Linebreak | Self::Tab)
    }

    /// Parent kinds own a nested sequence of child fields.
    pub fn is_parent_field(&self) -> bool {
        matches!(self, Self::Inline | Self::Palette)
    }
}
