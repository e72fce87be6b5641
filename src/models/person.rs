use crate::models::color::ColorClass;
use serde::{Deserialize, Serialize};

/// Operational status of a roster member
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusTag {
    /// In the field (green marker, or no readable marker)
    #[default]
    Field,
    /// Busy on a call (purple marker)
    Busy,
    /// Out of service (red marker)
    Oos,
}

impl From<ColorClass> for StatusTag {
    fn from(class: ColorClass) -> Self {
        match class {
            ColorClass::Purple => StatusTag::Busy,
            ColorClass::Red => StatusTag::Oos,
            ColorClass::Green | ColorClass::Unknown => StatusTag::Field,
        }
    }
}

/// A person extracted from the roster screenshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonRecord {
    pub name: String,
    /// Unit code such as "N-6"; empty when none was found
    pub code: String,
    pub status: StatusTag,
}

impl PersonRecord {
    pub fn new(name: impl Into<String>, code: impl Into<String>, status: StatusTag) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            status,
        }
    }

    /// Deduplication key: trimmed name and code joined by `|`
    pub fn dedup_key(&self) -> String {
        format!("{}|{}", self.name.trim(), self.code.trim())
    }
}
