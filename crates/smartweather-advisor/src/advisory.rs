use std::fmt;

use serde::{Deserialize, Serialize};

/// Named rule-set configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// General / travel oriented
    General,
    Agriculture,
}

impl Persona {
    pub const ALL: [Persona; 2] = [Persona::General, Persona::Agriculture];

    pub fn label(self) -> &'static str {
        match self {
            Self::General => "Travel & General",
            Self::Agriculture => "Agriculture",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryCategory {
    Rain,
    Temperature,
    Wind,
    Humidity,
    Schedule,
    Visibility,
}

/// One user-facing recommendation emitted by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryItem {
    pub title: String,
    pub message: String,
    pub category: AdvisoryCategory,
}

impl AdvisoryItem {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        category: AdvisoryCategory,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_category_serializes_lowercase() {
        let item = AdvisoryItem::new("Strong winds", "msg", AdvisoryCategory::Wind);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["category"], "wind");
    }

    #[test]
    fn test_persona_display() {
        assert_eq!(Persona::Agriculture.to_string(), "Agriculture");
        assert_eq!(Persona::ALL[0], Persona::General);
    }
}
