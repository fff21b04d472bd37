//! Story template keys and their renderer palettes.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the six fixed visual layouts. Each generation produces exactly
/// one variant per key, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateKey {
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
}

/// All template keys in fixed generation order.
pub const ALL_TEMPLATES: [TemplateKey; 6] = [
    TemplateKey::T1,
    TemplateKey::T2,
    TemplateKey::T3,
    TemplateKey::T4,
    TemplateKey::T5,
    TemplateKey::T6,
];

impl TemplateKey {
    /// Database / wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::T1 => "T1",
            Self::T2 => "T2",
            Self::T3 => "T3",
            Self::T4 => "T4",
            Self::T5 => "T5",
            Self::T6 => "T6",
        }
    }

    /// Parse from the database `template_key` column.
    pub fn from_str(value: &str) -> Result<Self, CoreError> {
        match value {
            "T1" => Ok(Self::T1),
            "T2" => Ok(Self::T2),
            "T3" => Ok(Self::T3),
            "T4" => Ok(Self::T4),
            "T5" => Ok(Self::T5),
            "T6" => Ok(Self::T6),
            other => Err(CoreError::Validation(format!(
                "Unknown template key '{other}'"
            ))),
        }
    }

    /// Base RGB triple for the background gradient of this template.
    pub fn palette(self) -> [u8; 3] {
        match self {
            Self::T1 => [20, 30, 60],
            Self::T2 => [32, 56, 78],
            Self::T3 => [51, 64, 89],
            Self::T4 => [34, 45, 67],
            Self::T5 => [56, 45, 45],
            Self::T6 => [18, 58, 45],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_key() {
        for key in ALL_TEMPLATES {
            assert_eq!(TemplateKey::from_str(key.as_str()).unwrap(), key);
        }
    }

    #[test]
    fn rejects_unknown_key() {
        assert!(TemplateKey::from_str("T7").is_err());
        assert!(TemplateKey::from_str("").is_err());
    }

    #[test]
    fn palettes_are_distinct() {
        for (i, a) in ALL_TEMPLATES.iter().enumerate() {
            for b in &ALL_TEMPLATES[i + 1..] {
                assert_ne!(a.palette(), b.palette());
            }
        }
    }
}
