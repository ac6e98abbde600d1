use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical difficulty bucket of the question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Basic,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Basic, Level::Intermediate, Level::Advanced];

    /// Map a free-text label emitted by the model, matched exactly.
    ///
    /// Returns `None` for labels outside the closed table; callers decide
    /// whether that means `basic` or a rejected question.
    pub fn from_label(label: &str) -> Option<Level> {
        match label {
            "fácil" => Some(Level::Basic),
            "intermedia" => Some(Level::Intermediate),
            "difícil" => Some(Level::Advanced),
            _ => None,
        }
    }

    /// Inverse of [`Level::from_label`].
    pub fn label(self) -> &'static str {
        match self {
            Level::Basic => "fácil",
            Level::Intermediate => "intermedia",
            Level::Advanced => "difícil",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Level::Basic => "basic",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_table() {
        assert_eq!(Level::from_label("fácil"), Some(Level::Basic));
        assert_eq!(Level::from_label("intermedia"), Some(Level::Intermediate));
        assert_eq!(Level::from_label("difícil"), Some(Level::Advanced));
    }

    #[test]
    fn test_label_case_and_whitespace() {
        assert_eq!(Level::from_label(" Fácil "), None);
        assert_eq!(Level::from_label("Difícil"), None);
        assert_eq!(Level::from_label("DIFÍCIL"), None);
        assert_eq!(Level::from_label(" intermedia "), None);
    }

    #[test]
    fn test_unknown_labels() {
        assert_eq!(Level::from_label("facil"), None);
        assert_eq!(Level::from_label("error"), None);
        assert_eq!(Level::from_label(""), None);
        assert_eq!(Level::from_label("basic"), None);
    }

    #[test]
    fn test_inverse_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::from_label(level.label()), Some(level));
        }
    }
}
