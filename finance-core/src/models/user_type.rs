use std::fmt;

use serde::{Deserialize, Serialize};

/// Audience the assistant tailors its replies to.
///
/// Only reply wording depends on this; no calculation does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Student,
    Professional,
}

impl UserType {
    pub const ALL: [UserType; 2] = [UserType::Student, UserType::Professional];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Professional => "professional",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Label shown next to the chat header.
    pub fn mode_label(&self) -> &'static str {
        match self {
            Self::Student => "Student Mode",
            Self::Professional => "Professional Mode",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(UserType::parse(" Professional "), Some(UserType::Professional));
        assert_eq!(UserType::parse("STUDENT"), Some(UserType::Student));
        assert_eq!(UserType::parse("retiree"), None);
    }

    #[test]
    fn mode_label_matches_type() {
        assert_eq!(UserType::Student.mode_label(), "Student Mode");
        assert_eq!(UserType::Professional.mode_label(), "Professional Mode");
    }
}
