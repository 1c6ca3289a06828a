use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Study,
    Career,
    Exam,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Study,
        Category::Career,
        Category::Exam,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Study => "study",
            Category::Career => "career",
            Category::Exam => "exam",
            Category::Other => "other",
        }
    }

    /// Human-readable label interpolated into prompts and shown to students.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Study => "学習",
            Category::Career => "キャリア",
            Category::Exam => "大学受験",
            Category::Other => "その他",
        }
    }

    /// Map raw classifier output onto the closed set. Only `study`, `career`
    /// and `exam` are recognised; everything else is `Other`.
    pub fn from_model_output(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "study" => Category::Study,
            "career" => Category::Career,
            "exam" => Category::Exam,
            _ => Category::Other,
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    /// Strict parse of user input: accepts the token or the label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted) || c.label() == wanted)
            .ok_or_else(|| DomainError::invalid_input(format!("unknown category: {s}")))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_model_output_normalizes() {
        assert_eq!(Category::from_model_output("study"), Category::Study);
        assert_eq!(Category::from_model_output("  Career\n"), Category::Career);
        assert_eq!(Category::from_model_output("EXAM"), Category::Exam);
    }

    #[test]
    fn test_from_model_output_falls_back_to_other() {
        assert_eq!(Category::from_model_output("other"), Category::Other);
        assert_eq!(Category::from_model_output("Category: study"), Category::Other);
        assert_eq!(Category::from_model_output("学習"), Category::Other);
        assert_eq!(Category::from_model_output(""), Category::Other);
    }

    #[test]
    fn test_from_str_accepts_token_and_label() {
        assert_eq!("study".parse::<Category>().unwrap(), Category::Study);
        assert_eq!("Exam".parse::<Category>().unwrap(), Category::Exam);
        assert_eq!("キャリア".parse::<Category>().unwrap(), Category::Career);
        assert_eq!(" その他 ".parse::<Category>().unwrap(), Category::Other);
        assert!("hobby".parse::<Category>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Category::Exam.label(), "大学受験");
        assert_eq!(Category::default(), Category::Other);
    }
}
