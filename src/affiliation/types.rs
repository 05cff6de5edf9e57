use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder token written wherever no data could be determined
pub const UNKNOWN: &str = "N/A";

/// One entry of a profile's career history
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Experience {
    #[serde(default)]
    pub position: Option<String>,

    #[serde(default)]
    pub start: Option<i32>,

    /// `None` means the experience is ongoing
    #[serde(default)]
    pub end: Option<i32>,

    #[serde(default)]
    pub institution: Option<Institution>,
}

impl Experience {
    /// Institution name, if present and non-empty
    pub fn institution_name(&self) -> Option<&str> {
        self.institution
            .as_ref()
            .and_then(|i| i.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Institution {
    #[serde(default)]
    pub name: Option<String>,
}

/// Target year window. An absent `end_year` leaves the window open above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct YearWindow {
    pub start_year: i32,

    #[serde(default)]
    pub end_year: Option<i32>,
}

impl YearWindow {
    pub fn from_year(start_year: i32) -> Self {
        Self {
            start_year,
            end_year: None,
        }
    }

    pub fn between(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year: Some(end_year),
        }
    }

    /// Whether an experience spanning `start..=end` overlaps this window.
    /// A missing end is ongoing; a missing start began before any window.
    pub fn overlaps(&self, start: Option<i32>, end: Option<i32>) -> bool {
        let exp_end = end.map(i64::from).unwrap_or(i64::MAX);
        match self.end_year {
            None => i64::from(self.start_year) <= exp_end,
            Some(end_year) => {
                let exp_start = start.map(i64::from).unwrap_or(i64::MIN);
                exp_start <= i64::from(end_year) && exp_end >= i64::from(self.start_year)
            }
        }
    }
}

impl fmt::Display for YearWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end_year {
            Some(end) => write!(f, "{}-{}", self.start_year, end),
            None => write!(f, "{}-", self.start_year),
        }
    }
}

/// A resolved value, or the explicit absence of one
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Known(String),
    Unknown,
}

impl From<Option<String>> for Field {
    fn from(value: Option<String>) -> Self {
        value.map(Field::Known).unwrap_or(Field::Unknown)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Known(s) => f.write_str(s),
            Field::Unknown => f.write_str(UNKNOWN),
        }
    }
}

/// Resolver output: institutions and positions active in a window.
///
/// Each sequence collapses to `[Field::Unknown]` independently when empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affiliations {
    pub institutions: Vec<Field>,
    pub positions: Vec<Field>,
}

impl Affiliations {
    pub fn unknown() -> Self {
        Self {
            institutions: vec![Field::Unknown],
            positions: vec![Field::Unknown],
        }
    }

    /// Institutions joined into a single per-author field
    pub fn institutions_field(&self) -> String {
        join_fields(&self.institutions)
    }

    /// Positions joined into a single per-author field
    pub fn positions_field(&self) -> String {
        join_fields(&self.positions)
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(super::ENTRY_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_display() {
        assert_eq!(Field::Known("MIT".to_string()).to_string(), "MIT");
        assert_eq!(Field::Unknown.to_string(), "N/A");
    }

    #[test]
    fn test_literal_na_is_not_unknown() {
        let literal = Field::Known("N/A".to_string());
        assert_eq!(literal.to_string(), Field::Unknown.to_string());
        assert_ne!(literal, Field::Unknown);
    }

    #[test]
    fn test_overlap_missing_start_bounded() {
        let window = YearWindow::between(2020, 2025);
        assert!(window.overlaps(None, Some(2021)));
        assert!(window.overlaps(None, None));
        assert!(!window.overlaps(None, Some(2019)));
    }

    #[test]
    fn test_overlap_window_edges_inclusive() {
        let window = YearWindow::between(2020, 2025);
        assert!(window.overlaps(Some(2025), Some(2030)));
        assert!(window.overlaps(Some(2010), Some(2020)));
        assert!(!window.overlaps(Some(2026), None));
    }

    #[test]
    fn test_window_display() {
        assert_eq!(YearWindow::from_year(2025).to_string(), "2025-");
        assert_eq!(YearWindow::between(2020, 2025).to_string(), "2020-2025");
    }

    #[test]
    fn test_experience_deserialize_sparse() {
        let exp: Experience = serde_json::from_str(r#"{"start": null}"#).unwrap();
        assert_eq!(exp, Experience::default());
        assert_eq!(exp.institution_name(), None);
    }

    #[test]
    fn test_experience_empty_institution_name() {
        let exp: Experience =
            serde_json::from_str(r#"{"start": 2020, "institution": {"name": ""}}"#).unwrap();
        assert_eq!(exp.institution_name(), None);
    }
}
