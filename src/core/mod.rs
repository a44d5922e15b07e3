pub mod errors;

pub use errors::{Error, Result};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Source language of the program the PDG was extracted from.
///
/// The structural-graph extractors number a node's first line differently
/// depending on the grammar, so each language carries a fixed offset that is
/// subtracted from diff line numbers before they are compared to node spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    Java,
    #[serde(alias = "c#", alias = "cs")]
    CSharp,
}

impl SourceLanguage {
    pub fn line_offset(self) -> i64 {
        match self {
            SourceLanguage::Java => 0,
            SourceLanguage::CSharp => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceLanguage::Java => "java",
            SourceLanguage::CSharp => "csharp",
        }
    }
}

impl FromStr for SourceLanguage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        static NAMES: &[(&[&str], SourceLanguage)] = &[
            (&["java"], SourceLanguage::Java),
            (&["csharp", "c#", "cs"], SourceLanguage::CSharp),
        ];

        let lowered = s.trim().to_ascii_lowercase();
        NAMES
            .iter()
            .find(|(names, _)| names.contains(&lowered.as_str()))
            .map(|(_, lang)| *lang)
            .ok_or_else(|| Error::UnsupportedLanguage(s.to_string()))
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of the diff a marking pass aligns against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Removed,
}

impl ChangeKind {
    /// Color given to nodes touched by this side of the diff.
    pub fn color(self) -> ChangeColor {
        match self {
            ChangeKind::Added => ChangeColor::Added,
            ChangeKind::Removed => ChangeColor::Removed,
        }
    }
}

/// Values of the `color` node attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeColor {
    /// `green`
    Added,
    /// `red`
    Removed,
    /// `orange`, reserved for contextual neighbours in visualizations.
    Anchor,
}

impl ChangeColor {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeColor::Added => "green",
            ChangeColor::Removed => "red",
            ChangeColor::Anchor => "orange",
        }
    }

    pub fn from_attribute(value: &str) -> Option<Self> {
        match value.trim_matches('"') {
            "green" => Some(ChangeColor::Added),
            "red" => Some(ChangeColor::Removed),
            "orange" => Some(ChangeColor::Anchor),
            _ => None,
        }
    }

    /// Direction of a colored node in the flattened table, if it has one.
    pub fn change_kind(self) -> Option<ChangeKind> {
        match self {
            ChangeColor::Added => Some(ChangeKind::Added),
            ChangeColor::Removed => Some(ChangeKind::Removed),
            ChangeColor::Anchor => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_offsets() {
        assert_eq!(SourceLanguage::Java.line_offset(), 0);
        assert_eq!(SourceLanguage::CSharp.line_offset(), 1);
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("java".parse::<SourceLanguage>().unwrap(), SourceLanguage::Java);
        assert_eq!("CSharp".parse::<SourceLanguage>().unwrap(), SourceLanguage::CSharp);
        assert_eq!("c#".parse::<SourceLanguage>().unwrap(), SourceLanguage::CSharp);

        let err = "python".parse::<SourceLanguage>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedLanguage(ref lang) if lang == "python"));
    }

    #[test]
    fn test_color_attribute_values() {
        assert_eq!(ChangeColor::from_attribute("green"), Some(ChangeColor::Added));
        assert_eq!(ChangeColor::from_attribute("\"red\""), Some(ChangeColor::Removed));
        assert_eq!(ChangeColor::from_attribute("blue"), None);
        assert_eq!(ChangeColor::Anchor.change_kind(), None);
        assert_eq!(ChangeKind::Removed.color().as_str(), "red");
    }
}
