use crate::error::WriterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target language selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "swift")]
    Swift,
    #[serde(rename = "objc", alias = "objective-c")]
    ObjectiveC,
    #[serde(rename = "java")]
    Java,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Swift, Language::ObjectiveC, Language::Java];

    /// Short selector used on the command line and in config files
    pub fn key(&self) -> &'static str {
        match self {
            Language::Swift => "swift",
            Language::ObjectiveC => "objc",
            Language::Java => "java",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Swift => "Swift",
            Language::ObjectiveC => "Objective-C",
            Language::Java => "Java",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Language {
    type Err = WriterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "swift" => Ok(Language::Swift),
            "objc" | "objective-c" | "objectivec" => Ok(Language::ObjectiveC),
            "java" => Ok(Language::Java),
            _ => Err(WriterError::UnknownLanguage(s.to_string())),
        }
    }
}
