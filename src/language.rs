use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Languages offered by the translator panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Hindi,
    French,
    Spanish,
    German,
    Chinese,
    Japanese,
    Tamil,
    Telugu,
    Bengali,
}

impl Language {
    pub const ALL: [Language; 10] = [
        Language::English,
        Language::Hindi,
        Language::French,
        Language::Spanish,
        Language::German,
        Language::Chinese,
        Language::Japanese,
        Language::Tamil,
        Language::Telugu,
        Language::Bengali,
    ];

    pub const DEFAULT_SOURCE: Language = Language::English;
    pub const DEFAULT_TARGET: Language = Language::Hindi;

    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::German => "German",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
            Language::Bengali => "Bengali",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownLanguage(wanted.to_string()))
    }
}
