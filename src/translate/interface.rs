use serde::Deserialize;

use crate::error::ValidationError;
use crate::language::Language;

/// Translator panel form as posted by the page. Languages arrive as display
/// names and default to the panel's initial selection.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateForm {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default = "default_target_language")]
    pub target_language: String,
}

fn default_source_language() -> String {
    Language::DEFAULT_SOURCE.name().to_string()
}

fn default_target_language() -> String {
    Language::DEFAULT_TARGET.name().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: Language,
    pub target_language: Language,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source_language: Language, target_language: Language) -> Self {
        Self {
            text: text.into(),
            source_language,
            target_language,
        }
    }

    /// Blank text is checked before the language pair.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::BlankText);
        }
        if self.source_language == self.target_language {
            return Err(ValidationError::SameLanguage);
        }
        Ok(())
    }
}

impl TryFrom<TranslateForm> for TranslationRequest {
    type Error = ValidationError;

    fn try_from(form: TranslateForm) -> Result<Self, Self::Error> {
        let source_language = form.source_language.parse()?;
        let target_language = form.target_language.parse()?;
        Ok(Self::new(form.text, source_language, target_language))
    }
}
