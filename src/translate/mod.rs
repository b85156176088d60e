pub mod interface;

pub use interface::*;

use std::sync::Arc;
use tracing::info;

use crate::error::AppError;
use crate::generation::GenerationClient;

/// Translator panel flow: validate, then one model call.
pub struct Translator {
    generation: Arc<GenerationClient>,
}

impl Translator {
    pub fn new(generation: Arc<GenerationClient>) -> Self {
        Self { generation }
    }

    pub async fn translate(&self, request: &TranslationRequest) -> Result<String, AppError> {
        if let Err(reason) = request.validate() {
            info!("Translation rejected before model call: {}", reason);
            return Err(reason.into());
        }

        let text = self
            .generation
            .translate(
                &request.text,
                request.source_language.name(),
                request.target_language.name(),
            )
            .await?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::generation::client::tests::StubGenerator;
    use crate::language::Language;

    fn translator(stub: &Arc<StubGenerator>) -> Translator {
        Translator::new(Arc::new(GenerationClient::new(stub.clone())))
    }

    #[tokio::test]
    async fn same_language_short_circuits_without_calling_the_model() {
        let stub = Arc::new(StubGenerator::replying("unused"));
        let request = TranslationRequest::new("Hello", Language::English, Language::English);

        let err = translator(&stub).translate(&request).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ValidationError::SameLanguage)));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_text_short_circuits_without_calling_the_model() {
        let stub = Arc::new(StubGenerator::replying("unused"));
        let request = TranslationRequest::new("", Language::English, Language::French);

        let err = translator(&stub).translate(&request).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ValidationError::BlankText)));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn valid_request_returns_the_translation_unchanged() {
        let stub = Arc::new(StubGenerator::replying("\u{201C}Bonjour\u{201D}"));
        let request = TranslationRequest::new("Hello", Language::English, Language::French);

        let text = translator(&stub).translate(&request).await.unwrap();

        assert_eq!(text, "\u{201C}Bonjour\u{201D}");
        assert_eq!(stub.calls().len(), 1);
    }
}
