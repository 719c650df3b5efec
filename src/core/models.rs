//! Wire models for the NLLB service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::errors::{Result, TranslationError};

/// Opaque language metadata (code, name, ...) passed through unchanged.
pub type LanguageDescriptor = Map<String, Value>;

/// Opaque health document passed through unchanged.
pub type HealthStatus = Map<String, Value>;

/// Body of `POST /nllb/translate`
#[derive(Debug, Clone, Serialize)]
pub struct TranslateRequest<'a> {
    /// Source texts, order-significant
    pub texts: &'a [String],
    /// Source language code, passed through unvalidated
    pub source_lang: &'a str,
    /// Target language code, passed through unvalidated
    pub target_lang: &'a str,
}

/// Response of `POST /nllb/translate`
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponse {
    /// One item per input text
    pub translations: Vec<TranslationItem>,
}

/// One element of the `translations` list
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationItem {
    /// Translated text
    pub text: String,
    /// Position of the source text, when the service reports it
    #[serde(default)]
    pub index: Option<usize>,
}

/// Response of `GET /nllb/languages`
#[derive(Debug, Clone, Deserialize)]
pub struct LanguagesResponse {
    /// Absent and `null` both read as an empty list
    #[serde(default)]
    pub languages: Option<Vec<LanguageDescriptor>>,
}

impl TranslateResponse {
    /// Extract translated texts aligned with `expected` inputs.
    ///
    /// Items are correlated by `index` when every item carries one, by
    /// position otherwise.
    pub fn into_texts(self, expected: usize) -> Result<Vec<String>> {
        let mut items = self.translations;
        if items.len() != expected {
            return Err(TranslationError::invalid_response(format!(
                "expected {} translations, got {}",
                expected,
                items.len()
            )));
        }

        if !items.is_empty() && items.iter().all(|item| item.index.is_some()) {
            items.sort_by_key(|item| item.index);
            let contiguous = items
                .iter()
                .enumerate()
                .all(|(position, item)| item.index == Some(position));
            if !contiguous {
                return Err(TranslationError::invalid_response(
                    "translation indices do not cover the input batch",
                ));
            }
        }

        Ok(items.into_iter().map(|item| item.text).collect())
    }
}

/// Placeholder output used when the service cannot be reached.
pub fn mock_translations(texts: &[String], target_lang: &str) -> Vec<String> {
    texts
        .iter()
        .map(|text| format!("[Mock translation to {}] {}", target_lang, text))
        .collect()
}
