//! Async client for the remote NLLB translation service

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::core::config::{NllbConfig, TimeoutPolicy};
use crate::core::endpoint::resolve_endpoint;
use crate::core::error_body::extract_error_message;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{
    mock_translations, HealthStatus, LanguageDescriptor, LanguagesResponse, TranslateRequest,
    TranslateResponse,
};

const TRANSLATE_PATH: &str = "/nllb/translate";
const LANGUAGES_PATH: &str = "/nllb/languages";
const HEALTH_PATH: &str = "/nllb/health";

/// Client for the three NLLB endpoints.
///
/// Holds no mutable state, so clones can be used from any number of tasks.
/// Idle connections are never pooled: each call's connection is closed once
/// its response has been consumed or the call is dropped. Redirects are not
/// followed, so a 3xx answer is a failed call like any other non-2xx status.
#[derive(Debug, Clone)]
pub struct NllbClient {
    translate_http: reqwest::Client,
    probe_http: reqwest::Client,
    config: Arc<NllbConfig>,
}

fn build_http(policy: TimeoutPolicy) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .connect_timeout(policy.connect)
        .read_timeout(policy.read)
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .build()
        .map_err(|e| TranslationError::config(format!("failed to create HTTP client: {}", e)))?;
    Ok(client)
}

/// Timeouts take precedence: a connect timeout is a timeout, not an
/// unreachable service.
fn transport_error(err: reqwest::Error) -> TranslationError {
    if err.is_timeout() {
        error!("NLLB request timed out: {}", err);
        TranslationError::Timeout
    } else {
        TranslationError::Http(err)
    }
}

impl NllbClient {
    /// Create a new client from a validated configuration
    pub fn new(config: NllbConfig) -> Result<Self> {
        config.validate()?;

        let translate_http = build_http(config.translate_timeouts())?;
        let probe_http = build_http(config.probe_timeouts())?;

        Ok(Self {
            translate_http,
            probe_http,
            config: Arc::new(config),
        })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        Self::new(NllbConfig::from_env()?)
    }

    /// Base URL a call with `endpoint` would use
    pub fn resolve_endpoint<'a>(&'a self, endpoint: Option<&'a str>) -> &'a str {
        resolve_endpoint(endpoint, &self.config.endpoint)
    }

    /// Translate a batch of texts in one request.
    ///
    /// When the service cannot be reached at all, a placeholder translation is
    /// returned for every input instead of an error. Status errors and
    /// timeouts are raised.
    ///
    /// Connect and read limits are enforced per phase. Write and pool-acquire
    /// have no per-phase limit in reqwest; they are only bounded by the
    /// overall deadline (sum of all four phases, 60s by default), so a write
    /// stalling past its own limit fails only when that deadline expires.
    pub async fn translate(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
        endpoint: Option<&str>,
    ) -> Result<Vec<String>> {
        if texts.is_empty() {
            debug!("Empty translation batch, skipping request");
            return Ok(Vec::new());
        }

        let base = self.resolve_endpoint(endpoint);
        let url = format!("{}{}", base, TRANSLATE_PATH);
        debug!(url = %url, texts = texts.len(), source_lang, target_lang, "sending translation batch");

        let body = TranslateRequest {
            texts,
            source_lang,
            target_lang,
        };

        let sent = self
            .translate_http
            .post(&url)
            .timeout(self.config.translate_timeouts().total())
            .json(&body)
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err(transport_error(e)),
            Err(e) if e.is_connect() => {
                warn!("NLLB service unreachable ({}), using mock translation: {}", base, e);
                return Ok(mock_translations(texts, target_lang));
            }
            Err(e) => return Err(e.into()),
        };

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.map_err(transport_error)?;
            let message = extract_error_message(&raw);
            error!("NLLB request failed [{}]: {}", status.as_u16(), message);
            return Err(TranslationError::Failed {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        let parsed: TranslateResponse = serde_json::from_slice(&bytes).map_err(|e| {
            TranslationError::invalid_response(format!("malformed translate response: {}", e))
        })?;

        parsed.into_texts(texts.len())
    }

    /// Supported languages, or `None` when the service is unavailable
    pub async fn fetch_languages(
        &self,
        endpoint: Option<&str>,
    ) -> Result<Option<Vec<LanguageDescriptor>>> {
        let response: Option<LanguagesResponse> = self.probe(endpoint, LANGUAGES_PATH).await?;
        Ok(response.map(|r| r.languages.unwrap_or_default()))
    }

    /// Health document, or `None` when the service is unavailable
    pub async fn check_health(&self, endpoint: Option<&str>) -> Result<Option<HealthStatus>> {
        self.probe(endpoint, HEALTH_PATH).await
    }

    /// GET an advisory resource. Every transport or status failure collapses
    /// to `Ok(None)`; only a malformed success body is an error.
    async fn probe<T: DeserializeOwned>(
        &self,
        endpoint: Option<&str>,
        path: &str,
    ) -> Result<Option<T>> {
        let url = format!("{}{}", self.resolve_endpoint(endpoint), path);
        debug!(url = %url, "probing NLLB service");

        let fetched = self
            .probe_http
            .get(&url)
            .timeout(self.config.probe_timeouts().total())
            .send()
            .await;

        let response = match fetched {
            Ok(response) => response,
            Err(e) => {
                debug!(url = %url, "NLLB service unavailable: {}", e);
                return Ok(None);
            }
        };

        // Redirects are not followed, so 3xx lands here too
        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = status.as_u16(), "NLLB service unavailable");
            return Ok(None);
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(url = %url, "NLLB service unavailable: {}", e);
                return Ok(None);
            }
        };

        let parsed = serde_json::from_slice(&bytes).map_err(|e| {
            TranslationError::invalid_response(format!("malformed response from {}: {}", url, e))
        })?;
        Ok(Some(parsed))
    }
}
