//! # Translation Provider
//!
//! The language normalizer's external capability: best-effort translation of
//! a question into the working language before query generation.

use crate::errors::AskError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use reqwest::Client as ReqwestClient;
use serde_json::Value;
use std::fmt::Debug;
use std::time::Duration;
use tracing::debug;

/// A trait for translating text between languages.
///
/// `source` is an ISO-639-1 code or `"auto"` for service-side detection;
/// `target` is an ISO-639-1 code.
#[async_trait]
pub trait Translator: Send + Sync + Debug + DynClone {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, AskError>;
}

dyn_clone::clone_trait_object!(Translator);

/// The public Google Translate endpoint used when none is configured.
pub const DEFAULT_TRANSLATE_API_URL: &str =
    "https://translate.googleapis.com/translate_a/single";

/// A `Translator` backed by a Google-Translate-compatible (`client=gtx`) endpoint.
#[derive(Clone, Debug)]
pub struct GoogleTranslator {
    client: ReqwestClient,
    api_url: String,
}

impl GoogleTranslator {
    /// Creates a new `GoogleTranslator` against the given endpoint URL.
    pub fn new(api_url: String) -> Result<Self, AskError> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(AskError::ReqwestClientBuild)?;
        Ok(Self { client, api_url })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, AskError> {
        debug!(source, target, "--> Sending translation request");

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("client", "gtx"),
                ("dt", "t"),
                ("sl", source),
                ("tl", target),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| AskError::Translation(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AskError::Translation(format!(
                "translation endpoint returned {}",
                response.status()
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AskError::Translation(e.to_string()))?;

        // The gtx payload is a nested array; the first element holds one
        // entry per translated segment, whose first element is the text.
        let segments = payload
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| AskError::Translation("unexpected response shape".to_string()))?;

        let translated: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        if translated.is_empty() {
            return Err(AskError::Translation("empty translation result".to_string()));
        }

        debug!("<-- Translated text: {translated}");
        Ok(translated)
    }
}
