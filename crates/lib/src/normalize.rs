//! # Language Normalizer
//!
//! Best-effort translation of the incoming question into the working language
//! before query generation. Detection or translation failures degrade to
//! passing the original text through unchanged; this stage never fails the
//! pipeline.

use crate::providers::translate::Translator;
use tracing::{debug, warn};
use whatlang::Lang;

/// The working language of the rest of the pipeline.
pub const WORKING_LANGUAGE: &str = "en";

/// Returns the question in the working language, or unchanged when it already
/// is (or when translation is unavailable).
///
/// The detected language is passed as an explicit source hint first; if that
/// fails (or no ISO-639-1 code exists for it), a second attempt lets the
/// service auto-detect the source.
pub async fn normalize(translator: &dyn Translator, text: &str) -> String {
    let info = match whatlang::detect(text) {
        Some(info) => info,
        None => {
            debug!("Language detection produced no result; passing text through");
            return text.to_string();
        }
    };

    if info.lang() == Lang::Eng {
        return text.to_string();
    }

    debug!(detected = info.lang().code(), "Non-English question detected");

    let hint = isolang::Language::from_639_3(info.lang().code()).and_then(|l| l.to_639_1());

    if let Some(source) = hint {
        match translator.translate(text, source, WORKING_LANGUAGE).await {
            Ok(translated) => return translated,
            Err(e) => {
                warn!(error = %e, source, "Hinted translation failed; retrying with auto detection");
            }
        }
    }

    match translator.translate(text, "auto", WORKING_LANGUAGE).await {
        Ok(translated) => translated,
        Err(e) => {
            warn!(error = %e, "Translation failed; passing question through unchanged");
            text.to_string()
        }
    }
}
