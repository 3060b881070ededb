use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One recognized word with timing and confidence, as reported by the
/// offline model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordInfo {
    pub word: String,
    pub start: f32,
    pub end: f32,
    pub conf: f32,
}

/// A completed utterance from the offline model: the recognized text plus
/// per-word metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    #[serde(default)]
    pub words: Vec<WordInfo>,
}

/// The two backends return different shapes: the cloud service yields a
/// plain transcript string, the offline model a structured utterance.
/// Kept as two variants rather than normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum Recognition {
    Text(String),
    Utterance(Utterance),
}

impl Recognition {
    /// Render for the `[RESULT]` console line: the plain string as-is,
    /// the structured utterance as JSON.
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Utterance(utt) => {
                serde_json::to_string(utt).unwrap_or_else(|_| utt.text.clone())
            }
        }
    }
}

/// A recognition routine. `Ok(None)` is a soft failure: the backend has
/// already reported the problem on the console and the run continues with
/// an empty result. `Err` is fatal for the process.
pub trait RecognitionBackend {
    fn name(&self) -> &str;
    fn recognize(&self, audio_path: &Path) -> Result<Option<Recognition>>;
}

/// The closed set of backends. No dynamic registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Cloud,
    Vosk,
}

impl BackendKind {
    /// Map a selector string to a backend. Unset or unrecognized
    /// selectors fall back to the offline model.
    pub fn resolve(selector: Option<&str>) -> Self {
        match selector {
            Some("sr") => Self::Cloud,
            _ => Self::Vosk,
        }
    }
}
