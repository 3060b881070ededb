use std::path::Path;

use anyhow::Result;
use reqwest::blocking::multipart;
use thiserror::Error;

use crate::config::CloudConfig;
use crate::recognize::backend::{Recognition, RecognitionBackend};

/// The two failure modes the cloud service reports that are swallowed
/// rather than propagated: the run continues with an empty result.
#[derive(Debug, Error)]
pub enum CloudError {
    #[error("the recognition service could not understand the audio")]
    NotUnderstood,
    #[error("request to the recognition service failed: {0}")]
    Request(String),
}

pub struct CloudBackend {
    endpoint: String,
    api_key: Option<String>,
    locale: String,
}

impl CloudBackend {
    pub fn new(config: &CloudConfig, locale: &str) -> Self {
        let api_key = if config.api_key.is_empty() {
            std::env::var("SPEECH2TEXT_CLOUD_KEY").ok()
        } else {
            Some(config.api_key.clone())
        };

        Self {
            endpoint: config.endpoint.clone(),
            api_key,
            locale: locale.to_string(),
        }
    }

    /// Submit the whole audio file and return the transcript text.
    fn request_transcript(&self, audio_path: &Path) -> Result<Result<String, CloudError>> {
        let file_bytes = std::fs::read(audio_path)?;
        let filename = audio_path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("audio path has no filename: {}", audio_path.display()))?
            .to_string_lossy()
            .to_string();

        let form = multipart::Form::new()
            .part(
                "file",
                multipart::Part::bytes(file_bytes)
                    .file_name(filename)
                    .mime_str("audio/wav")?,
            )
            .text("language", self.locale.clone())
            .text("response_format", "json");

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()?;

        let mut request = client.post(&self.endpoint).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.header("api-key", key);
        }

        let response = match request.send() {
            Ok(response) => response,
            Err(e) => return Ok(Err(CloudError::Request(e.to_string()))),
        };
        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => return Ok(Err(CloudError::Request(e.to_string()))),
        };

        let body: serde_json::Value = response.json()?;
        Ok(extract_transcript(&body))
    }
}

/// Pull the transcript out of the service's JSON body. An empty or absent
/// transcript means the audio was not understood.
fn extract_transcript(body: &serde_json::Value) -> Result<String, CloudError> {
    match body["text"].as_str() {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(CloudError::NotUnderstood),
    }
}

impl RecognitionBackend for CloudBackend {
    fn name(&self) -> &str {
        "sr"
    }

    fn recognize(&self, audio_path: &Path) -> Result<Option<Recognition>> {
        match self.request_transcript(audio_path)? {
            Ok(text) => Ok(Some(Recognition::Text(text))),
            Err(e) => {
                // Recognized failure: report and continue with no result.
                println!("[INFO] {}", e);
                tracing::warn!("Cloud recognition failed: {}", e);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_transcript_present() {
        let body = serde_json::json!({ "text": "привет мир" });
        assert_eq!(extract_transcript(&body).unwrap(), "привет мир");
    }

    #[test]
    fn test_extract_transcript_empty_is_not_understood() {
        let body = serde_json::json!({ "text": "" });
        assert!(matches!(
            extract_transcript(&body),
            Err(CloudError::NotUnderstood)
        ));

        let body = serde_json::json!({ "text": "   " });
        assert!(matches!(
            extract_transcript(&body),
            Err(CloudError::NotUnderstood)
        ));
    }

    #[test]
    fn test_extract_transcript_missing_is_not_understood() {
        let body = serde_json::json!({ "status": "ok" });
        assert!(matches!(
            extract_transcript(&body),
            Err(CloudError::NotUnderstood)
        ));
    }

    #[test]
    fn test_missing_file_is_a_hard_error() {
        let config = CloudConfig::default();
        let backend = CloudBackend::new(&config, "ru-RU");
        let result = backend.recognize(Path::new("/nonexistent/audio.wav"));
        assert!(result.is_err());
    }

    #[test]
    fn test_unreachable_endpoint_is_a_soft_failure() {
        let tmp = tempfile::TempDir::new().unwrap();
        let audio = tmp.path().join("audio.wav");
        std::fs::write(&audio, b"RIFF").unwrap();

        let config = CloudConfig {
            // .invalid never resolves, so the send fails fast.
            endpoint: "http://speech.invalid/recognize".to_string(),
            api_key: String::new(),
        };
        let backend = CloudBackend::new(&config, "ru-RU");
        let result = backend.recognize(&audio).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_config_key_wins_over_env() {
        let config = CloudConfig {
            endpoint: "https://stt.example.com".to_string(),
            api_key: "from-config".to_string(),
        };
        let backend = CloudBackend::new(&config, "en-US");
        assert_eq!(backend.api_key.as_deref(), Some("from-config"));
    }
}
