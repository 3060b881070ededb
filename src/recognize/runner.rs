use anyhow::Result;
use chrono::{DateTime, Local};

use crate::cli::Cli;
use crate::config::Config;
use crate::recognize::backend::{BackendKind, RecognitionBackend};
use crate::recognize::cloud::CloudBackend;
use crate::recognize::vosk_local::VoskLocal;

/// Build the backend for the resolved kind.
fn build_backend(kind: BackendKind, config: &Config) -> Result<Box<dyn RecognitionBackend>> {
    match kind {
        BackendKind::Cloud => Ok(Box::new(CloudBackend::new(
            &config.cloud,
            &config.recognition.locale,
        ))),
        BackendKind::Vosk => Ok(Box::new(VoskLocal::new(&config.vosk.model_dir)?)),
    }
}

/// Whole seconds between the start and stop markers, clamped at zero.
fn elapsed_seconds(start: DateTime<Local>, stop: DateTime<Local>) -> i64 {
    stop.signed_duration_since(start).num_seconds().max(0)
}

pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    let start = Local::now();
    println!("[START] {}", start.format("%H.%M.%S"));

    // The explicit selector is echoed verbatim, even when it will fall
    // back to vosk.
    let selected = cli.voice.as_deref().unwrap_or("vosk");
    println!("[INFO] Selected backend is {}", selected);

    let kind = BackendKind::resolve(cli.voice.as_deref());
    let backend = build_backend(kind, config)?;
    tracing::debug!("Resolved backend: {}", backend.name());

    println!("[INFO] Decoding...");
    match backend.recognize(&cli.path)? {
        Some(recognition) => println!("[RESULT] {}", recognition.display()),
        None => println!("[RESULT]"),
    }

    let stop = Local::now();
    println!("[STOP] {}", stop.format("%H.%M.%S"));
    println!("[WORKED] {} seconds", elapsed_seconds(start, stop));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_elapsed_whole_seconds() {
        let start = Local::now();
        assert_eq!(elapsed_seconds(start, start + Duration::seconds(42)), 42);
        assert_eq!(elapsed_seconds(start, start + Duration::milliseconds(900)), 0);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let start = Local::now();
        assert_eq!(elapsed_seconds(start, start - Duration::seconds(5)), 0);
    }

    #[test]
    fn test_build_cloud_backend() {
        let config = Config::default();
        let backend = build_backend(BackendKind::Cloud, &config).unwrap();
        assert_eq!(backend.name(), "sr");
    }
}
