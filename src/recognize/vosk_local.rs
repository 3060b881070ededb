use std::path::Path;

use anyhow::Result;
use vosk::{DecodingState, Model, Recognizer};

use crate::recognize::backend::{Recognition, RecognitionBackend, Utterance, WordInfo};

/// Frames fed to the recognizer per iteration.
const CHUNK_FRAMES: usize = 4000;

pub struct VoskLocal {
    model: Model,
}

impl VoskLocal {
    pub fn new(model_dir: &Path) -> Result<Self> {
        let model = Model::new(model_dir.to_string_lossy()).ok_or_else(|| {
            anyhow::anyhow!("Failed to load Vosk model from {}", model_dir.display())
        })?;
        Ok(Self { model })
    }
}

/// Feed fixed-size chunks of samples to `accept` until it produces a
/// completed utterance or the samples run out. Frames past the first
/// completed utterance are never read.
fn feed_chunks<I, F>(mut samples: I, mut accept: F) -> Result<Option<Utterance>>
where
    I: Iterator<Item = hound::Result<i16>>,
    F: FnMut(&[i16]) -> Result<Option<Utterance>>,
{
    loop {
        let mut chunk = Vec::with_capacity(CHUNK_FRAMES);
        for sample in samples.by_ref().take(CHUNK_FRAMES) {
            chunk.push(sample?);
        }
        if chunk.is_empty() {
            // End of file before any utterance completed.
            return Ok(None);
        }
        if let Some(utterance) = accept(&chunk)? {
            return Ok(Some(utterance));
        }
    }
}

impl RecognitionBackend for VoskLocal {
    fn name(&self) -> &str {
        "vosk"
    }

    fn recognize(&self, audio_path: &Path) -> Result<Option<Recognition>> {
        let mut reader = hound::WavReader::open(audio_path)?;
        let sample_rate = reader.spec().sample_rate;

        let mut recognizer = Recognizer::new(&self.model, sample_rate as f32)
            .ok_or_else(|| anyhow::anyhow!("Failed to create Vosk recognizer"))?;
        recognizer.set_words(true);

        let utterance = feed_chunks(reader.samples::<i16>(), |chunk| {
            let state = recognizer
                .accept_waveform(chunk)
                .map_err(|e| anyhow::anyhow!("accept_waveform failed: {}", e))?;
            match state {
                DecodingState::Finalized => {
                    let single = recognizer
                        .result()
                        .single()
                        .ok_or_else(|| anyhow::anyhow!("Vosk returned no single result"))?;
                    Ok(Some(Utterance {
                        text: single.text.to_string(),
                        words: single
                            .result
                            .iter()
                            .map(|w| WordInfo {
                                word: w.word.to_string(),
                                start: w.start,
                                end: w.end,
                                conf: w.conf,
                            })
                            .collect(),
                    }))
                }
                DecodingState::Running => Ok(None),
                DecodingState::Failed => {
                    anyhow::bail!("Vosk failed to decode {}", audio_path.display())
                }
            }
        })?;

        Ok(utterance.map(Recognition::Utterance))
    }
}
