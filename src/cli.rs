use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "speech2text",
    version,
    about = "Transcribe an audio file with a cloud service or a local Vosk model"
)]
pub struct Cli {
    /// Path to the audio file to transcribe (WAV)
    #[arg(short, long)]
    pub path: PathBuf,

    /// Recognition backend ("sr" for the cloud service, "vosk" for the
    /// local model; anything else falls back to vosk)
    #[arg(short, long)]
    pub voice: Option<String>,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
