pub mod backend;
pub mod cloud;
pub mod runner;
pub mod vosk_local;
