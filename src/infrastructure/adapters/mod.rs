//! Forum adapters

pub mod console;
pub mod recording;

pub use console::{ConsoleConnector, ConsoleForum, StdinNotifier};
pub use recording::RecordingForum;
