pub mod storage;
pub mod types;

pub use storage::{TranscriptLog, TRANSCRIPT_CAPACITY};
pub use types::{AudioData, LogEntry, LogKind};
