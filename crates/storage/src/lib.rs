#![forbid(unsafe_code)]

pub mod record;
pub mod repository;
pub mod sqlite;

pub use record::{PROGRESS_KEY, ProgressRecord, QuizResultRecord, decode_progress, encode_progress};
pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};
