#![forbid(unsafe_code)]

pub mod progress_record;
pub mod repository;
pub mod sqlite;

pub use progress_record::{ProgressRecord, RecordError, progress_key};
pub use repository::{InMemoryKeyValueStore, KeyValueStore, Storage, StorageError};
