//! Host-domain contracts shared by the shell runtime and its browser adapters.
//!
//! The runtime only talks to durable storage through [`ConfigStorage`]; concrete browser wiring
//! lives in `shell_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod time;

pub use storage::{
    load_json_with, save_json_with, ConfigStorage, MemoryConfigStorage, NoopConfigStorage,
    StorageError, StorageFuture,
};
pub use time::unix_time_ms_now;
