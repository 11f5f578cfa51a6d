//! Browser (`wasm32`) implementations of [`shell_host`] service contracts.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;

use std::rc::Rc;

use shell_host::ConfigStorage;

pub use storage::local_storage::WebConfigStorage;

/// Returns the configuration store for the current target.
///
/// Off-browser builds get a [`WebConfigStorage`] whose reads find nothing and whose writes are
/// accepted and dropped.
pub fn config_storage() -> Rc<dyn ConfigStorage> {
    Rc::new(WebConfigStorage)
}
