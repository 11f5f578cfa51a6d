//! Durable storage adapters.

pub mod local_storage;
