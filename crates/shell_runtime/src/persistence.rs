//! Persistence bridge for the user configuration projection.
//!
//! Only [`PersistableShellConfig`] is stored. Window geometry, stacking and search state live in
//! [`crate::model::SessionState`] and are never written, so every reload starts with no windows.

use leptos::logging;
use shell_host::{load_json_with, save_json_with, ConfigStorage, StorageError};
use thiserror::Error;

use crate::{
    apps::sanitize_user_apps,
    model::{PersistableShellConfig, ShellState},
};

/// Storage key the configuration projection is written under.
pub const SHELL_CONFIG_KEY: &str = "ishell_state";
/// Suggested file name for exported configuration documents.
pub const EXPORT_FILE_NAME: &str = "ishell-config.json";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Stored text is not JSON, or not the expected shape.
    #[error("malformed persisted state: {0}")]
    MalformedPersistedState(String),
    /// A user-supplied import document failed to parse.
    #[error("import parse failure: {0}")]
    ImportParseFailure(String),
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for PersistenceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Deserialize(message) => Self::MalformedPersistedState(message),
            other => Self::Storage(other),
        }
    }
}

/// The projection written to storage: the state's config with reserved app ids removed.
pub fn persistable_projection(state: &ShellState) -> PersistableShellConfig {
    let mut config = state.config.clone();
    config.apps = sanitize_user_apps(config.apps);
    config
}

fn sanitized(mut config: PersistableShellConfig) -> PersistableShellConfig {
    config.apps = sanitize_user_apps(config.apps);
    config
}

/// Parses a configuration document. Missing keys take their initial values; reserved app ids
/// are dropped.
pub fn deserialize_config(raw: &str) -> Result<PersistableShellConfig, PersistenceError> {
    serde_json::from_str(raw)
        .map(sanitized)
        .map_err(|err| PersistenceError::MalformedPersistedState(err.to_string()))
}

/// Reads the stored configuration, reporting every failure.
pub async fn read_shell_config(
    storage: &dyn ConfigStorage,
) -> Result<Option<PersistableShellConfig>, PersistenceError> {
    let config = load_json_with::<_, PersistableShellConfig>(storage, SHELL_CONFIG_KEY).await?;
    Ok(config.map(sanitized))
}

/// Reads the stored configuration.
///
/// Absent, unreadable or malformed storage yields `None` so boot continues from defaults. Failures
/// are logged and never propagated.
pub async fn load_shell_config(storage: &dyn ConfigStorage) -> Option<PersistableShellConfig> {
    match read_shell_config(storage).await {
        Ok(config) => config,
        Err(err) => {
            logging::warn!("discarding stored shell config: {err}");
            None
        }
    }
}

pub async fn persist_shell_config(
    storage: &dyn ConfigStorage,
    state: &ShellState,
) -> Result<(), PersistenceError> {
    save_json_with(storage, SHELL_CONFIG_KEY, &persistable_projection(state)).await?;
    Ok(())
}

pub async fn clear_shell_config(storage: &dyn ConfigStorage) -> Result<(), PersistenceError> {
    storage.remove(SHELL_CONFIG_KEY).await?;
    Ok(())
}

/// Pretty-printed export document with the same shape as the stored record.
pub fn export_config_json(state: &ShellState) -> Result<String, PersistenceError> {
    serde_json::to_string_pretty(&persistable_projection(state))
        .map_err(|err| PersistenceError::Storage(StorageError::Serialize(err.to_string())))
}

/// Parses an import document. Failures are logged; the caller keeps its current state.
pub fn import_config_json(raw: &str) -> Result<PersistableShellConfig, PersistenceError> {
    deserialize_config(raw).map_err(|err| {
        let err = match err {
            PersistenceError::MalformedPersistedState(message) => {
                PersistenceError::ImportParseFailure(message)
            }
            other => other,
        };
        logging::warn!("config import rejected: {err}");
        err
    })
}
