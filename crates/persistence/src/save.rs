//! Compact binary save files.

use crate::PersistError;
use sim_core::PlayerState;
use std::path::Path;
use tracing::info;

pub fn encode(state: &PlayerState) -> Result<Vec<u8>, PersistError> {
    Ok(bincode::serialize(state)?)
}

pub fn decode(bytes: &[u8]) -> Result<PlayerState, PersistError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Write a save file, creating parent directories as needed.
pub async fn write_save(path: impl AsRef<Path>, state: &PlayerState) -> Result<(), PersistError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = encode(state)?;
    tokio::fs::write(path, &bytes).await?;
    info!(path = %path.display(), bytes = bytes.len(), "saved game");
    Ok(())
}

pub async fn read_save(path: impl AsRef<Path>) -> Result<PlayerState, PersistError> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    decode(&bytes)
}
