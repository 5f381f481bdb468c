//! Watched loads: the driver's watch list, persisted across sessions

use crate::error::LoadBoardError;
use crate::models::Load;
use crate::storage;

const KEY: &str = "watched_loads";

async fn load_list() -> Result<Vec<Load>, LoadBoardError> {
    Ok(storage::profile_get(KEY)
        .await
        .map_err(|e| LoadBoardError::store(e.to_string()))?
        .unwrap_or_default())
}

async fn store_list(list: Vec<Load>) -> Result<(), LoadBoardError> {
    storage::profile_put(KEY, list)
        .await
        .map_err(|e| LoadBoardError::store(e.to_string()))
}

/// Add the load to the watch list, or remove it if already present.
/// Returns whether the load is watched afterwards.
pub(crate) fn toggle_in(list: &mut Vec<Load>, load: &Load) -> bool {
    if list.iter().any(|l| l.id == load.id) {
        list.retain(|l| l.id != load.id);
        false
    } else {
        list.push(load.clone());
        true
    }
}

/// Toggle a load on the persisted watch list; returns the new watched state.
pub async fn toggle(load: &Load) -> Result<bool, LoadBoardError> {
    let mut list = load_list().await?;
    let watched = toggle_in(&mut list, load);
    store_list(list).await?;
    Ok(watched)
}

/// Whether the given load id is on the watch list.
pub async fn is_watched(load_id: &str) -> Result<bool, LoadBoardError> {
    Ok(load_list().await?.iter().any(|l| l.id == load_id))
}

/// The full watch list, oldest first.
pub async fn all() -> Result<Vec<Load>, LoadBoardError> {
    load_list().await
}
