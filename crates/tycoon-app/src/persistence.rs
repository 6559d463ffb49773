//! Save slots on disk: one pretty-printed JSON file per slot.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use tycoon_core::error::RestoreError;
use tycoon_core::state::SaveSnapshot;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("save file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode save data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save data is unusable: {0}")]
    Restore(#[from] RestoreError),
}

/// Full save data written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub slot_name: String,
    pub seed: u64,
    /// Unix seconds.
    pub timestamp: u64,
    pub snapshot: SaveSnapshot,
}

impl SaveData {
    pub fn new(slot_name: &str, seed: u64, snapshot: SaveSnapshot) -> Self {
        Self {
            slot_name: slot_name.to_string(),
            seed,
            timestamp: unix_now(),
            snapshot,
        }
    }

    /// Decode save data, defaulting any bad snapshot field.
    fn from_value_lenient(mut value: Value, slot: &str) -> Result<Self, PersistError> {
        let obj = value.as_object_mut().ok_or(RestoreError::NotAnObject)?;
        let snapshot = obj.remove("snapshot").unwrap_or_else(|| Value::Object(Default::default()));
        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);
        let number = |key: &str| obj.get(key).and_then(Value::as_u64).unwrap_or_default();
        Ok(Self {
            slot_name: text("slot_name").unwrap_or_else(|| slot.to_string()),
            seed: number("seed"),
            timestamp: number("timestamp"),
            snapshot: SaveSnapshot::from_value_lenient(snapshot)?,
        })
    }
}

/// Lightweight metadata for listing saves without keeping full state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub slot_name: String,
    pub timestamp: u64,
    pub gold: f64,
    pub building_count: usize,
    pub total_play_time: f64,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn save_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("{slot}.json"))
}

pub fn save_to_file(dir: &Path, slot: &str, data: &SaveData) -> Result<(), PersistError> {
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(data)?;
    fs::write(save_path(dir, slot), json)?;
    Ok(())
}

pub fn load_from_file(dir: &Path, slot: &str) -> Result<SaveData, PersistError> {
    let json = fs::read_to_string(save_path(dir, slot))?;
    let value: Value = serde_json::from_str(&json)?;
    SaveData::from_value_lenient(value, slot)
}

pub fn save_exists(dir: &Path, slot: &str) -> bool {
    save_path(dir, slot).is_file()
}

/// Every readable save in `dir`, newest first.
pub fn list_saves(dir: &Path) -> Vec<SaveMetadata> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut saves = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }
        let Some(slot) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if let Ok(data) = load_from_file(dir, slot) {
            saves.push(SaveMetadata {
                slot_name: data.slot_name,
                timestamp: data.timestamp,
                gold: data.snapshot.gold,
                building_count: data.snapshot.buildings.len(),
                total_play_time: data.snapshot.total_play_time,
            });
        }
    }
    saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    saves
}

pub fn delete_save(dir: &Path, slot: &str) -> Result<(), PersistError> {
    let path = save_path(dir, slot);
    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}
