//! Durable learning store document
//!
//! The snapshot is plain JSON, or zstd-compressed JSON when the file name
//! ends in `.zst`. Writes go to a sibling temporary file that is renamed over
//! the target once fully flushed, so a crash never leaves a truncated store.

use crate::error::EngineResult;
use crate::types::PositionId;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const ZSTD_LEVEL: i32 = 3;

/// One finished game in the rolling log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub positions: Vec<PositionId>,
    /// PGN-style result tag
    pub outcome: String,
    /// Reward from the store owner's side
    pub reward: f64,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

/// Serialized form of a learning store
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningSnapshot {
    pub side: Option<String>,
    /// Oldest entries first so reloading keeps the recency order
    pub position_values: IndexMap<String, f64>,
    pub move_history: Vec<GameRecord>,
    pub games_played: u64,
    pub wins: u64,
    pub draws: u64,
    pub losses: u64,
    pub epsilon: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
}

fn is_compressed(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "zst")
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Read a snapshot; `Ok(None)` when the file does not exist
pub fn read(path: &Path) -> EngineResult<Option<LearningSnapshot>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read(path)?;
    let bytes = if is_compressed(path) {
        zstd::decode_all(raw.as_slice())?
    } else {
        raw
    };

    Ok(Some(serde_json::from_slice(&bytes)?))
}

/// Write a snapshot atomically, creating parent directories as needed
pub fn write(path: &Path, snapshot: &LearningSnapshot) -> EngineResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_vec_pretty(snapshot)?;
    let bytes = if is_compressed(path) {
        zstd::encode_all(json.as_slice(), ZSTD_LEVEL)?
    } else {
        json
    };

    let tmp = temp_path(path);
    let written = write_then_rename(&tmp, path, &bytes);
    if written.is_err() {
        fs::remove_file(&tmp).ok();
    }
    Ok(written?)
}

fn write_then_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    {
        let file = File::create(tmp)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(bytes)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }
    fs::rename(tmp, path)
}
