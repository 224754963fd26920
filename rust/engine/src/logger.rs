use serde::{Deserialize, Serialize};

use crate::player::Declaration;

/// One line of the table's action log, as shown to the UI.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Wall-clock HH:MM:SS when the entry was written.
    pub time: String,
    pub msg: String,
}

/// In-memory action log for the current game. Append-only; cleared when a
/// new game starts.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    entries: Vec<LogEntry>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, msg: impl Into<String>) {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        self.entries.push(LogEntry {
            time,
            msg: msg.into(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Per-player line in a round record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerOutcome {
    pub player_id: usize,
    pub name: String,
    pub chips_after: u32,
    pub folded: bool,
    #[serde(default)]
    pub declaration: Option<Declaration>,
    #[serde(default)]
    pub result: Option<f64>,
    #[serde(default)]
    pub equation: Option<String>,
}

/// Complete record of one round, one JSONL line per round in simulation
/// histories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub pot: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    pub outcomes: Vec<PlayerOutcome>,
    #[serde(default)]
    pub low_winner: Option<usize>,
    #[serde(default)]
    pub high_winner: Option<usize>,
    #[serde(default)]
    pub swing_winner: Option<usize>,
    /// Timestamp when the round finished (RFC3339 format).
    #[serde(default)]
    pub ts: Option<String>,
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends [`RoundRecord`]s as JSONL for later inspection or replay.
pub struct RoundLogger {
    writer: BufWriter<File>,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                let _ = create_dir_all(parent);
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(f),
        })
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
