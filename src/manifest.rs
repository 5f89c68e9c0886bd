//! Batch manifest.
//!
//! Writes `smlgen.json` next to the generated fixtures so a run can be
//! reproduced from its base seed, selector and profile.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::program::{Fixture, ProgramComplexity};

pub const MANIFEST_FILE: &str = "smlgen.json";

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One written fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub file: String,
    pub tier: ProgramComplexity,
    pub seed: i64,
    /// Length in characters.
    pub length: usize,
}

impl FileEntry {
    pub fn new(file: impl Into<String>, fixture: &Fixture) -> Self {
        Self {
            file: file.into(),
            tier: fixture.tier,
            seed: fixture.seed,
            length: fixture.len(),
        }
    }
}

/// Contents of `smlgen.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub seed: i64,
    /// `mixed` or a tier name.
    pub selector: String,
    pub profile: String,
    pub count: usize,
    /// Seconds since the Unix epoch.
    pub generated_at: u64,
    pub files: Vec<FileEntry>,
}

impl Manifest {
    pub fn new(seed: i64, selector: String, profile: String, files: Vec<FileEntry>) -> Self {
        Self {
            version: VERSION.to_string(),
            seed,
            selector,
            profile,
            count: files.len(),
            generated_at: unix_timestamp(),
            files,
        }
    }

    /// Write the manifest to `dir/smlgen.json`.
    pub fn write_to_dir(&self, dir: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(dir.join(MANIFEST_FILE), json)
    }

    pub fn read_from_dir(dir: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(dir.join(MANIFEST_FILE))?;
        serde_json::from_str(&json).map_err(io::Error::other)
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
