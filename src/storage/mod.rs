//! Persistence of display toggles.
//!
//! Saves and loads the "bid style" and "I'm countering" toggles to/from a
//! JSON file so they survive between runs. The bet statement itself is
//! never stored.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::query::Preferences;
use crate::types::Role;

/// Default preferences file path.
const DEFAULT_TOGGLES_FILE: &str = "bidask_prefs.json";

/// The remembered UI toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggles {
    pub show_as_jst: bool,
    pub is_counterer: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            show_as_jst: true,
            is_counterer: true,
        }
    }
}

impl Toggles {
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            show_as_jst: prefs.show_as_jst,
            is_counterer: prefs.role.is_counterer(),
        }
    }

    /// Overlay these toggles onto `prefs`.
    pub fn apply(&self, prefs: &mut Preferences) {
        prefs.show_as_jst = self.show_as_jst;
        prefs.role = Role::from_countering(self.is_counterer);
    }
}

/// Save toggles to a JSON file.
pub fn save_toggles(toggles: &Toggles, path: Option<&str>) -> Result<()> {
    let path = path.unwrap_or(DEFAULT_TOGGLES_FILE);
    let json = serde_json::to_string_pretty(toggles)
        .context("Failed to serialise preferences")?;

    std::fs::write(path, &json)
        .context(format!("Failed to write preferences to {path}"))?;

    debug!(path, ?toggles, "Preferences saved");
    Ok(())
}

/// Load toggles from a JSON file.
/// Returns None if the file doesn't exist.
pub fn load_toggles(path: Option<&str>) -> Result<Option<Toggles>> {
    let path = path.unwrap_or(DEFAULT_TOGGLES_FILE);

    if !Path::new(path).exists() {
        debug!(path, "No saved preferences found");
        return Ok(None);
    }

    let json = std::fs::read_to_string(path)
        .context(format!("Failed to read preferences from {path}"))?;

    let toggles: Toggles = serde_json::from_str(&json)
        .context(format!("Failed to parse preferences from {path}"))?;

    info!(
        path,
        show_as_jst = toggles.show_as_jst,
        is_counterer = toggles.is_counterer,
        "Preferences loaded from disk"
    );

    Ok(Some(toggles))
}

/// Delete the preferences file.
pub fn delete_toggles(path: Option<&str>) -> Result<()> {
    let path = path.unwrap_or(DEFAULT_TOGGLES_FILE);
    if Path::new(path).exists() {
        std::fs::remove_file(path)
            .context(format!("Failed to delete preferences file {path}"))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
