use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Recorded or hand-written player actions for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputScript {
    /// Pattern seed the actions were played against.
    pub seed: Option<u64>,
    /// Action times in seconds, relative to session start.
    pub actions: Vec<f64>,
}

impl InputScript {
    pub fn new(seed: Option<u64>, actions: Vec<f64>) -> Self {
        Self { seed, actions }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let script = serde_json::from_str(&content)?;
        Ok(script)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
