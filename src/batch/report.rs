//! Batch run report

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// An actor left out of the output and why
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedActor {
    pub actor: String,
    pub error: String,
}

/// Counts collected over one batch run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Actor directories visited (after filtering)
    pub actors_scanned: usize,

    /// Actors present in the output
    pub actors_with_drops: usize,

    /// Actors without a parameter file or a DropRef component
    pub actors_without_drops: usize,

    /// Drop tables written
    pub tables: usize,

    /// Drop-table items written
    pub items: usize,

    /// Actors dropped because their resources failed to resolve
    #[serde(default)]
    pub skipped: Vec<SkippedActor>,
}

impl BatchReport {
    /// One-line human summary
    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "{} actor(s) scanned: {} with drops ({} tables, {} items), {} without",
            self.actors_scanned,
            self.actors_with_drops,
            self.tables,
            self.items,
            self.actors_without_drops
        );
        if !self.skipped.is_empty() {
            line.push_str(&format!(", {} skipped", self.skipped.len()));
        }
        line
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write to file
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("JSON error: {}", e))
        })?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line() {
        let report = BatchReport {
            actors_scanned: 10,
            actors_with_drops: 3,
            actors_without_drops: 6,
            tables: 4,
            items: 12,
            skipped: vec![SkippedActor {
                actor: "Enemy_Broken".to_string(),
                error: "resource not found".to_string(),
            }],
        };

        assert_eq!(
            report.summary_line(),
            "10 actor(s) scanned: 3 with drops (4 tables, 12 items), 6 without, 1 skipped"
        );
    }

    #[test]
    fn test_write_and_reload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        let report = BatchReport {
            actors_scanned: 1,
            ..Default::default()
        };

        report.write_to_file(&path).unwrap();
        let loaded: BatchReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, report);
    }
}
