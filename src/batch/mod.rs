//! Batch extraction over every actor in the pack.

mod filter;
mod report;

pub use filter::{ActorFilter, FilterError};
pub use report::{BatchReport, SkippedActor};

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use actor_param::LoadError;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::ExtractSettings;
use crate::drops::{DropTable, DropTableAssembler};

/// Output mapping: actor name to its drop tables, sorted by actor.
pub type DropTableMap = BTreeMap<String, Vec<DropTable>>;

/// Errors that stop a batch run
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("actor root not found: {0}")]
    ActorRootMissing(PathBuf),

    #[error("failed to scan actors: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("actor '{actor}': {source}")]
    Actor {
        actor: String,
        #[source]
        source: LoadError,
    },

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of a batch run
#[derive(Debug)]
pub struct BatchOutcome {
    pub tables: DropTableMap,
    pub report: BatchReport,
}

/// Names of the actor directories under `root`, sorted.
pub fn discover_actors(root: &Path) -> Result<Vec<String>, BatchError> {
    if !root.is_dir() {
        return Err(BatchError::ActorRootMissing(root.to_path_buf()));
    }

    let mut actors = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
    {
        let entry = entry?;
        if entry.file_type().is_dir() {
            actors.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    Ok(actors)
}

/// Assemble drop tables for every selected actor.
///
/// Missing or cyclic resources skip the actor. Unreadable or malformed
/// documents stop the run unless `keep_going` is set.
pub fn run_batch(settings: &ExtractSettings) -> Result<BatchOutcome, BatchError> {
    let root = settings.actor_root();
    let filter = ActorFilter::new(settings.actors.as_slice())?;
    let assembler = DropTableAssembler::new(settings);

    let actors = discover_actors(&root)?;
    info!(root = %root.display(), actors = actors.len(), "scanning actors");

    let mut tables = DropTableMap::new();
    let mut report = BatchReport::default();

    for actor in actors.into_iter().filter(|a| filter.matches(a)) {
        report.actors_scanned += 1;

        match assembler.read_actor_drop_tables(&actor) {
            Ok(Some(actor_tables)) => {
                report.actors_with_drops += 1;
                report.tables += actor_tables.len();
                report.items += actor_tables.iter().map(|t| t.items.len()).sum::<usize>();
                tables.insert(actor, actor_tables);
            }
            Ok(None) => {
                debug!(actor = %actor, "no drop tables");
                report.actors_without_drops += 1;
            }
            Err(err) if err.is_resolution_failure() || settings.keep_going => {
                warn!(actor = %actor, error = %err, "skipping actor");
                report.skipped.push(SkippedActor {
                    actor,
                    error: err.to_string(),
                });
            }
            Err(source) => return Err(BatchError::Actor { actor, source }),
        }
    }

    info!("{}", report.summary_line());
    Ok(BatchOutcome { tables, report })
}

/// Write the actor → tables mapping as indented JSON.
pub fn write_output(path: &Path, tables: &DropTableMap) -> Result<(), BatchError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(tables)?;
    fs::write(path, json)?;
    info!(path = %path.display(), actors = tables.len(), "saved drop tables");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_sorted_dirs_only() {
        let dir = TempDir::new().unwrap();
        for name in ["Npc_B", "Enemy_A", "Obj_C"] {
            fs::create_dir_all(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("stray.json"), "{}").unwrap();

        let actors = discover_actors(dir.path()).unwrap();
        assert_eq!(actors, vec!["Enemy_A", "Npc_B", "Obj_C"]);
    }

    #[test]
    fn test_discover_missing_root() {
        let dir = TempDir::new().unwrap();
        let err = discover_actors(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, BatchError::ActorRootMissing(_)));
    }

    #[test]
    fn test_write_output_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/drop_tables.json");
        let mut tables = DropTableMap::new();
        tables.insert("Enemy_A".to_string(), Vec::new());

        write_output(&path, &tables).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"Enemy_A\": []\n}");
    }
}
