//! Per-actor drop-table assembly.

use std::path::{Path, PathBuf};

use actor_param::{ActorRecord, Document, DocumentLoader, LoadError, SOURCE_KEY};
use serde_json::Value;
use tracing::debug;

use super::table::DropTable;
use super::{DROP_REF_COMPONENT, ELEMENT_LIST_KEY, TABLE_LIST_KEY};
use crate::config::ExtractSettings;

/// Reads the drop tables of individual actors.
#[derive(Debug)]
pub struct DropTableAssembler<'a> {
    settings: &'a ExtractSettings,
}

impl<'a> DropTableAssembler<'a> {
    pub fn new(settings: &'a ExtractSettings) -> Self {
        Self { settings }
    }

    /// Assemble the drop tables of one actor.
    ///
    /// `Ok(None)` means the actor has no parameter file or no `DropRef`
    /// component. Any load failure aborts the whole actor.
    pub fn read_actor_drop_tables(&self, actor: &str) -> Result<Option<Vec<DropTable>>, LoadError> {
        let work_root = self.settings.actor_root().join(actor);
        self.read_drop_tables_in(&work_root, actor)
    }

    /// Same as [`read_actor_drop_tables`](Self::read_actor_drop_tables) with
    /// an explicit work root.
    pub fn read_drop_tables_in(
        &self,
        work_root: &Path,
        actor: &str,
    ) -> Result<Option<Vec<DropTable>>, LoadError> {
        let param_path = self.settings.actor_param_path(work_root, actor);
        if !param_path.is_file() {
            debug!(actor, path = %param_path.display(), "no actor parameter file");
            return Ok(None);
        }

        let loader = self.settings.loader_for(work_root);
        let mut record = ActorRecord::load(&loader, &param_path)?;
        if !record.read_component(DROP_REF_COMPONENT)? {
            debug!(actor, "no DropRef component");
            return Ok(None);
        }

        let table_refs = match record.component(DROP_REF_COMPONENT) {
            Some(drop_ref) => resource_list(drop_ref, TABLE_LIST_KEY, &component_source(drop_ref))?,
            None => Vec::new(),
        };

        let mut tables = Vec::with_capacity(table_refs.len());
        for table_ref in &table_refs {
            let mut table = self.read_table(&loader, table_ref)?;
            if self.settings.clean {
                table.clean();
            }
            tables.push(table);
        }

        debug!(actor, tables = tables.len(), "assembled drop tables");
        Ok(Some(tables))
    }

    fn read_table(&self, loader: &DocumentLoader, table_ref: &str) -> Result<DropTable, LoadError> {
        let table = loader.load_file(table_ref)?;
        let element_refs = resource_list(&table, ELEMENT_LIST_KEY, Path::new(table_ref))?;

        let items = element_refs
            .iter()
            .map(|element| loader.load_file(element))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DropTable::new(table, items))
    }
}

fn component_source(component: &Document) -> PathBuf {
    component
        .get(SOURCE_KEY)
        .and_then(Value::as_str)
        .map(PathBuf::from)
        .unwrap_or_default()
}

/// Read a list of resource paths; absent or null counts as empty.
fn resource_list(doc: &Document, key: &str, source: &Path) -> Result<Vec<String>, LoadError> {
    let malformed = |reason: String| LoadError::MalformedDocument {
        path: source.to_path_buf(),
        reason,
    };

    match doc.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| {
                entry
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| malformed(format!("{} contains a non-string entry", key)))
            })
            .collect(),
        Some(_) => Err(malformed(format!("{} is not a list", key))),
    }
}
