//! Actor parameter records and their component table.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::LoadError;
use crate::loader::DocumentLoader;
use crate::path::CandidatePaths;
use crate::{Document, SOURCE_KEY};

/// Key of the component table inside an actor parameter document.
const COMPONENTS_KEY: &str = "Components";

/// One entry of an actor's component table.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentSlot {
    /// Resource path not loaded yet.
    Unresolved(String),
    /// Loaded document, tagged with `_file` when it came from a path.
    Resolved(Document),
}

/// A loaded actor parameter file.
#[derive(Debug)]
pub struct ActorRecord<'a> {
    loader: &'a DocumentLoader,
    param: Document,
    components: Option<BTreeMap<String, ComponentSlot>>,
}

impl<'a> ActorRecord<'a> {
    /// Load an actor parameter file by exact path.
    ///
    /// Actor parameter files never fall back to the shared root.
    pub fn load(loader: &'a DocumentLoader, param_path: &Path) -> Result<Self, LoadError> {
        let mut param = loader.load_candidates(&CandidatePaths::exact(param_path))?;
        let components = match param.shift_remove(COMPONENTS_KEY) {
            Some(Value::Object(table)) => Some(component_slots(table)),
            Some(other) => {
                // Not a table; keep it as plain data.
                param.insert(COMPONENTS_KEY.to_string(), other);
                None
            }
            None => None,
        };

        Ok(Self {
            loader,
            param,
            components,
        })
    }

    pub fn slot(&self, name: &str) -> Option<&ComponentSlot> {
        self.components.as_ref()?.get(name)
    }

    /// Resolved document of a component, if it has been read.
    pub fn component(&self, name: &str) -> Option<&Document> {
        match self.slot(name)? {
            ComponentSlot::Resolved(doc) => Some(doc),
            ComponentSlot::Unresolved(_) => None,
        }
    }

    /// Load a component and splice it into its slot.
    ///
    /// Returns `Ok(false)` without side effects when the actor has no
    /// component table or no entry called `name`. An already resolved slot
    /// is not loaded again.
    pub fn read_component(&mut self, name: &str) -> Result<bool, LoadError> {
        let Some(table) = self.components.as_mut() else {
            return Ok(false);
        };
        let Some(slot) = table.get_mut(name) else {
            return Ok(false);
        };

        let ComponentSlot::Unresolved(path) = slot else {
            return Ok(true);
        };
        let path = path.clone();

        debug!(component = name, path = %path, "reading component");
        let mut document = self.loader.load_file(&path)?;
        document.insert(SOURCE_KEY.to_string(), Value::String(path));
        *slot = ComponentSlot::Resolved(document);
        Ok(true)
    }

    /// The actor payload with the component table spliced back in.
    pub fn to_document(&self) -> Document {
        let mut document = self.param.clone();
        if let Some(table) = &self.components {
            let rendered = table
                .iter()
                .map(|(name, slot)| {
                    let value = match slot {
                        ComponentSlot::Unresolved(path) => Value::String(path.clone()),
                        ComponentSlot::Resolved(doc) => Value::Object(doc.clone()),
                    };
                    (name.clone(), value)
                })
                .collect();
            document.insert(COMPONENTS_KEY.to_string(), Value::Object(rendered));
        }
        document
    }
}

/// Empty and null entries count as absent.
fn component_slots(table: Document) -> BTreeMap<String, ComponentSlot> {
    table
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::String(path) if !path.is_empty() => Some((name, ComponentSlot::Unresolved(path))),
            Value::Object(doc) => Some((name, ComponentSlot::Resolved(doc))),
            _ => None,
        })
        .collect()
}
