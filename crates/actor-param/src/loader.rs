//! Document loading with `$parent` resolution.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::LoadError;
use crate::merge::merge_documents;
use crate::path::{CandidatePaths, PathResolver};
use crate::{Document, PARENT_KEY, WRAPPER_KEY};

/// Loads documents from the local and shared roots and flattens their
/// parent chains.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    resolver: PathResolver,
    keep_parent_refs: bool,
}

impl DocumentLoader {
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            resolver,
            keep_parent_refs: false,
        }
    }

    /// Keep the child's `$parent` string in resolved documents.
    ///
    /// The chain is still fully merged; the field only records provenance.
    pub fn with_parent_refs(mut self, keep: bool) -> Self {
        self.keep_parent_refs = keep;
        self
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Load a logical resource path.
    pub fn load_file(&self, path: &str) -> Result<Document, LoadError> {
        self.load_candidates(&self.resolver.resolve(path))
    }

    /// Load from an already-resolved candidate pair.
    ///
    /// Parents named by the document are always resolved through the
    /// configured roots.
    pub fn load_candidates(&self, candidates: &CandidatePaths) -> Result<Document, LoadError> {
        let mut chain: Vec<(PathBuf, Document)> = Vec::new();
        let mut visited = HashSet::new();
        let mut next = candidates.clone();

        loop {
            let path = locate(&next)?;
            if !visited.insert(identity(&path)) {
                let mut cycle: Vec<PathBuf> = chain.into_iter().map(|(p, _)| p).collect();
                cycle.push(path);
                return Err(LoadError::CyclicReference { chain: cycle });
            }

            let payload = read_payload(&path)?;
            let parent = payload
                .get(PARENT_KEY)
                .and_then(Value::as_str)
                .filter(|p| !p.is_empty())
                .map(str::to_string);

            debug!(path = %path.display(), parent = ?parent, "loaded document");
            chain.push((path, payload));

            match parent {
                Some(parent) => next = self.resolver.resolve(&parent),
                None => break,
            }
        }

        // Fold from the root-most ancestor down to the requested document.
        let mut layers = chain.into_iter().rev();
        let mut document = layers.next().map(|(_, root)| root).unwrap_or_default();
        for (path, layer) in layers {
            debug!(path = %path.display(), "merging over parent");
            merge_documents(&mut document, &layer);
        }

        if !self.keep_parent_refs {
            document.shift_remove(PARENT_KEY);
        }
        Ok(document)
    }
}

fn locate(candidates: &CandidatePaths) -> Result<PathBuf, LoadError> {
    candidates
        .iter()
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| LoadError::MissingResource {
            local: candidates.local.clone(),
            shared: candidates.shared.clone(),
        })
}

fn identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Read a file and unwrap its `RootNode` payload.
fn read_payload(path: &Path) -> Result<Document, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let malformed = |reason: &str| LoadError::MalformedDocument {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let Value::Object(mut wrapper) = value else {
        return Err(malformed("top level is not an object"));
    };
    match wrapper.shift_remove(WRAPPER_KEY) {
        Some(Value::Object(payload)) => Ok(payload),
        Some(_) => Err(malformed("RootNode is not an object")),
        None => Err(malformed("RootNode does not exist")),
    }
}
