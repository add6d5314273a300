//! Errors raised while loading documents.

use std::path::PathBuf;

/// Failure to produce a resolved document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Neither the local nor the shared candidate exists.
    #[error("resource not found (tried {local:?} and {shared:?})")]
    MissingResource { local: PathBuf, shared: PathBuf },

    /// The file parsed but does not have the expected shape.
    #[error("malformed document {path:?}: {reason}")]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("invalid JSON in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `$parent` chain revisits a file it already loaded.
    #[error("cyclic parent reference: {}", format_chain(.chain))]
    CyclicReference { chain: Vec<PathBuf> },
}

impl LoadError {
    /// True for errors caused by absent or circular data rather than by
    /// unreadable or malformed files.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            LoadError::MissingResource { .. } | LoadError::CyclicReference { .. }
        )
    }
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
