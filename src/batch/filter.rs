//! Actor name filtering.

use globset::{Glob, GlobSet, GlobSetBuilder};

/// Errors for actor filters
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Glob pattern error: {0}")]
    GlobError(#[from] globset::Error),
}

/// Selects actors by name. An empty filter selects everything.
#[derive(Debug, Default)]
pub struct ActorFilter {
    glob_set: Option<GlobSet>,
}

impl ActorFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, FilterError> {
        let patterns: Vec<&str> = patterns
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
            .collect();
        if patterns.is_empty() {
            return Ok(Self::default());
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern)?);
        }

        Ok(Self {
            glob_set: Some(builder.build()?),
        })
    }

    pub fn matches(&self, actor: &str) -> bool {
        match &self.glob_set {
            Some(set) => set.is_match(actor),
            None => true,
        }
    }
}
