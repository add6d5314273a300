//! Resource path resolution.
//!
//! A resource reference inside a document is a logical string such as
//! `Work/DropTable/Foo.game__ecosystem__DropTableList.gyml` or
//! `?DropTable/Foo.game__ecosystem__DropTable.json`. It resolves to one
//! candidate under the local root and one under the shared root.

use std::path::{Path, PathBuf};

use crate::CANONICAL_EXTENSION;

const DEFAULT_PLACEHOLDER: &str = "?";
const DEFAULT_LOCAL_FOLDER: &str = "Work/";
const DEFAULT_ALIASES: &[&str] = &[".bgyml", ".gyml"];

/// The two physical locations a resource may live at, in lookup order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePaths {
    pub local: PathBuf,
    /// Empty means "no fallback".
    pub shared: PathBuf,
}

impl CandidatePaths {
    /// A single exact path with no shared fallback.
    pub fn exact(path: impl Into<PathBuf>) -> Self {
        Self {
            local: path.into(),
            shared: PathBuf::new(),
        }
    }

    /// Candidates in lookup order, skipping an empty fallback.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.local.as_path())
            .chain(std::iter::once(self.shared.as_path()))
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// Maps logical resource paths onto the local and shared roots.
#[derive(Debug, Clone)]
pub struct PathResolver {
    local_root: String,
    shared_root: String,
    placeholder: String,
    local_folder: String,
    extension_aliases: Vec<String>,
}

impl PathResolver {
    pub fn new(local_root: impl AsRef<Path>, shared_root: impl AsRef<Path>) -> Self {
        Self {
            local_root: root_prefix(local_root.as_ref()),
            shared_root: root_prefix(shared_root.as_ref()),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            local_folder: DEFAULT_LOCAL_FOLDER.to_string(),
            extension_aliases: DEFAULT_ALIASES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Override the marker that means "relative to the configured root".
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Override the folder name substituted by the roots (e.g. `Work/`).
    pub fn with_local_folder(mut self, folder: impl Into<String>) -> Self {
        let mut folder = folder.into();
        if !folder.ends_with('/') {
            folder.push('/');
        }
        self.local_folder = folder;
        self
    }

    /// Replace the extensions rewritten to `.json`.
    pub fn with_extension_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extension_aliases = aliases.into_iter().map(Into::into).collect();
        // ".bgyml" must be tried before ".gyml"
        self.extension_aliases
            .sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        self
    }

    /// Resolve a logical path into its two candidates. Pure string work.
    pub fn resolve(&self, path: &str) -> CandidatePaths {
        let path = self.normalize_extension(path);

        let (local, shared) = if let Some(rest) = path.strip_prefix(self.placeholder.as_str()) {
            (
                format!("{}{}", self.local_root, rest),
                format!("{}{}", self.shared_root, rest),
            )
        } else if path.contains(self.local_folder.as_str()) {
            (
                path.replacen(self.local_folder.as_str(), &self.local_root, 1),
                path.replacen(self.local_folder.as_str(), &self.shared_root, 1),
            )
        } else {
            (path.clone(), path)
        };

        CandidatePaths {
            local: PathBuf::from(local),
            shared: PathBuf::from(shared),
        }
    }

    fn normalize_extension(&self, path: &str) -> String {
        for alias in &self.extension_aliases {
            if let Some(stem) = path.strip_suffix(alias.as_str()) {
                return format!("{}{}", stem, CANONICAL_EXTENSION);
            }
        }
        path.to_string()
    }
}

fn root_prefix(root: &Path) -> String {
    let mut prefix = root.to_string_lossy().to_string();
    if !prefix.is_empty() && !prefix.ends_with('/') {
        prefix.push('/');
    }
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> PathResolver {
        PathResolver::new("Pack/Actor/Enemy_Bokoblin", "Pack/ResidentCommon")
    }

    #[test]
    fn test_placeholder_maps_to_both_roots() {
        let c = resolver().resolve("?DropTable/Bokoblin.game__ecosystem__DropTable.json");
        assert_eq!(
            c.local,
            PathBuf::from("Pack/Actor/Enemy_Bokoblin/DropTable/Bokoblin.game__ecosystem__DropTable.json")
        );
        assert_eq!(
            c.shared,
            PathBuf::from("Pack/ResidentCommon/DropTable/Bokoblin.game__ecosystem__DropTable.json")
        );
    }

    #[test]
    fn test_work_folder_substituted() {
        let c = resolver().resolve("Work/Component/DropParam/Bokoblin.game__component__DropParam.gyml");
        assert_eq!(
            c.local,
            PathBuf::from(
                "Pack/Actor/Enemy_Bokoblin/Component/DropParam/Bokoblin.game__component__DropParam.json"
            )
        );
        assert_eq!(
            c.shared,
            PathBuf::from("Pack/ResidentCommon/Component/DropParam/Bokoblin.game__component__DropParam.json")
        );
    }

    #[test]
    fn test_binary_alias_normalized() {
        let c = resolver().resolve("Work/Actor/Foo.engine__actor__ActorParam.bgyml");
        assert!(c.local.to_string_lossy().ends_with("Foo.engine__actor__ActorParam.json"));
        assert!(c.shared.to_string_lossy().ends_with("Foo.engine__actor__ActorParam.json"));
    }

    #[test]
    fn test_plain_path_used_verbatim() {
        let c = resolver().resolve("elsewhere/file.json");
        assert_eq!(c.local, PathBuf::from("elsewhere/file.json"));
        assert_eq!(c.shared, PathBuf::from("elsewhere/file.json"));
    }

    #[test]
    fn test_custom_markers() {
        let r = resolver()
            .with_placeholder("@")
            .with_local_folder("Data")
            .with_extension_aliases([".yml"]);
        let c = r.resolve("@Item/Apple.yml");
        assert_eq!(c.local, PathBuf::from("Pack/Actor/Enemy_Bokoblin/Item/Apple.json"));

        let c = r.resolve("Data/Item/Apple.json");
        assert_eq!(c.shared, PathBuf::from("Pack/ResidentCommon/Item/Apple.json"));
    }

    #[test]
    fn test_exact_candidates_skip_empty_fallback() {
        let c = CandidatePaths::exact("a/b.json");
        let all: Vec<_> = c.iter().collect();
        assert_eq!(all, vec![Path::new("a/b.json")]);
    }
}
