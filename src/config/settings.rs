//! Typed view of the merged configuration.

use std::path::{Path, PathBuf};

use actor_param::{DocumentLoader, PathResolver};
use serde::{Deserialize, Serialize};

use super::effective::ConfigError;

/// Path rewriting rules applied to resource references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRules {
    pub local_folder: String,
    pub placeholder: String,
    pub extension_aliases: Vec<String>,
}

/// Settings for a drop-table extraction run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractSettings {
    pub pack_root: PathBuf,
    pub actor_dir: String,
    pub shared_root: PathBuf,
    pub paths: PathRules,
    pub actor_param_suffix: String,

    /// Glob patterns over actor names; empty selects every actor
    #[serde(default)]
    pub actors: Vec<String>,

    pub output: PathBuf,
    pub clean: bool,
    pub keep_going: bool,
}

impl ExtractSettings {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("actor_dir", self.actor_dir.as_str()),
            ("actor_param_suffix", self.actor_param_suffix.as_str()),
            ("paths.local_folder", self.paths.local_folder.as_str()),
            ("paths.placeholder", self.paths.placeholder.as_str()),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must not be empty",
                    key
                )));
            }
        }

        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "output must not be empty".to_string(),
            ));
        }

        for alias in &self.paths.extension_aliases {
            if !alias.starts_with('.') || alias.len() < 2 {
                return Err(ConfigError::ValidationError(format!(
                    "extension alias '{}' must look like '.ext'",
                    alias
                )));
            }
        }

        Ok(())
    }

    /// Directory holding one sub-directory per actor.
    pub fn actor_root(&self) -> PathBuf {
        self.pack_root.join(&self.actor_dir)
    }

    /// Parameter file of an actor, relative to that actor's work root.
    pub fn actor_param_path(&self, work_root: &Path, actor: &str) -> PathBuf {
        work_root
            .join("Actor")
            .join(format!("{}.{}.json", actor, self.actor_param_suffix))
    }

    /// Loader whose local root is an actor's work directory.
    pub fn loader_for(&self, work_root: &Path) -> DocumentLoader {
        let resolver = PathResolver::new(work_root, &self.shared_root)
            .with_placeholder(self.paths.placeholder.clone())
            .with_local_folder(self.paths.local_folder.clone())
            .with_extension_aliases(self.paths.extension_aliases.iter().cloned());
        // Unclean output keeps parent references as provenance.
        DocumentLoader::new(resolver).with_parent_refs(!self.clean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuiltinDefaults;

    fn defaults() -> ExtractSettings {
        serde_json::from_value(BuiltinDefaults::default().to_value()).unwrap()
    }

    #[test]
    fn test_defaults_deserialize() {
        let settings = defaults();
        assert_eq!(settings.actor_root(), PathBuf::from("Pack/Actor"));
        assert!(settings.actors.is_empty());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_actor_param_path() {
        let settings = defaults();
        let path = settings.actor_param_path(Path::new("Pack/Actor/Enemy_Bokoblin"), "Enemy_Bokoblin");
        assert_eq!(
            path,
            PathBuf::from("Pack/Actor/Enemy_Bokoblin/Actor/Enemy_Bokoblin.engine__actor__ActorParam.json")
        );
    }

    #[test]
    fn test_empty_suffix_rejected() {
        let mut settings = defaults();
        settings.actor_param_suffix = String::new();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("actor_param_suffix"));
    }

    #[test]
    fn test_bad_alias_rejected() {
        let mut settings = defaults();
        settings.paths.extension_aliases = vec!["gyml".to_string()];
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_loader_uses_configured_roots() {
        let settings = defaults();
        let loader = settings.loader_for(Path::new("Pack/Actor/Npc_Hylian"));
        let candidates = loader.resolver().resolve("?Item/Apple.gyml");
        assert_eq!(candidates.local, PathBuf::from("Pack/Actor/Npc_Hylian/Item/Apple.json"));
        assert_eq!(candidates.shared, PathBuf::from("Pack/ResidentCommon/Item/Apple.json"));
    }
}
