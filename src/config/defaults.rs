//! Built-in defaults (layer 1)
//!
//! Hardcoded defaults matching the layout of an unpacked asset pack.

use serde::{Deserialize, Serialize};

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Root of the unpacked asset pack (default: "Pack")
    pub pack_root: String,

    /// Directory under the pack root holding one directory per actor (default: "Actor")
    pub actor_dir: String,

    /// Shared fallback root (default: "Pack/ResidentCommon")
    pub shared_root: String,

    /// Folder name in resource paths that stands for the local root (default: "Work/")
    pub local_folder: String,

    /// Marker prefix meaning "relative to the configured root" (default: "?")
    pub placeholder: String,

    /// Type suffix of actor parameter files (default: "engine__actor__ActorParam")
    pub actor_param_suffix: String,

    /// Extensions rewritten to `.json` (default: [".bgyml", ".gyml"])
    pub extension_aliases: Vec<String>,

    /// Output file (default: "drop_tables.json")
    pub output: String,

    /// Strip bookkeeping fields from the output (default: true)
    pub clean: bool,

    /// Skip actors with malformed documents instead of failing (default: false)
    pub keep_going: bool,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            pack_root: "Pack".to_string(),
            actor_dir: "Actor".to_string(),
            shared_root: "Pack/ResidentCommon".to_string(),
            local_folder: "Work/".to_string(),
            placeholder: "?".to_string(),
            actor_param_suffix: "engine__actor__ActorParam".to_string(),
            extension_aliases: vec![".bgyml".to_string(), ".gyml".to_string()],
            output: "drop_tables.json".to_string(),
            clean: true,
            keep_going: false,
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "pack_root": self.pack_root,
            "actor_dir": self.actor_dir,
            "shared_root": self.shared_root,
            "paths": {
                "local_folder": self.local_folder,
                "placeholder": self.placeholder,
                "extension_aliases": self.extension_aliases,
            },
            "actor_param_suffix": self.actor_param_suffix,
            "actors": [],
            "output": self.output,
            "clean": self.clean,
            "keep_going": self.keep_going,
        })
    }
}
