//! Test fixtures: throwaway asset packs on disk.
//!
//! Builds a `Pack/` tree with per-actor work roots and a shared
//! `ResidentCommon` root, the layout the extractor expects.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use asset_xref::config::{BuiltinDefaults, ExtractSettings};
use serde_json::{json, Value};
use tempfile::TempDir;

pub const PARAM_SUFFIX: &str = "engine__actor__ActorParam";

/// An asset pack rooted in a temporary directory
pub struct PackFixture {
    dir: TempDir,
}

impl PackFixture {
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().unwrap(),
        };
        fs::create_dir_all(fixture.actor_root()).unwrap();
        fs::create_dir_all(fixture.shared_root()).unwrap();
        fixture
    }

    pub fn pack_root(&self) -> PathBuf {
        self.dir.path().join("Pack")
    }

    pub fn actor_root(&self) -> PathBuf {
        self.pack_root().join("Actor")
    }

    pub fn shared_root(&self) -> PathBuf {
        self.pack_root().join("ResidentCommon")
    }

    pub fn work_root(&self, actor: &str) -> PathBuf {
        self.actor_root().join(actor)
    }

    /// Default settings pointed at this pack
    pub fn settings(&self) -> ExtractSettings {
        let mut settings: ExtractSettings =
            serde_json::from_value(BuiltinDefaults::default().to_value()).unwrap();
        settings.pack_root = self.pack_root();
        settings.shared_root = self.shared_root();
        settings.output = self.dir.path().join("drop_tables.json");
        settings
    }

    /// Write a document wrapped in `RootNode`.
    pub fn write_doc(&self, root: &Path, rel: &str, payload: Value) {
        write_json(&root.join(rel), &json!({ "RootNode": payload }));
    }

    pub fn write_raw(&self, root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// Create an actor directory with a parameter file.
    pub fn actor(&self, name: &str, payload: Value) {
        let rel = format!("Actor/{}.{}.json", name, PARAM_SUFFIX);
        self.write_doc(&self.work_root(name), &rel, payload);
    }

    /// Create an actor directory with no parameter file.
    pub fn bare_actor(&self, name: &str) {
        fs::create_dir_all(self.work_root(name)).unwrap();
    }

    /// Write an actor whose DropRef points at one list, one table and the
    /// given item names, everything stored in the actor's own work root.
    pub fn simple_drop_actor(&self, name: &str, items: &[&str]) {
        let work = self.work_root(name);
        self.actor(
            name,
            json!({
                "Category": "Enemy",
                "Components": {
                    "DropRef": format!("Work/Component/DropParam/{}.game__component__DropParam.gyml", name)
                }
            }),
        );
        self.write_doc(
            &work,
            &format!("Component/DropParam/{}.game__component__DropParam.json", name),
            json!({
                "DropTableResourceList": [
                    format!("Work/DropTable/{}.game__ecosystem__DropTable.gyml", name)
                ]
            }),
        );

        let element_refs: Vec<String> = items
            .iter()
            .map(|item| format!("Work/DropTable/Element/{}.game__ecosystem__DropTableElement.gyml", item))
            .collect();
        self.write_doc(
            &work,
            &format!("DropTable/{}.game__ecosystem__DropTable.json", name),
            json!({
                "DropTableName": "Normal",
                "RepeatNumMin": 1,
                "RepeatNumMax": 1,
                "DropTableElementResourceList": element_refs
            }),
        );
        for item in items {
            self.write_doc(
                &work,
                &format!("DropTable/Element/{}.game__ecosystem__DropTableElement.json", item),
                json!({"DropActorName": item, "DropProbability": 50.0}),
            );
        }
    }
}

pub fn write_json(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}
