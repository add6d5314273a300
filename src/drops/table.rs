//! Assembled drop tables.

use actor_param::{Document, PARENT_KEY};
use serde::Serialize;
use serde_json::Value;

use super::{ELEMENT_LIST_KEY, TABLE_NAME_KEY};

/// One drop table with its items materialized.
///
/// Serializes as `DropTableName`, then the table's own fields in document
/// order, then `items`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropTable {
    /// Stored name, passed through as-is. Absent names become `""`.
    #[serde(rename = "DropTableName")]
    pub name: Value,

    #[serde(flatten)]
    pub fields: Document,

    pub items: Vec<Document>,
}

impl DropTable {
    /// Build from a resolved table document and its loaded items.
    pub fn new(mut fields: Document, items: Vec<Document>) -> Self {
        let name = fields
            .shift_remove(TABLE_NAME_KEY)
            .unwrap_or_else(|| Value::String(String::new()));
        // Materialized items supersede any stored field of the same name.
        fields.shift_remove("items");

        Self {
            name,
            fields,
            items,
        }
    }

    /// Strip resolution artifacts: the item reference list and any parent
    /// references on the table and its items.
    pub fn clean(&mut self) {
        self.fields.shift_remove(ELEMENT_LIST_KEY);
        self.fields.shift_remove(PARENT_KEY);
        for item in &mut self.items {
            item.shift_remove(PARENT_KEY);
        }
    }
}
