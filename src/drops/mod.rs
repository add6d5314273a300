//! Drop-table assembly
//!
//! Walks actor → `DropRef` component → drop-table list → drop tables →
//! drop-table items, producing one ordered list of tables per actor.

mod assembler;
mod table;

pub use assembler::DropTableAssembler;
pub use table::DropTable;

/// Component naming an actor's drop-table list.
pub const DROP_REF_COMPONENT: &str = "DropRef";

/// Key of the drop-table references inside the `DropRef` component.
pub const TABLE_LIST_KEY: &str = "DropTableResourceList";

/// Key of the item references inside a drop table.
pub const ELEMENT_LIST_KEY: &str = "DropTableElementResourceList";

/// Key of a drop table's name.
pub const TABLE_NAME_KEY: &str = "DropTableName";
