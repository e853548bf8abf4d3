pub mod item;
pub mod quiz;

pub use item::{Item, Statement};
pub use quiz::{Person, Quiz, Section};

use serde_json::Value;

/// JSON Schema describing a full quiz snapshot as delivered by the authoring backend.
pub fn snapshot_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(Quiz)).unwrap_or(Value::Null)
}
