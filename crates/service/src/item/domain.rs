use serde::{Deserialize, Serialize};

/// Validated name/status pair handed from the HTTP layer to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFields {
    pub name: String,
    pub status: bool,
}

/// An item about to be saved. `id: None` inserts, `Some(id)` overwrites that row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub id: Option<i32>,
    pub name: String,
    pub status: bool,
}

impl ItemDraft {
    pub fn insert(fields: ItemFields) -> Self {
        Self { id: None, name: fields.name, status: fields.status }
    }

    pub fn replace(existing: models::item::Model, fields: ItemFields) -> Self {
        Self { id: Some(existing.id), name: fields.name, status: fields.status }
    }
}
