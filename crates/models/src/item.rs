use sea_orm::{entity::prelude::*, ActiveValue, Set};
use serde::{Deserialize, Serialize};

/// Message carried by the storage error when a blank name reaches the table.
pub const BLANK_NAME: &str = "name must not be blank";

/// A to-do entry. `id` goes over the wire as `itemId`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(rename = "itemId")]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    pub status: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self { status: Set(false), ..ActiveModelTrait::default() }
    }

    /// Rejects blank names on every insert and update, whoever the caller is.
    async fn before_save<C>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let ActiveValue::Set(name) | ActiveValue::Unchanged(name) = &self.name {
            if is_blank(name) {
                return Err(DbErr::Custom(BLANK_NAME.to_string()));
            }
        }
        Ok(self)
    }
}

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Active model for an insert: id left `NotSet` so the table assigns it.
pub fn new_active(name: &str, status: bool) -> ActiveModel {
    ActiveModel {
        name: Set(name.to_string()),
        status: Set(status),
        ..<ActiveModel as ActiveModelBehavior>::new()
    }
}

/// Active model overwriting every column of the row `id`.
pub fn replace_active(id: i32, name: &str, status: bool) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::Unchanged(id),
        name: Set(name.to_string()),
        status: Set(status),
    }
}

/// Human-readable message for a storage error, without sea-orm's wrapper prefix
/// on errors raised by [`ActiveModelBehavior::before_save`].
pub fn db_err_message(e: &DbErr) -> String {
    match e {
        DbErr::Custom(msg) => msg.clone(),
        other => other.to_string(),
    }
}
