use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, TryIntoModel};

use models::item::{self, Entity as ItemEntity};

use super::domain::ItemDraft;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

/// Storage contract for items.
///
/// Pages are ordered by id ascending. A missing row is `None`/`false`, never an
/// error; errors are reserved for the store itself failing.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn list(&self, pagination: Pagination) -> Result<Page<item::Model>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<item::Model>, ServiceError>;
    /// Insert when `draft.id` is `None`, otherwise overwrite that row.
    async fn save(&self, draft: ItemDraft) -> Result<item::Model, ServiceError>;
    async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError>;
    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmItemRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmItemRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ItemRepository for SeaOrmItemRepository {
    async fn list(&self, pagination: Pagination) -> Result<Page<item::Model>, ServiceError> {
        let paginator = ItemEntity::find()
            .order_by_asc(item::Column::Id)
            .paginate(&self.db, pagination.size);
        let total = paginator.num_items().await.map_err(|e| ServiceError::storage(&e))?;

        // past the end: skip the query (and the offset arithmetic)
        let in_range = pagination
            .page
            .checked_mul(pagination.size)
            .is_some_and(|offset| offset < total);
        let rows = if in_range {
            paginator.fetch_page(pagination.page).await.map_err(|e| ServiceError::storage(&e))?
        } else {
            Vec::new()
        };
        Ok(Page::new(rows, pagination, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<item::Model>, ServiceError> {
        ItemEntity::find_by_id(id).one(&self.db).await.map_err(|e| ServiceError::storage(&e))
    }

    async fn save(&self, draft: ItemDraft) -> Result<item::Model, ServiceError> {
        let am = match draft.id {
            None => item::new_active(&draft.name, draft.status),
            Some(id) => item::replace_active(id, &draft.name, draft.status),
        };
        let saved = am.save(&self.db).await.map_err(|e| ServiceError::storage(&e))?;
        saved.try_into_model().map_err(|e| ServiceError::storage(&e))
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let n = ItemEntity::find_by_id(id).count(&self.db).await.map_err(|e| ServiceError::storage(&e))?;
        Ok(n > 0)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        ItemEntity::delete_by_id(id).exec(&self.db).await.map_err(|e| ServiceError::storage(&e))?;
        Ok(())
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Rows {
        next_id: i32,
        by_id: BTreeMap<i32, item::Model>,
    }

    #[derive(Default)]
    pub struct MockItemRepository {
        rows: Mutex<Rows>,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
    }

    impl MockItemRepository {
        /// Make every read (`list`, `find_by_id`, `exists_by_id`) fail.
        pub fn fail_reads(&self, on: bool) { self.fail_reads.store(on, Ordering::SeqCst); }

        /// Make every write (`save`, `delete_by_id`) fail.
        pub fn fail_writes(&self, on: bool) { self.fail_writes.store(on, Ordering::SeqCst); }

        pub fn len(&self) -> usize {
            self.rows.lock().map(|r| r.by_id.len()).unwrap_or_default()
        }

        pub fn is_empty(&self) -> bool { self.len() == 0 }

        fn rows(&self) -> Result<std::sync::MutexGuard<'_, Rows>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Storage("mock repository poisoned".into()))
        }

        fn check(&self, flag: &AtomicBool, what: &str) -> Result<(), ServiceError> {
            if flag.load(Ordering::SeqCst) {
                return Err(ServiceError::Storage(format!("simulated {what} failure")));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ItemRepository for MockItemRepository {
        async fn list(&self, pagination: Pagination) -> Result<Page<item::Model>, ServiceError> {
            self.check(&self.fail_reads, "read")?;
            let rows = self.rows()?;
            let skip = pagination.page.saturating_mul(pagination.size);
            let content = rows
                .by_id
                .values()
                .skip(usize::try_from(skip).unwrap_or(usize::MAX))
                .take(usize::try_from(pagination.size).unwrap_or(usize::MAX))
                .cloned()
                .collect();
            Ok(Page::new(content, pagination, rows.by_id.len() as u64))
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<item::Model>, ServiceError> {
            self.check(&self.fail_reads, "read")?;
            Ok(self.rows()?.by_id.get(&id).cloned())
        }

        async fn save(&self, draft: ItemDraft) -> Result<item::Model, ServiceError> {
            self.check(&self.fail_writes, "write")?;
            // same constraint the entity enforces
            if item::is_blank(&draft.name) {
                return Err(ServiceError::Storage(item::BLANK_NAME.into()));
            }
            let mut rows = self.rows()?;
            let id = match draft.id {
                Some(id) if rows.by_id.contains_key(&id) => id,
                Some(id) => return Err(ServiceError::Storage(format!("no row with id {id} to update"))),
                None => {
                    rows.next_id += 1;
                    rows.next_id
                }
            };
            let model = item::Model { id, name: draft.name, status: draft.status };
            rows.by_id.insert(id, model.clone());
            Ok(model)
        }

        async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError> {
            self.check(&self.fail_reads, "read")?;
            Ok(self.rows()?.by_id.contains_key(&id))
        }

        async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
            self.check(&self.fail_writes, "write")?;
            self.rows()?.by_id.remove(&id);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::db::connect_in_memory;

    async fn repo() -> anyhow::Result<SeaOrmItemRepository> {
        Ok(SeaOrmItemRepository::new(connect_in_memory().await?))
    }

    fn draft(name: &str, status: bool) -> ItemDraft {
        ItemDraft { id: None, name: name.into(), status }
    }

    #[tokio::test]
    async fn save_inserts_then_overwrites() -> anyhow::Result<()> {
        let repo = repo().await?;

        let created = repo.save(draft("todo1", false)).await?;
        assert_eq!(created.name, "todo1");

        let updated = repo
            .save(ItemDraft { id: Some(created.id), name: "done".into(), status: true })
            .await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(repo.find_by_id(created.id).await?, Some(updated));
        Ok(())
    }

    #[tokio::test]
    async fn save_surfaces_blank_name_as_storage_error() -> anyhow::Result<()> {
        let repo = repo().await?;

        let err = repo.save(draft(" ", true)).await.unwrap_err();
        assert_eq!(err, ServiceError::Storage(item::BLANK_NAME.into()));
        assert!(!repo.exists_by_id(1).await?);
        Ok(())
    }

    #[tokio::test]
    async fn missing_rows_are_none_not_errors() -> anyhow::Result<()> {
        let repo = repo().await?;

        assert_eq!(repo.find_by_id(99999).await?, None);
        assert!(!repo.exists_by_id(99999).await?);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_row() -> anyhow::Result<()> {
        let repo = repo().await?;
        let created = repo.save(draft("gone soon", false)).await?;

        assert!(repo.exists_by_id(created.id).await?);
        repo.delete_by_id(created.id).await?;
        assert!(!repo.exists_by_id(created.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn list_pages_in_insertion_order() -> anyhow::Result<()> {
        let repo = repo().await?;
        for i in 0..11 {
            repo.save(draft(&format!("todo{i}"), false)).await?;
        }

        let first = repo.list(Pagination::new(0, 10)).await?;
        assert_eq!(first.content.len(), 10);
        assert_eq!(first.total_elements, 11);
        assert_eq!(first.total_pages, 2);
        assert!(first.first);
        assert!(!first.last);
        assert_eq!(first.content[0].name, "todo0");

        let second = repo.list(Pagination::new(1, 10)).await?;
        assert_eq!(second.content.len(), 1);
        assert_eq!(second.content[0].name, "todo10");
        assert!(second.last);

        let beyond = repo.list(Pagination::new(u64::MAX, 10)).await?;
        assert!(beyond.empty);
        assert_eq!(beyond.total_elements, 11);
        Ok(())
    }

    #[tokio::test]
    async fn mock_assigns_fresh_ids_and_pages() -> anyhow::Result<()> {
        let repo = mock::MockItemRepository::default();
        let a = repo.save(draft("a", false)).await?;
        let b = repo.save(draft("b", true)).await?;
        assert_ne!(a.id, b.id);

        let page = repo.list(Pagination::new(1, 1)).await?;
        assert_eq!(page.content, vec![b]);
        assert_eq!(page.total_pages, 2);
        Ok(())
    }

    #[tokio::test]
    async fn mock_update_of_missing_row_fails() {
        let repo = mock::MockItemRepository::default();
        let res = repo.save(ItemDraft { id: Some(5), name: "x".into(), status: false }).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))));
        assert!(repo.is_empty());
    }
}
