use std::sync::Arc;
use tracing::{info, warn, instrument};

use super::domain::{ItemDraft, ItemFields};
use super::repository::ItemRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

/// Application service encapsulating to-do item business rules.
///
/// Existence checks before update/delete and wrapping of storage failures live
/// here; everything else passes straight through to the repository.
///
/// The update path reads then writes without a transaction, so two concurrent
/// updates of one id can overwrite each other; the last write wins.
#[derive(Clone)]
pub struct ItemService {
    repo: Arc<dyn ItemRepository>,
}

impl ItemService {
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self { Self { repo } }

    pub async fn list_items(&self, pagination: Pagination) -> Result<Page<models::item::Model>, ServiceError> {
        let pagination = pagination.validate()?;
        self.repo.list(pagination).await
    }

    pub async fn get_item(&self, id: i32) -> Result<Option<models::item::Model>, ServiceError> { self.repo.find_by_id(id).await }

    /// Persist a new item; the store assigns the id.
    ///
    /// # Examples
    /// ```
    /// use service::item::{domain::ItemFields, repository::mock::MockItemRepository, service::ItemService};
    /// use std::sync::Arc;
    /// let svc = ItemService::new(Arc::new(MockItemRepository::default()));
    /// let created = tokio_test::block_on(svc.create_item(ItemFields { name: "todo1".into(), status: false })).unwrap();
    /// assert_eq!(created.name, "todo1");
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_item(&self, input: ItemFields) -> Result<models::item::Model, ServiceError> {
        match self.repo.save(ItemDraft::insert(input)).await {
            Ok(created) => {
                info!(item_id = created.id, status = created.status, "item_created");
                Ok(created)
            }
            Err(e) => {
                warn!(error = %e, code = e.code(), "item_create_failed");
                Err(ServiceError::ItemCreation(e.to_string()))
            }
        }
    }

    /// Replace name and status of an existing item; the id never changes.
    #[instrument(skip(self, input))]
    pub async fn update_item(&self, id: i32, input: ItemFields) -> Result<models::item::Model, ServiceError> {
        let Some(existing) = self.repo.find_by_id(id).await? else {
            return Err(ServiceError::NotFound(id));
        };
        let updated = self.repo.save(ItemDraft::replace(existing, input)).await?;
        info!(item_id = updated.id, status = updated.status, "item_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::NotFound(id));
        }
        self.repo.delete_by_id(id).await?;
        info!(item_id = id, "item_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::repository::mock::MockItemRepository;

    fn fields(name: &str, status: bool) -> ItemFields {
        ItemFields { name: name.into(), status }
    }

    fn service() -> (Arc<MockItemRepository>, ItemService) {
        let repo = Arc::new(MockItemRepository::default());
        let svc = ItemService::new(repo.clone());
        (repo, svc)
    }

    #[tokio::test]
    async fn create_assigns_fresh_id_and_keeps_fields() -> anyhow::Result<()> {
        let (_, svc) = service();
        let a = svc.create_item(fields("todo1", false)).await?;
        let b = svc.create_item(fields("todo2", true)).await?;

        assert_ne!(a.id, b.id);
        assert_eq!(b.name, "todo2");
        assert!(b.status);
        Ok(())
    }

    #[tokio::test]
    async fn get_round_trips_created_item() -> anyhow::Result<()> {
        let (_, svc) = service();
        let created = svc.create_item(fields("todo1", false)).await?;
        assert_eq!(svc.get_item(created.id).await?, Some(created));
        Ok(())
    }

    #[tokio::test]
    async fn create_wraps_storage_failure() {
        let (repo, svc) = service();
        repo.fail_writes(true);

        let err = svc.create_item(fields("todo1", false)).await.unwrap_err();
        assert_eq!(err, ServiceError::ItemCreation("simulated write failure".into()));
        assert_eq!(err.to_string(), "Failed to add item: simulated write failure");
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn create_with_blank_name_is_creation_error() {
        let (repo, svc) = service();
        let err = svc.create_item(fields("", false)).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to add item: name must not be blank");
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn update_replaces_fields_keeps_id() -> anyhow::Result<()> {
        let (_, svc) = service();
        let created = svc.create_item(fields("todo1", false)).await?;

        let updated = svc.update_item(created.id, fields("done", true)).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "done");
        assert!(updated.status);
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let (_, svc) = service();
        let err = svc.update_item(99999, fields("x", true)).await.unwrap_err();
        assert_eq!(err, ServiceError::NotFound(99999));
    }

    #[tokio::test]
    async fn update_storage_failure_propagates() -> anyhow::Result<()> {
        let (repo, svc) = service();
        let created = svc.create_item(fields("todo1", false)).await?;
        repo.fail_writes(true);

        let err = svc.update_item(created.id, fields("done", true)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_get_is_none() -> anyhow::Result<()> {
        let (_, svc) = service();
        let created = svc.create_item(fields("todo1", false)).await?;

        svc.delete_item(created.id).await?;
        assert_eq!(svc.get_item(created.id).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let (_, svc) = service();
        assert_eq!(svc.delete_item(99999).await.unwrap_err(), ServiceError::NotFound(99999));
    }

    #[tokio::test]
    async fn list_first_page_of_eleven() -> anyhow::Result<()> {
        let (_, svc) = service();
        for i in 0..11 {
            svc.create_item(fields(&format!("todo{i}"), false)).await?;
        }

        let page = svc.list_items(Pagination::new(0, 10)).await?;
        assert_eq!(page.content.len(), 10);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.total_elements, 11);
        assert!(page.first);
        Ok(())
    }

    #[tokio::test]
    async fn list_rejects_zero_page_size() {
        let (_, svc) = service();
        assert!(matches!(svc.list_items(Pagination::new(0, 0)).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn list_accepts_large_page_size() -> anyhow::Result<()> {
        let (_, svc) = service();
        for i in 0..3 {
            svc.create_item(fields(&format!("todo{i}"), false)).await?;
        }

        let page = svc.list_items(Pagination::new(0, 5000)).await?;
        assert_eq!(page.content.len(), 3);
        assert_eq!(page.size, 5000);
        assert_eq!(page.total_pages, 1);
        assert!(page.last);
        Ok(())
    }

    #[tokio::test]
    async fn list_storage_failure_propagates() {
        let (repo, svc) = service();
        repo.fail_reads(true);
        assert!(matches!(svc.list_items(Pagination::default()).await, Err(ServiceError::Storage(_))));
    }
}
