//! Shopping list

use std::sync::Arc;

use super::Repository;
use crate::api::{ApiClient, Method, ReqwestTransport, Transport, settle, settle_ok};
use crate::models::ShoppingListItem;

/// Access to `api/shopping-list`
pub struct ShoppingRepository<T = ReqwestTransport> {
    api: Arc<ApiClient<T>>,
}

impl<T: Transport> ShoppingRepository<T> {
    /// Create a repository over a shared client
    pub const fn new(api: Arc<ApiClient<T>>) -> Self {
        Self { api }
    }

    /// Delete several items in one request
    pub async fn bulk_delete(&self, ids: &[i64]) -> bool {
        settle_ok(
            "bulk delete shopping items",
            self.api
                .authorized(Method::Delete, "api/shopping-list/bulk")
                .json(ids)
                .execute()
                .await,
        )
    }
}

impl<T: Transport> Repository for ShoppingRepository<T> {
    type Item = ShoppingListItem;
    type Id = i64;
    type Draft = ShoppingListItem;

    async fn list(&self) -> Option<Vec<ShoppingListItem>> {
        settle(
            "load shopping list",
            self.api.authorized(Method::Get, "api/shopping-list").fetch().await,
        )
    }

    /// There is no single-item endpoint; the item is looked up in the list
    async fn get_by_id(&self, id: i64) -> Option<ShoppingListItem> {
        self.list()
            .await?
            .into_iter()
            .find(|item| item.id == Some(id))
    }

    async fn create(&self, draft: &ShoppingListItem) -> Option<ShoppingListItem> {
        settle(
            "add shopping item",
            self.api
                .authorized(Method::Post, "api/shopping-list")
                .json(draft)
                .fetch()
                .await,
        )
    }

    async fn update(&self, id: i64, draft: &ShoppingListItem) -> Option<ShoppingListItem> {
        settle(
            "update shopping item",
            self.api
                .authorized(Method::Put, &format!("api/shopping-list/{id}"))
                .json(draft)
                .fetch()
                .await,
        )
    }

    async fn delete(&self, id: i64) -> bool {
        settle_ok(
            "delete shopping item",
            self.api
                .authorized(Method::Delete, &format!("api/shopping-list/{id}"))
                .execute()
                .await,
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::repos::fixtures;

    #[tokio::test]
    async fn test_bulk_delete_is_one_request() {
        let api = fixtures::logged_in();
        api.transport()
            .respond(Method::Delete, "/api/shopping-list/bulk", 200, "");

        assert!(ShoppingRepository::new(api.clone()).bulk_delete(&[1, 2, 3]).await);

        let requests = api.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path(), "/api/shopping-list/bulk");
        let ids: Vec<i64> = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_bulk_delete_non_2xx_is_false() {
        let api = fixtures::logged_in();
        api.transport()
            .respond(Method::Delete, "/api/shopping-list/bulk", 400, "");

        assert!(!ShoppingRepository::new(api).bulk_delete(&[1]).await);
    }

    #[tokio::test]
    async fn test_logged_out_calls_send_nothing() {
        let api = fixtures::logged_out();
        let repo = ShoppingRepository::new(api.clone());
        let item = ShoppingListItem::new("Milk", "Dairy", 1);

        assert!(repo.list().await.is_none());
        assert!(repo.get_by_id(1).await.is_none());
        assert!(repo.create(&item).await.is_none());
        assert!(repo.update(1, &item).await.is_none());
        assert!(!repo.delete(1).await);
        assert!(!repo.bulk_delete(&[1, 2]).await);
        assert_eq!(api.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let api = fixtures::logged_in();
        api.transport().respond_json(
            Method::Post,
            "/api/shopping-list",
            201,
            &json!({"id": 5, "name": "Milk", "category": "Dairy", "count": 2}),
        );
        api.transport().respond_json(
            Method::Get,
            "/api/shopping-list",
            200,
            &json!([{"id": 5, "name": "Milk", "category": "Dairy"}]),
        );

        let repo = ShoppingRepository::new(api);
        let created = repo
            .create(&ShoppingListItem::new("Milk", "Dairy", 2))
            .await
            .unwrap();
        assert_eq!(created.id, Some(5));

        let found = repo.get_by_id(5).await.unwrap();
        assert_eq!(found.count, 1);
        assert!(repo.get_by_id(6).await.is_none());
    }
}
