//! Generic CRUD over one REST collection
//!
//! `GET/POST {base}` and `GET/PUT/DELETE {base}/{id}`. Resource services hold
//! a `ResourceService<E>` for their entity type and add scoped routes on top.

use std::fmt::Display;
use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use quirkverse_player_ports::outbound::{ApiError, ApiRequest};
use quirkverse_protocol::ApiRoutes;

use crate::application::api::Api;

/// `skip`/`limit` query parameters for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: u32,
    pub limit: u32,
}

impl Pagination {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { skip: 0, limit: 100 }
    }
}

pub struct ResourceService<E> {
    api: Api,
    base_path: &'static str,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for ResourceService<E> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            base_path: self.base_path,
            _entity: PhantomData,
        }
    }
}

impl<E: DeserializeOwned> ResourceService<E> {
    pub fn new(api: Api, base_path: &'static str) -> Self {
        Self {
            api,
            base_path,
            _entity: PhantomData,
        }
    }

    pub fn base_path(&self) -> &'static str {
        self.base_path
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    /// List the collection. Errors are logged and returned unchanged.
    pub async fn get_all(&self, pagination: Option<Pagination>) -> Result<Vec<E>, ApiError> {
        let mut request = ApiRequest::get(self.base_path);
        if let Some(page) = pagination {
            request = request
                .with_param("skip", page.skip)
                .with_param("limit", page.limit);
        }

        self.api.send(request).await.map_err(|error| {
            tracing::error!(path = self.base_path, error = %error, "Error fetching collection");
            error
        })
    }

    pub async fn get_by_id(&self, id: impl Display) -> Result<E, ApiError> {
        self.api
            .send(ApiRequest::get(ApiRoutes::detail(self.base_path, id)))
            .await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<E, ApiError> {
        self.api
            .send(ApiRequest::post(self.base_path).with_json(data)?)
            .await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        data: &B,
    ) -> Result<E, ApiError> {
        self.api
            .send(ApiRequest::put(ApiRoutes::detail(self.base_path, id)).with_json(data)?)
            .await
    }

    pub async fn delete(&self, id: impl Display) -> Result<(), ApiError> {
        self.api
            .send_empty(ApiRequest::delete(ApiRoutes::detail(self.base_path, id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quirkverse_player_ports::outbound::{HttpMethod, MockApiPort};
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct TestEntity {
        id: String,
        name: String,
        value: i32,
    }

    fn service(port: MockApiPort) -> ResourceService<TestEntity> {
        ResourceService::new(Api::new(Arc::new(port)), "/api/test")
    }

    fn entity_json(id: &str, name: &str, value: i32) -> serde_json::Value {
        json!({ "id": id, "name": name, "value": value })
    }

    #[tokio::test]
    async fn get_all_lists_collection() {
        let mut port = MockApiPort::new();
        port.expect_fetch()
            .withf(|req| req.method == HttpMethod::Get && req.url == "/api/test" && req.params.is_empty())
            .times(1)
            .returning(|_| {
                Ok(json!([
                    entity_json("1", "Entity 1", 10),
                    entity_json("2", "Entity 2", 20)
                ]))
            });

        let entities = service(port).get_all(None).await.expect("lists");

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[1].name, "Entity 2");
    }

    #[tokio::test]
    async fn get_all_sends_pagination() {
        let mut port = MockApiPort::new();
        port.expect_fetch()
            .withf(|req| req.param("skip") == Some("10") && req.param("limit") == Some("20"))
            .times(1)
            .returning(|_| Ok(json!([])));

        let entities = service(port)
            .get_all(Some(Pagination::new(10, 20)))
            .await
            .expect("lists");

        assert!(entities.is_empty());
    }

    #[tokio::test]
    async fn get_all_returns_error_unchanged() {
        let mut port = MockApiPort::new();
        port.expect_fetch()
            .returning(|_| Err(ApiError::Network("API error".into())));

        let error = service(port).get_all(None).await.expect_err("fails");

        assert_eq!(error, ApiError::Network("API error".into()));
    }

    #[tokio::test]
    async fn get_by_id_uses_detail_route() {
        let mut port = MockApiPort::new();
        port.expect_fetch()
            .withf(|req| req.method == HttpMethod::Get && req.url == "/api/test/123")
            .times(1)
            .returning(|_| Ok(entity_json("123", "Test Entity", 42)));

        let entity = service(port).get_by_id("123").await.expect("found");

        assert_eq!(
            entity,
            TestEntity {
                id: "123".into(),
                name: "Test Entity".into(),
                value: 42
            }
        );
    }

    #[tokio::test]
    async fn create_posts_json() {
        let mut port = MockApiPort::new();
        port.expect_fetch()
            .withf(|req| {
                req.method == HttpMethod::Post
                    && req.url == "/api/test"
                    && req.json_body() == Some(&json!({ "name": "New Entity", "value": 99 }))
            })
            .times(1)
            .returning(|_| Ok(entity_json("new-id", "New Entity", 99)));

        let created = service(port)
            .create(&json!({ "name": "New Entity", "value": 99 }))
            .await
            .expect("created");

        assert_eq!(created.id, "new-id");
    }

    #[tokio::test]
    async fn update_puts_json_to_detail_route() {
        let mut port = MockApiPort::new();
        port.expect_fetch()
            .withf(|req| {
                req.method == HttpMethod::Put
                    && req.url == "/api/test/123"
                    && req.json_body() == Some(&json!({ "name": "Updated Entity" }))
            })
            .times(1)
            .returning(|_| Ok(entity_json("123", "Updated Entity", 42)));

        let updated = service(port)
            .update("123", &json!({ "name": "Updated Entity" }))
            .await
            .expect("updated");

        assert_eq!(updated.name, "Updated Entity");
    }

    #[tokio::test]
    async fn delete_ignores_empty_body() {
        let mut port = MockApiPort::new();
        port.expect_fetch()
            .withf(|req| req.method == HttpMethod::Delete && req.url == "/api/test/123")
            .times(1)
            .returning(|_| Ok(serde_json::Value::Null));

        service(port).delete("123").await.expect("deleted");
    }
}
