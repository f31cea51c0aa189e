use async_trait::async_trait;
use contracts::domain::common::{Capabilities, CrudEntity, EntityId};
use contracts::shared::api::{ListQuery, PaginatedData};
use std::marker::PhantomData;

use crate::shared::api_utils::item_path;
use crate::shared::http::{ApiClient, ApiError};

/// Backend operations a list screen drives.
///
/// `delete` and `toggle_status` are only called when `capabilities()`
/// offers them.
#[async_trait(?Send)]
pub trait CrudService {
    type Item: CrudEntity;

    fn capabilities(&self) -> Capabilities {
        <Self::Item as CrudEntity>::capabilities()
    }

    async fn list(&self, query: &ListQuery) -> Result<PaginatedData<Self::Item>, ApiError>;

    async fn get(&self, id: EntityId) -> Result<Self::Item, ApiError>;

    async fn create(&self, dto: &<Self::Item as CrudEntity>::Dto) -> Result<(), ApiError>;

    async fn update(
        &self,
        id: EntityId,
        dto: &<Self::Item as CrudEntity>::Dto,
    ) -> Result<(), ApiError>;

    async fn delete(&self, id: EntityId) -> Result<(), ApiError>;

    async fn toggle_status(&self, id: EntityId) -> Result<(), ApiError>;
}

/// REST conventions shared by every entity endpoint:
///
/// - `GET    {resource}?page=&per_page=&search=`
/// - `GET    {resource}/{id}`
/// - `POST   {resource}`
/// - `PUT    {resource}/{id}`
/// - `DELETE {resource}/{id}`
/// - `PATCH  {resource}/{id}/status`
pub struct RestService<E> {
    client: ApiClient,
    _entity: PhantomData<E>,
}

impl<E> Clone for RestService<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: CrudEntity> RestService<E> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait(?Send)]
impl<E: CrudEntity> CrudService for RestService<E> {
    type Item = E;

    async fn list(&self, query: &ListQuery) -> Result<PaginatedData<E>, ApiError> {
        self.client.get_page(E::resource(), query).await
    }

    async fn get(&self, id: EntityId) -> Result<E, ApiError> {
        self.client.get(&item_path(E::resource(), id)).await
    }

    async fn create(&self, dto: &E::Dto) -> Result<(), ApiError> {
        let _: serde_json::Value = self.client.post(E::resource(), dto).await?;
        Ok(())
    }

    async fn update(&self, id: EntityId, dto: &E::Dto) -> Result<(), ApiError> {
        let _: serde_json::Value = self.client.put(&item_path(E::resource(), id), dto).await?;
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        let _: serde_json::Value = self.client.delete(&item_path(E::resource(), id)).await?;
        Ok(())
    }

    async fn toggle_status(&self, id: EntityId) -> Result<(), ApiError> {
        let path = format!("{}/status", item_path(E::resource(), id));
        let _: serde_json::Value = self.client.patch(&path, &serde_json::json!({})).await?;
        Ok(())
    }
}
