//! Generic CRUD calls over [`Resource`] collections

use reqwest::Method;

use super::ApiClient;
use crate::{error::AppResult, models::Resource};

impl ApiClient {
    /// `GET /{collection}`
    pub async fn list<R: Resource>(&self) -> AppResult<Vec<R>> {
        self.fetch_json(R::COLLECTION).await
    }

    /// `GET /{collection}/{id}`
    pub async fn get<R: Resource>(&self, id: i64) -> AppResult<R> {
        self.fetch_json(&format!("{}/{}", R::COLLECTION, id)).await
    }

    /// `POST /{collection}`. Calling twice creates two records.
    pub async fn create<R: Resource>(&self, payload: &R::Payload) -> AppResult<()> {
        let path = R::COLLECTION;
        let request = self.request(Method::POST, path).json(payload);
        self.send(Method::POST, path, request).await?;
        tracing::info!("Created record in {}", path);
        Ok(())
    }

    /// `PUT /{collection}/{id}`
    pub async fn update<R: Resource>(&self, id: i64, payload: &R::Payload) -> AppResult<()> {
        let path = format!("{}/{}", R::COLLECTION, id);
        let request = self.request(Method::PUT, &path).json(payload);
        self.send(Method::PUT, &path, request).await?;
        tracing::info!("Updated {}", path);
        Ok(())
    }

    /// `DELETE /{collection}/{id}`
    pub async fn delete<R: Resource>(&self, id: i64) -> AppResult<()> {
        let path = format!("{}/{}", R::COLLECTION, id);
        let request = self.request(Method::DELETE, &path);
        self.send(Method::DELETE, &path, request).await?;
        tracing::info!("Deleted {}", path);
        Ok(())
    }
}
