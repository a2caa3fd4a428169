//! Login call

use reqwest::Method;

use super::ApiClient;
use crate::{
    error::{AppError, AppResult},
    models::{Credentials, LoginResponse},
};

impl ApiClient {
    /// `POST /auth/login`
    pub async fn authenticate(&self, credentials: &Credentials) -> AppResult<LoginResponse> {
        let path = "auth/login";
        let request = self.request(Method::POST, path).json(credentials);
        let response = self.send(Method::POST, path, request).await?;

        response
            .json::<LoginResponse>()
            .await
            .map_err(|e| AppError::Decode(format!("POST /{}: {}", path, e)))
    }
}
