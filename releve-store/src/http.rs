//! S3-compatible HTTP store backend (path-style `{endpoint}/{bucket}/{key}`).
//! This is the `prod` deployment backend.
//!
//! Works against anything speaking plain GET/HEAD/PUT object semantics
//! (MinIO, an S3 gateway). Request signing is out of scope; auth is an
//! optional bearer token.

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};

use crate::object_store::{ObjectStore, StoreError};

pub struct HttpStore {
    endpoint: String,
    token: Option<String>,
    client: Client,
}

impl HttpStore {
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token,
            client: Client::new(),
        }
    }

    fn url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, bucket, key)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn status_error(status: StatusCode, bucket: &str, key: &str) -> StoreError {
        match status {
            StatusCode::NOT_FOUND => StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthorized {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            other => StoreError::Transport(format!("{bucket}/{key}: HTTP {other}")),
        }
    }

    fn transport(err: reqwest::Error) -> StoreError {
        StoreError::Transport(err.to_string())
    }
}

impl ObjectStore for HttpStore {
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let response = self
            .authed(self.client.get(self.url(bucket, key)))
            .send()
            .map_err(Self::transport)?;
        if !response.status().is_success() {
            return Err(Self::status_error(response.status(), bucket, key));
        }
        Ok(response.bytes().map_err(Self::transport)?.to_vec())
    }

    fn head(&self, bucket: &str, key: &str) -> Result<bool, StoreError> {
        let response = self
            .authed(self.client.head(self.url(bucket, key)))
            .send()
            .map_err(Self::transport)?;
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(Self::status_error(status, bucket, key)),
        }
    }

    fn put(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let response = self
            .authed(self.client.put(self.url(bucket, key)))
            .header(reqwest::header::CONTENT_TYPE, "text/csv")
            .body(bytes.to_vec())
            .send()
            .map_err(Self::transport)?;
        if !response.status().is_success() {
            return Err(Self::status_error(response.status(), bucket, key));
        }
        Ok(())
    }
}
