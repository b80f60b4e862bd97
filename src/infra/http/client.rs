use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use penpost_api_types::{BLOG_API_BASE, PostCreatedResponse, PostResponse, PostWriteRequest};
use reqwest::{Client, Method, StatusCode, Url, header::AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::application::ports::{ApiError, BlogApi, CredentialProvider};
use crate::domain::posts::{Post, PostFields, PostId};
use crate::infra::error::InfraError;

/// `reqwest` implementation of the blog backend contract.
#[derive(Clone)]
pub struct HttpBlogApi {
    client: Client,
    base: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpBlogApi {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, InfraError> {
        let base = Url::parse(base_url)
            .map_err(|err| InfraError::http_client(format!("invalid base url: {err}")))?;
        if base.cannot_be_a_base() {
            return Err(InfraError::http_client(format!(
                "base url `{base_url}` cannot carry a path"
            )));
        }
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;
        Ok(Self {
            client,
            base,
            credentials,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("penpost/", env!("CARGO_PKG_VERSION"))
    }

    /// `{base}/api/v1/blog/{segments...}` with each segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.set_query(None);
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ApiError::transport("base url cannot carry a path"))?;
            path.pop_if_empty();
            path.extend(BLOG_API_BASE.split('/'));
            path.extend(segments);
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<PostWriteRequest>,
    ) -> Result<Vec<u8>, ApiError> {
        let mut req = self.client.request(method, url);
        // The backend expects the raw token, without an auth scheme.
        if let Some(token) = self.credentials.token() {
            req = req.header(AUTHORIZATION, token);
        }
        if let Some(b) = body {
            req = req.json(&b);
        }

        let resp = req.send().await.map_err(ApiError::transport)?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(ApiError::transport)?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            return Err(classify(status, text));
        }
        debug!(%status, "backend request succeeded");
        Ok(bytes.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<PostWriteRequest>,
    ) -> Result<T, ApiError> {
        let bytes = self.send(method, url, body).await?;
        serde_json::from_slice(&bytes).map_err(ApiError::decode)
    }
}

fn classify(status: StatusCode, body: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized {
            status: status.as_u16(),
        },
        StatusCode::NOT_FOUND => ApiError::NotFound,
        _ => ApiError::Server {
            status: status.as_u16(),
            body,
        },
    }
}

#[async_trait]
impl BlogApi for HttpBlogApi {
    #[instrument(level = "debug", skip(self), fields(post_id = %id))]
    async fn fetch_post(&self, id: &PostId) -> Result<Post, ApiError> {
        let url = self.endpoint(&[id.as_str()])?;
        let response: PostResponse = self.send_json(Method::GET, url, None).await?;
        Ok(Post::from_response(id.clone(), response))
    }

    #[instrument(level = "debug", skip_all)]
    async fn create_post(&self, fields: &PostFields) -> Result<PostId, ApiError> {
        let url = self.endpoint(&["create"])?;
        let response: PostCreatedResponse = self
            .send_json(Method::POST, url, Some(fields.into()))
            .await?;
        PostId::new(response.id).map_err(ApiError::decode)
    }

    #[instrument(level = "debug", skip_all, fields(post_id = %id))]
    async fn update_post(&self, id: &PostId, fields: &PostFields) -> Result<(), ApiError> {
        let url = self.endpoint(&["update", id.as_str()])?;
        self.send(Method::PUT, url, Some(fields.into())).await?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self), fields(post_id = %id))]
    async fn delete_post(&self, id: &PostId) -> Result<(), ApiError> {
        let url = self.endpoint(&["delete", id.as_str()])?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }
}
