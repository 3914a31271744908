//! HTTP client for the platform API.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::models::{
    DashboardStats, JobCreate, JobDetails, JobResults, JobStatus, JobSummary, Registration,
    TokenResponse, UserProfile,
};
use crate::backend::utils::config::ApiConfig;

/// Shared API client.
///
/// Clones share the underlying connection pool and the bearer token, so a
/// login performed through one clone is visible to every page.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .use_rustls_tls()
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(5))
            .user_agent(concat!("CellDashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.into());
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    /// Absolute URL for an API path, such as an output file's `download_url`.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self.token.read().ok().and_then(|t| t.clone());
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn send(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            log::debug!("API request failed with {status}");
            Err(ApiError::from_response(status.as_u16(), &body))
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        log::debug!("GET {url} {query:?}");
        let body = self.send(self.http.get(&url).query(query)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn user_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get_json("/api/users/stats", &[]).await
    }

    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        self.get_json("/api/users/me", &[]).await
    }

    /// Most recent jobs first, as ordered by the server.
    pub async fn recent_jobs(&self, limit: usize) -> Result<Vec<JobSummary>, ApiError> {
        self.list_jobs(limit, None).await
    }

    pub async fn list_jobs(
        &self,
        limit: usize,
        status: Option<&JobStatus>,
    ) -> Result<Vec<JobSummary>, ApiError> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(status) = status {
            query.push(("status", status.as_str().to_string()));
        }
        self.get_json("/api/jobs", &query).await
    }

    pub async fn job(&self, job_id: i64) -> Result<JobDetails, ApiError> {
        self.get_json(&format!("/api/jobs/{job_id}"), &[]).await
    }

    /// Queues a new analysis job.
    pub async fn create_job(&self, request: &JobCreate) -> Result<JobDetails, ApiError> {
        let url = self.url("/api/jobs/");
        log::debug!("POST {url} ({})", request.job_type);
        let body = self.send(self.http.post(&url).json(request)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Summary and output files of a completed job.
    pub async fn job_results(&self, job_id: i64) -> Result<JobResults, ApiError> {
        self.get_json(&format!("/api/jobs/{job_id}/results"), &[]).await
    }

    pub async fn cancel_job(&self, job_id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/jobs/{job_id}"));
        log::debug!("DELETE {url}");
        self.send(self.http.delete(&url)).await?;
        Ok(())
    }

    /// Exchanges credentials for an access token (OAuth2 password form).
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let url = self.url("/api/auth/login");
        log::debug!("POST {url}");
        let form = [("username", username), ("password", password)];
        let body = self.send(self.http.post(&url).form(&form)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn register(&self, registration: &Registration) -> Result<UserProfile, ApiError> {
        let url = self.url("/api/auth/register");
        log::debug!("POST {url}");
        let body = self.send(self.http.post(&url).json(registration)).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn urls_join_without_double_slashes() {
        assert_eq!(
            join_url("http://localhost:8000/", "/api/users/stats"),
            "http://localhost:8000/api/users/stats"
        );
        assert_eq!(
            join_url("https://api.example.org/v1", "api/jobs/3"),
            "https://api.example.org/v1/api/jobs/3"
        );
    }

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(client().base_url(), "http://localhost:8000");
    }

    #[test]
    fn download_paths_resolve_against_the_api() {
        assert_eq!(
            client().url("/api/jobs/7/download/umap.png"),
            "http://localhost:8000/api/jobs/7/download/umap.png"
        );
    }

    fn token_of(client: &ApiClient) -> Option<String> {
        client.token.read().unwrap().clone()
    }

    #[test]
    fn token_is_shared_between_clones() {
        let a = client();
        let b = a.clone();
        assert_eq!(token_of(&b), None);

        a.set_token("abc");
        assert_eq!(token_of(&b), Some("abc".to_string()));

        b.clear_token();
        assert_eq!(token_of(&a), None);
    }
}
