//! Cloudflare Pages API client
//!
//! Read-only checks against the Cloudflare API: token validity and
//! project existence. Uploads are left to wrangler.

use crate::error::{CloudflareError, Result};
use serde::Deserialize;

const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Cloudflare error code for an unknown Pages project
const PROJECT_NOT_FOUND_CODE: i32 = 8000007;

pub struct PagesApi {
    client: reqwest::Client,
    base_url: String,
    account_id: String,
    api_token: String,
}

impl PagesApi {
    pub fn new(account_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: CLOUDFLARE_API_BASE.to_string(),
            account_id: account_id.into(),
            api_token: api_token.into(),
        }
    }

    /// Point the client at another API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn verify_url(&self) -> String {
        format!("{}/user/tokens/verify", self.base_url)
    }

    fn project_url(&self, project_name: &str) -> String {
        format!(
            "{}/accounts/{}/pages/projects/{}",
            self.base_url, self.account_id, project_name
        )
    }

    /// Check that the API token is valid and active
    pub async fn verify_token(&self) -> Result<TokenStatus> {
        let response = self
            .client
            .get(self.verify_url())
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        let api_response: ApiResponse<TokenStatus> = response.json().await?;
        api_response.into_result()
    }

    /// Fetch a Pages project by name
    pub async fn get_project(&self, project_name: &str) -> Result<PagesProject> {
        let response = self
            .client
            .get(self.project_url(project_name))
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CloudflareError::ProjectNotFound(project_name.to_string()));
        }

        let api_response: ApiResponse<PagesProject> = response.json().await?;
        if api_response
            .errors
            .iter()
            .any(|e| e.code == PROJECT_NOT_FOUND_CODE)
        {
            return Err(CloudflareError::ProjectNotFound(project_name.to_string()));
        }

        api_response.into_result()
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    result: Option<T>,
    #[serde(default)]
    errors: Vec<ApiError>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Result<T> {
        if !self.success {
            let error_msg = self
                .errors
                .first()
                .map(|e| format!("{} (code {})", e.message, e.code))
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(CloudflareError::ApiError(error_msg));
        }

        self.result
            .ok_or_else(|| CloudflareError::ApiError("empty result".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: i32,
    message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenStatus {
    pub id: String,
    pub status: String,
}

impl TokenStatus {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagesProject {
    pub name: String,
    #[serde(default)]
    pub subdomain: Option<String>,
    #[serde(default)]
    pub production_branch: Option<String>,
    #[serde(default)]
    pub domains: Vec<String>,
}
