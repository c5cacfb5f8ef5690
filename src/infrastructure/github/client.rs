use reqwest::{header::ACCEPT, StatusCode};
use serde_json::Value;
use tracing::instrument;
use url::Url;
use zeroize::Zeroizing;

use crate::{
    constants::{GITHUB_REPO_LIMIT, GITHUB_REPO_SORT, GITHUB_UNAVAILABLE, NO_GITHUB_PROFILE},
    errors::AppError,
    settings::AppConfig,
};

#[derive(Clone)]
struct GithubCredentials {
    client_id: String,
    client_secret: Zeroizing<String>,
}

/// Thin proxy over GitHub's repository listing. The response body is handed
/// back untouched.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_url: Url,
    credentials: Option<GithubCredentials>,
}

impl GithubClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(config.github_user_agent.as_str())
            .timeout(config.github_timeout())
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build GitHub client: {}", e)))?;

        let api_url = Url::parse(&config.github_api_url)
            .map_err(|e| AppError::InternalError(format!("Invalid GitHub API URL: {}", e)))?;

        if api_url.cannot_be_a_base() {
            return Err(AppError::InternalError(format!(
                "GitHub API URL cannot be a base: {}",
                config.github_api_url
            )));
        }

        let credentials = config
            .github_credentials()
            .map(|(client_id, client_secret)| GithubCredentials { client_id, client_secret });

        Ok(GithubClient { http, api_url, credentials })
    }

    /// `{api}/users/{username}/repos` with paging, sort and credentials.
    pub fn repos_url(&self, username: &str) -> Url {
        let mut url = self.api_url.clone();

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["users", username, "repos"]);
        }

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("per_page", GITHUB_REPO_LIMIT)
                .append_pair("sort", GITHUB_REPO_SORT);
            if let Some(credentials) = &self.credentials {
                query
                    .append_pair("client_id", &credentials.client_id)
                    .append_pair("client_secret", credentials.client_secret.as_str());
            }
        }

        url
    }

    /// Fetches the latest repositories of `username`.
    ///
    /// A non-200 answer means the user has no GitHub presence we can show;
    /// failing to reach GitHub at all is reported separately.
    #[instrument(skip(self))]
    pub async fn fetch_repositories(&self, username: &str) -> Result<Value, AppError> {
        let response = self.http
            .get(self.repos_url(username))
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(timeout = e.is_timeout(), "GitHub request failed: {}", e);
                AppError::ExternalServiceUnreachable(GITHUB_UNAVAILABLE.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(status = %status, "GitHub answered without repositories");
            return Err(AppError::ExternalServiceUnavailable(NO_GITHUB_PROFILE.to_string()));
        }

        response.json::<Value>().await.map_err(|e| {
            tracing::error!("GitHub returned an unreadable body: {}", e);
            AppError::ExternalServiceUnreachable(GITHUB_UNAVAILABLE.to_string())
        })
    }
}
