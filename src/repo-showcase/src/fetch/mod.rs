//! Fetching the repository list.
//!
//! [`RepositorySource`] is the seam between the controller and the network:
//! [`GithubSource`] talks to the GitHub REST API, tests substitute their own.

mod error;

pub use error::FetchError;

use crate::config::ShowcaseConfig;
use crate::rate_limit::check_core_rate_limit;
use crate::repository::RepositoryRecord;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use rustls::crypto::CryptoProvider;
use serde::Serialize;
use std::future::Future;
use tracing::{debug, info, info_span, warn, Instrument};

/// Something that can produce the full repository list.
pub trait RepositorySource {
    /// Fetches every repository record, most recently updated first.
    fn fetch_repositories(
        &self,
    ) -> impl Future<Output = Result<Vec<RepositoryRecord>, FetchError>> + Send;
}

/// Query string for `GET /users/{username}/repos`.
#[derive(Debug, Serialize)]
struct ListReposParams {
    sort: &'static str,
    direction: &'static str,
    per_page: u8,
}

/// Lists a user's public repositories through the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubSource {
    octocrab: Octocrab,
    username: String,
    per_page: u8,
}

impl GithubSource {
    /// Builds a client for the configured API base URL.
    ///
    /// Without a token requests are anonymous and share the low
    /// unauthenticated rate limit. Failed requests are never re-sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is rejected or the client cannot be built.
    pub fn new(config: &ShowcaseConfig, token: Option<&str>) -> Result<Self, octocrab::Error> {
        ensure_crypto_provider();

        let mut builder = Octocrab::builder()
            .add_retry_config(RetryConfig::None)
            .base_uri(config.api_base_url.as_str())?;
        if let Some(token) = token {
            builder = builder.personal_token(token.to_string());
        }

        Ok(Self {
            octocrab: builder.build()?,
            username: config.username.clone(),
            per_page: config.per_page,
        })
    }

    /// Returns the user whose repositories are listed.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// API route for the user's repository list.
    fn route(&self) -> String {
        format!("/users/{}/repos", self.username)
    }

    /// Maps an octocrab error, enriching rate limit failures with the reset time.
    async fn classify(&self, error: octocrab::Error) -> FetchError {
        let classified = match &error {
            octocrab::Error::GitHub { source, .. } => {
                FetchError::from_status(source.status_code.as_u16(), source.message.clone())
            }
            _ => FetchError::Request {
                message: error.to_string(),
            },
        };

        if !classified.is_rate_limited() {
            return classified;
        }

        match check_core_rate_limit(&self.octocrab).await {
            Ok(info) => {
                if info.is_exhausted() {
                    warn!(
                        limit = info.limit,
                        reset_in_secs = info.seconds_until_reset(),
                        "GitHub rate limit exhausted"
                    );
                } else {
                    warn!(
                        remaining = info.remaining,
                        limit = info.limit,
                        "GitHub refused the request with quota left"
                    );
                }
                FetchError::RateLimited {
                    reset_at: Some(info.reset),
                }
            }
            Err(e) => {
                debug!(error = %e, "Could not query rate limit status");
                classified
            }
        }
    }
}

/// Installs the ring provider unless the process already chose one.
///
/// rustls cannot pick a default itself once more than one provider is
/// compiled in.
fn ensure_crypto_provider() {
    if CryptoProvider::get_default().is_none() {
        // Losing a race to another installer is fine.
        let _ = rustls::crypto::ring::default_provider().install_default();
    }
}

impl RepositorySource for GithubSource {
    async fn fetch_repositories(&self) -> Result<Vec<RepositoryRecord>, FetchError> {
        let span = info_span!("fetch_repositories", username = %self.username);

        async {
            let params = ListReposParams {
                sort: "updated",
                direction: "desc",
                per_page: self.per_page,
            };
            debug!(route = %self.route(), ?params, "Requesting repository list");

            match self
                .octocrab
                .get::<Vec<RepositoryRecord>, _, _>(self.route(), Some(&params))
                .await
            {
                Ok(records) => {
                    info!(count = records.len(), "Fetched repositories");
                    Ok(records)
                }
                Err(e) => Err(self.classify(e).await),
            }
        }
        .instrument(span)
        .await
    }
}
