//! Rate limit inspection for the GitHub API.
//!
//! Rate limiting is only reported, never waited out: after a 403 the core
//! resource is queried so the error can say when the window resets.

mod info;

pub use info::RateLimitInfo;

use octocrab::Octocrab;

/// Checks the current rate limit status for core API (repositories, users, etc.).
///
/// The rate limit endpoint itself does not count against the quota.
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo {
        remaining: core.remaining as u32,
        reset: core.reset,
        limit: core.limit as u32,
    })
}
