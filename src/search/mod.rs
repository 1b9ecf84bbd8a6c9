//! Paginated repository search with throttling recovery.

mod http;
mod query;
mod types;

pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use query::{ALL_SENTINEL, SearchQuery};
pub use types::RepositoryDescriptor;

use std::thread;
use std::time::Duration;

use crate::error::{Result, WsAuditError};
use types::SearchPage;

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/search/repositories";
pub const DEFAULT_PER_PAGE: u32 = 100;
pub const DEFAULT_COOLDOWN_SECS: u64 = 60;
pub const DEFAULT_MAX_THROTTLE_RETRIES: u32 = 30;

/// HTTP statuses the search service uses for rate limiting.
const THROTTLE_STATUSES: &[u16] = &[403, 429];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub endpoint: String,
    pub per_page: u32,
    /// Pause before re-issuing a throttled page.
    pub cooldown: Duration,
    /// Consecutive throttled attempts tolerated for one page.
    pub max_throttle_retries: u32,
    pub token: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            per_page: DEFAULT_PER_PAGE,
            cooldown: Duration::from_secs(DEFAULT_COOLDOWN_SECS),
            max_throttle_retries: DEFAULT_MAX_THROTTLE_RETRIES,
            token: None,
        }
    }
}

enum PageOutcome {
    Items(Vec<RepositoryDescriptor>),
    Throttled,
    Stop(String),
}

pub struct SearchClient<C: HttpClient> {
    client: C,
    settings: SearchSettings,
}

impl<C: HttpClient> SearchClient<C> {
    #[must_use]
    pub const fn new(client: C, settings: SearchSettings) -> Self {
        Self { client, settings }
    }

    /// Collect up to `max_count` repositories, most popular first.
    ///
    /// Throttled pages are retried after the cooldown without advancing the
    /// page cursor. Any other failure ends paging early and the repositories
    /// gathered so far are returned.
    pub fn fetch_repositories(
        &self,
        query: &SearchQuery,
        max_count: usize,
    ) -> Vec<RepositoryDescriptor> {
        let mut repos: Vec<RepositoryDescriptor> = Vec::new();
        let mut page: u32 = 1;
        let mut throttled: u32 = 0;

        while repos.len() < max_count {
            match self.fetch_page(query, page) {
                PageOutcome::Items(items) => {
                    throttled = 0;
                    log::info!("Page {page} fetched, {} repositories found", items.len());
                    if items.is_empty() {
                        break;
                    }
                    let remaining = max_count - repos.len();
                    repos.extend(items.into_iter().take(remaining));
                    page += 1;
                }
                PageOutcome::Throttled if throttled >= self.settings.max_throttle_retries => {
                    log::warn!(
                        "Page {page} still throttled after {throttled} retries, stopping search"
                    );
                    break;
                }
                PageOutcome::Throttled => {
                    throttled += 1;
                    log::warn!(
                        "Search throttled on page {page}, retrying in {}s",
                        self.settings.cooldown.as_secs_f64()
                    );
                    thread::sleep(self.settings.cooldown);
                }
                PageOutcome::Stop(reason) => {
                    log::warn!("Error fetching page {page}: {reason}");
                    break;
                }
            }
        }

        log::info!(
            "Total fetched repositories: {} for query '{query}'",
            repos.len()
        );
        repos
    }

    fn fetch_page(&self, query: &SearchQuery, page: u32) -> PageOutcome {
        let url = match self.page_url(query, page) {
            Ok(url) => url,
            Err(e) => return PageOutcome::Stop(e.to_string()),
        };
        log::debug!("Fetching page {page} from {url}");

        let auth = self.settings.token.as_ref().map(|t| format!("token {t}"));
        let mut headers = vec![("Accept", "application/vnd.github+json")];
        if let Some(auth) = auth.as_deref() {
            headers.push(("Authorization", auth));
        }

        let response = match self.client.get(&url, &headers) {
            Ok(response) => response,
            Err(e) => return PageOutcome::Stop(e.to_string()),
        };

        if THROTTLE_STATUSES.contains(&response.status) {
            return PageOutcome::Throttled;
        }
        if !response.is_success() {
            return PageOutcome::Stop(format!("HTTP {} - {}", response.status, response.body));
        }

        match serde_json::from_str::<SearchPage>(&response.body) {
            Ok(parsed) => PageOutcome::Items(parsed.items.into_iter().map(Into::into).collect()),
            Err(e) => PageOutcome::Stop(format!("invalid search response: {e}")),
        }
    }

    fn page_url(&self, query: &SearchQuery, page: u32) -> Result<String> {
        let per_page = self.settings.per_page.to_string();
        let page = page.to_string();
        let url = reqwest::Url::parse_with_params(
            &self.settings.endpoint,
            &[
                ("q", query.as_str()),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", per_page.as_str()),
                ("page", page.as_str()),
            ],
        )
        .map_err(|e| {
            WsAuditError::Config(format!(
                "Invalid search endpoint '{}': {e}",
                self.settings.endpoint
            ))
        })?;
        Ok(url.into())
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
