use crate::client::FetchClient;
use crate::config::{Seeds, SpiderConfig};
use crate::error::Result;
use crate::filter::TermFilter;
use crate::parse;
use crate::record::{ProfileRecord, ProxyRecord};
use futures::FutureExt;
use futures::future::BoxFuture;
use rand::Rng;
use reqwest::Method;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Visited-set for a single `build_profile_list` call. Created fresh at the
/// top of every call; nothing leaks between independent invocations.
struct TraversalState {
    visited: HashSet<String>,
}

/// Depth-bounded, deduplicating spider over the suggested-connections graph.
///
/// Expansion is pre-order and strictly sequential: each profile is emitted
/// before its suggestions are explored, and a randomized pause precedes
/// every recursive step so the cadence resembles a person clicking through
/// profiles. The visited set is keyed on display *name*, not URL, which
/// doubles as the cycle-breaker for mutually-suggesting profiles. Two
/// different people sharing a display name are merged into one node; a
/// known limitation kept for URL-alias resistance.
pub struct ProfileCrawler {
    client: FetchClient,
    filter: TermFilter,
    config: SpiderConfig,
}

impl ProfileCrawler {
    pub fn new(config: SpiderConfig) -> Self {
        Self {
            client: FetchClient::new(config.user_agent.clone(), config.retry.clone()),
            filter: TermFilter::new(&config.search_terms),
            config,
        }
    }

    /// Route all profile fetches through a harvested proxy pool.
    pub fn with_proxy_pool(mut self, proxies: Vec<ProxyRecord>) -> Self {
        self.client = FetchClient::new(
            self.config.user_agent.clone(),
            self.config.retry.clone(),
        )
        .with_proxy_pool(proxies);
        self
    }

    /// Crawl outward from the seed profiles, following admissible
    /// suggestions until `depth` expansions have been spent on each branch.
    ///
    /// Unreachable profiles cost their branch and nothing else; the result
    /// is the flattened pre-order list of every profile actually parsed.
    pub async fn build_profile_list(
        &self,
        seeds: impl Into<Seeds>,
        depth: u32,
    ) -> Vec<ProfileRecord> {
        let mut state = TraversalState {
            visited: HashSet::new(),
        };
        let mut people = Vec::new();
        for seed in seeds.into().into_vec() {
            let url = self.normalize_profile_url(&seed);
            people.extend(self.expand(url, depth, &mut state).await);
        }
        people
    }

    fn expand<'a>(
        &'a self,
        url: String,
        depth: u32,
        state: &'a mut TraversalState,
    ) -> BoxFuture<'a, Vec<ProfileRecord>> {
        async move {
            debug!("expanding {} (depth {})", url, depth);
            let record = match self.fetch_profile(&url).await {
                Ok(Some(record)) => record,
                Ok(None) => {
                    debug!("no profile at {}", url);
                    return Vec::new();
                }
                Err(e) => {
                    warn!("could not reach {}: {}", url, e);
                    return Vec::new();
                }
            };

            if let Some(name) = &record.name {
                state.visited.insert(name.clone());
            }

            let suggestions = record.suggestions.clone();
            let mut people = vec![record];

            if depth > 0 {
                // Check order is fixed: URL presence, then name/dedup, then
                // the term filter. The first failing check wins.
                for suggestion in suggestions {
                    let Some(sug_url) = suggestion.url else {
                        warn!("suggestion {:?} missing URL", suggestion.name);
                        continue;
                    };
                    let Some(sug_name) = suggestion.name else {
                        warn!("a suggestion has no name");
                        continue;
                    };
                    if state.visited.contains(&sug_name) {
                        debug!("suggestion {:?} already crawled", sug_name);
                        continue;
                    }
                    if !self.filter.admits(suggestion.headline.as_deref()) {
                        debug!("suggestion {:?} does not match the terms set", sug_name);
                        continue;
                    }

                    self.pause_between_visits().await;
                    let next = self.normalize_profile_url(&sug_url);
                    people.extend(self.expand(next, depth - 1, &mut *state).await);
                }
            }

            people
        }
        .boxed()
    }

    /// Fetch and parse one profile page. `Ok(None)` means the page answered
    /// but with a non-200; `Err` means the fetch layer gave up on it.
    async fn fetch_profile(&self, url: &str) -> Result<Option<ProfileRecord>> {
        let outcome = self.client.fetch(url, Method::GET, None, None).await?;
        if !outcome.is_ok() {
            debug!("status {} for {}", outcome.status, url);
            return Ok(None);
        }
        Ok(Some(parse::parse_profile(url, &outcome.body)))
    }

    /// Absolute URLs pass through, rooted hrefs (the form suggestion cards
    /// carry, e.g. `/in/john-smith`) resolve against the base's origin, and
    /// bare identifiers are appended to the base itself.
    fn normalize_profile_url(&self, raw: &str) -> String {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return raw.to_string();
        }
        if raw.starts_with('/')
            && let Ok(base) = Url::parse(&self.config.profile_base)
            && let Ok(joined) = base.join(raw)
        {
            return joined.to_string();
        }
        format!(
            "{}{}",
            self.config.profile_base,
            raw.trim_start_matches('/')
        )
    }

    async fn pause_between_visits(&self) {
        let (min, max) = self.config.delay_ms;
        if max == 0 {
            return;
        }
        let wait = rand::thread_rng().gen_range(min..=max.max(min));
        tokio::time::sleep(Duration::from_millis(wait)).await;
    }
}
