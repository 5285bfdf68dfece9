use crate::config::RetryPolicy;
use crate::error::{Result, SpiderError};
use crate::record::ProxyRecord;
use reqwest::{Client, Method};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

/// What a completed fetch hands back. Any status outside the retry set is
/// delivered here as-is; callers decide whether a non-200 means skip or abort.
#[derive(Debug)]
pub struct FetchOutcome {
    pub status: u16,
    pub body: String,
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Fault-tolerant HTTP fetcher shared by the profile crawler and the proxy
/// harvester.
///
/// Each logical fetch builds its own `reqwest::Client` and drops it before
/// returning, so no connection state survives between requests. Server
/// errors (500-504) and connection-level failures are retried with a
/// doubling backoff up to the policy ceiling; everything else is returned
/// on the first attempt.
pub struct FetchClient {
    user_agent: String,
    retry: RetryPolicy,
    proxies: Vec<ProxyRecord>,
    next_proxy: AtomicUsize,
}

impl FetchClient {
    pub fn new(user_agent: String, retry: RetryPolicy) -> Self {
        Self {
            user_agent,
            retry,
            proxies: Vec::new(),
            next_proxy: AtomicUsize::new(0),
        }
    }

    /// Route fetches through a harvested proxy pool, round-robin.
    pub fn with_proxy_pool(mut self, proxies: Vec<ProxyRecord>) -> Self {
        self.proxies = proxies;
        self
    }

    /// Issue one logical fetch, retrying transient failures internally.
    ///
    /// Returns `Ok` with the final status and body text, or an error once
    /// the retry ceiling is exhausted or the connection fails terminally.
    pub async fn fetch(
        &self,
        url: &str,
        method: Method,
        body: Option<String>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<FetchOutcome> {
        let mut last_status = 0u16;

        for attempt in 1..=self.retry.max_attempts {
            let wait = self.retry.backoff_for(attempt);
            if !wait.is_zero() {
                debug!("backing off {:?} before attempt {}", wait, attempt);
                tokio::time::sleep(wait).await;
            }

            // Fresh client per attempt; dropped at the end of the scope.
            let client = self.build_client()?;
            let mut request = client.request(method.clone(), url);
            if let Some(ref body) = body {
                request = request.body(body.clone());
            }
            if let Some(ref headers) = headers {
                for (key, value) in headers {
                    request = request.header(key, value);
                }
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    debug!("{} {} -> {}", method, url, status);
                    if !self.retry.should_retry(status) {
                        let body = response.text().await?;
                        return Ok(FetchOutcome { status, body });
                    }
                    last_status = status;
                    warn!(
                        "server error {} from {} (attempt {}/{})",
                        status, url, attempt, self.retry.max_attempts
                    );
                }
                Err(e) if attempt < self.retry.max_attempts => {
                    last_status = 0;
                    warn!(
                        "connection failure for {} (attempt {}/{}): {}",
                        url, attempt, self.retry.max_attempts, e
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(SpiderError::RetriesExhausted {
            url: url.to_string(),
            last_status,
        })
    }

    fn build_client(&self) -> Result<Client> {
        let mut builder = Client::builder().user_agent(&self.user_agent);
        if !self.proxies.is_empty() {
            let idx = self.next_proxy.fetch_add(1, Ordering::Relaxed) % self.proxies.len();
            builder = builder.proxy(reqwest::Proxy::all(self.proxies[idx].address())?);
        }
        Ok(builder.build()?)
    }
}
