use std::time::Duration;

/// Fixed non-default UA, attached to every outbound request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.3; WOW64; rv:34.0) Gecko/20100101 Firefox/34.0";

/// Path prefix that bare profile identifiers are joined onto.
pub const DEFAULT_PROFILE_BASE: &str = "https://www.linkedin.com/in/";

/// Retry behavior for the fetch layer. Only server-error statuses are
/// retried; anything else is surfaced to the caller on the first attempt.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_factor: f64,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            backoff_factor: 0.4,
            max_backoff: Duration::from_secs(120),
        }
    }
}

impl RetryPolicy {
    /// Statuses considered transient: the 500-504 forcelist.
    pub fn should_retry(&self, status: u16) -> bool {
        (500..=504).contains(&status)
    }

    /// Backoff before attempt `attempt` (1-based), doubling per attempt
    /// and capped at `max_backoff`. The first attempt gets no delay.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let secs = self.backoff_factor * 2f64.powi(attempt as i32 - 2);
        Duration::from_secs_f64(secs).min(self.max_backoff)
    }
}

/// Seed input at the `build_profile_list` boundary: either a single
/// identifier or an explicit batch. Resolved to a list up front instead
/// of sniffing shapes at runtime.
#[derive(Debug, Clone)]
pub enum Seeds {
    One(String),
    Many(Vec<String>),
}

impl Seeds {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Seeds::One(url) => vec![url],
            Seeds::Many(urls) => urls,
        }
    }
}

impl From<&str> for Seeds {
    fn from(url: &str) -> Self {
        Seeds::One(url.to_string())
    }
}

impl From<Vec<String>> for Seeds {
    fn from(urls: Vec<String>) -> Self {
        Seeds::Many(urls)
    }
}

/// Everything the spider needs, passed in at construction. The credential
/// pair is carried for the downstream authenticated viewer session and is
/// never used by the spider itself.
#[derive(Debug, Clone)]
pub struct SpiderConfig {
    pub username: String,
    pub password: String,
    pub search_terms: Vec<String>,
    pub seed_profiles: Vec<String>,
    pub user_agent: String,
    pub profile_base: String,
    /// Inclusive (min, max) milliseconds slept before each recursive
    /// expansion, to approximate human browsing cadence.
    pub delay_ms: (u64, u64),
    pub retry: RetryPolicy,
}

impl Default for SpiderConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            search_terms: Vec::new(),
            seed_profiles: Vec::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            profile_base: DEFAULT_PROFILE_BASE.to_string(),
            delay_ms: (1_000, 10_000),
            retry: RetryPolicy::default(),
        }
    }
}

impl SpiderConfig {
    pub fn with_search_terms(mut self, terms: Vec<String>) -> Self {
        self.search_terms = terms;
        self
    }

    pub fn with_seed_profiles(mut self, seeds: Vec<String>) -> Self {
        self.seed_profiles = seeds;
        self
    }

    pub fn with_profile_base(mut self, base: String) -> Self {
        self.profile_base = base;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_delay_ms(mut self, min: u64, max: u64) -> Self {
        self.delay_ms = (min, max);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_credentials(mut self, username: String, password: String) -> Self {
        self.username = username;
        self.password = password;
        self
    }
}
