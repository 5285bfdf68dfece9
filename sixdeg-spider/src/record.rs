use serde::{Deserialize, Serialize};

/// One crawled public profile, as handed off to the viewer session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub url: String,
    pub name: Option<String>,
    pub experiences: Vec<ExperienceEntry>,
    pub suggestions: Vec<SuggestionStub>,
}

impl ProfileRecord {
    pub fn new(url: String) -> Self {
        Self {
            url,
            name: None,
            experiences: Vec::new(),
            suggestions: Vec::new(),
        }
    }
}

/// A single work-history card. Every field is best-effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: Option<String>,
    pub company: Option<String>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
}

/// An unvisited "people also viewed" candidate, pending dedup and
/// term-filter checks before it is crawled itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionStub {
    pub url: Option<String>,
    pub name: Option<String>,
    pub headline: Option<String>,
}

/// One egress endpoint scraped from the public proxy listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyRecord {
    pub ip: String,
    pub port: u16,
    pub location: String,
    pub speed_ms: u32,
}

impl ProxyRecord {
    /// Address in `host:port` form, as accepted by `reqwest::Proxy`.
    pub fn address(&self) -> String {
        format!("http://{}:{}", self.ip, self.port)
    }
}
