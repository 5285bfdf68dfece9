use crate::client::FetchClient;
use crate::error::{Result, SpiderError};
use crate::record::ProxyRecord;
use reqwest::Method;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use tracing::{debug, info};

/// Scrapes a paginated public proxy listing to build an egress pool for
/// the fetch layer.
///
/// The listing obfuscates its interesting columns behind inline script
/// text: the IP is wrapped in a `document.write('…')` literal and the port
/// is a hex string inside `document.write(gp.dep('…'))`. Both wrappers are
/// reversed here. A single failed page fails the whole harvest; a partial
/// pool is never returned.
pub struct ProxyHarvester {
    client: FetchClient,
    endpoint: String,
    tier: String,
    pages: u32,
}

impl ProxyHarvester {
    pub fn new(client: FetchClient, endpoint: String) -> Self {
        Self {
            client,
            endpoint,
            tier: "elite".to_string(),
            pages: 2,
        }
    }

    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_tier(mut self, tier: String) -> Self {
        self.tier = tier;
        self
    }

    /// Fetch and parse every listing page, or fail the harvest outright.
    pub async fn harvest(&self) -> Result<Vec<ProxyRecord>> {
        let mut pool = Vec::new();
        for page in 1..=self.pages {
            debug!("fetching proxy listing page {}/{}", page, self.pages);
            let body = format!("Type={}&PageIdx={}&Uptime=0", self.tier, page);
            let headers = HashMap::from([(
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            )]);

            let outcome = self
                .client
                .fetch(&self.endpoint, Method::POST, Some(body), Some(headers))
                .await
                .map_err(|e| SpiderError::HarvestFailed {
                    page,
                    reason: e.to_string(),
                })?;
            if !outcome.is_ok() {
                return Err(SpiderError::HarvestFailed {
                    page,
                    reason: format!("status {}", outcome.status),
                });
            }

            pool.extend(parse_listing(&outcome.body));
        }
        info!("harvested {} proxies", pool.len());
        Ok(pool)
    }
}

/// Parse one listing page into proxy records. The first two table rows are
/// header chrome and are always skipped; rows that fail to yield all four
/// columns are dropped individually.
pub fn parse_listing(html: &str) -> Vec<ProxyRecord> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("table#tblproxy tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();
    let script_selector = Selector::parse("script").unwrap();

    let mut proxies = Vec::new();
    for row in document.select(&row_selector).skip(2) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        match parse_row(&cells, &script_selector) {
            Some(proxy) => proxies.push(proxy),
            None => debug!("skipping malformed proxy row"),
        }
    }
    proxies
}

fn parse_row(cells: &[ElementRef], script_selector: &Selector) -> Option<ProxyRecord> {
    let ip_script = script_text(cells.first()?, script_selector)?;
    let port_script = script_text(cells.get(1)?, script_selector)?;

    let ip = unwrap_literal(&ip_script, "document.write('", "')")?;
    let port_hex = unwrap_literal(&port_script, "document.write(gp.dep('", "'))")?;
    let port = u16::from_str_radix(&port_hex, 16).ok()?;

    let location = cell_text(cells.get(2)?)?;
    let speed = cell_text(cells.get(5)?)?;
    let speed_ms = speed.strip_suffix("ms").unwrap_or(&speed).trim().parse().ok()?;

    Some(ProxyRecord {
        ip,
        port,
        location,
        speed_ms,
    })
}

/// Pull the string literal out of a pseudo-script wrapper like
/// `document.write('1.2.3.4')`.
fn unwrap_literal(text: &str, prefix: &str, suffix: &str) -> Option<String> {
    text.trim()
        .strip_prefix(prefix)?
        .strip_suffix(suffix)
        .map(str::to_string)
}

fn script_text(cell: &ElementRef, script_selector: &Selector) -> Option<String> {
    let script = cell.select(script_selector).next()?;
    let text: String = script.text().collect();
    let text = text.trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}

fn cell_text(cell: &ElementRef) -> Option<String> {
    let text: String = cell.text().collect();
    let text = text.trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn harvester(server: &MockServer, pages: u32) -> ProxyHarvester {
        let client = FetchClient::new(
            "sixdeg-test".to_string(),
            RetryPolicy {
                max_attempts: 2,
                backoff_factor: 0.001,
                max_backoff: Duration::from_millis(5),
            },
        );
        ProxyHarvester::new(client, format!("{}/proxylist", server.uri())).with_pages(pages)
    }

    fn listing_page(rows: &[(&str, &str, &str, &str)]) -> String {
        let mut html = String::from(
            r#"<html><body><table id="tblproxy">
            <tr><th>header</th></tr>
            <tr><th>columns</th></tr>"#,
        );
        for &(ip, port_hex, location, speed) in rows {
            html.push_str(&format!(
                "<tr>\
                 <td><script>document.write('{ip}')</script></td>\
                 <td><script>document.write(gp.dep('{port_hex}'))</script></td>\
                 <td>{location}</td><td>Elite</td><td>98%</td><td>{speed}</td>\
                 </tr>"
            ));
        }
        html.push_str("</table></body></html>");
        html
    }

    #[tokio::test]
    async fn harvests_all_pages_into_one_pool() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/proxylist"))
            .and(body_string_contains("PageIdx=1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(listing_page(&[("10.0.0.1", "1F90", "Germany", "120ms")])),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/proxylist"))
            .and(body_string_contains("PageIdx=2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(listing_page(&[("10.0.0.2", "0050", "France", "80ms")])),
            )
            .mount(&server)
            .await;

        let pool = harvester(&server, 2).harvest().await.unwrap();
        assert_eq!(
            pool,
            vec![
                ProxyRecord {
                    ip: "10.0.0.1".to_string(),
                    port: 0x1F90,
                    location: "Germany".to_string(),
                    speed_ms: 120,
                },
                ProxyRecord {
                    ip: "10.0.0.2".to_string(),
                    port: 80,
                    location: "France".to_string(),
                    speed_ms: 80,
                },
            ]
        );
    }

    #[tokio::test]
    async fn one_failed_page_fails_the_whole_harvest() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/proxylist"))
            .and(body_string_contains("PageIdx=1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(listing_page(&[("10.0.0.1", "1F90", "Germany", "120ms")])),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/proxylist"))
            .and(body_string_contains("PageIdx=2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        // Page 1 parsed fine, but its rows must not leak out.
        let err = harvester(&server, 2).harvest().await.unwrap_err();
        match err {
            SpiderError::HarvestFailed { page, .. } => assert_eq!(page, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn posts_the_pagination_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/proxylist"))
            .and(body_string_contains("Type=elite"))
            .and(body_string_contains("Uptime=0"))
            .and(wiremock::matchers::header(
                "content-type",
                "application/x-www-form-urlencoded",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
            .expect(1)
            .mount(&server)
            .await;

        let pool = harvester(&server, 1).harvest().await.unwrap();
        assert!(pool.is_empty());
    }

    #[test]
    fn malformed_rows_are_dropped_individually() {
        let html = r#"<html><body><table id="tblproxy">
            <tr><th>h</th></tr><tr><th>h</th></tr>
            <tr><td><script>document.write('10.0.0.1')</script></td>
                <td><script>document.write(gp.dep('0050'))</script></td>
                <td>Poland</td><td>Elite</td><td>99%</td><td>45ms</td></tr>
            <tr><td>plain text, no script</td><td>nope</td>
                <td>Spain</td><td>Elite</td><td>10%</td><td>900ms</td></tr>
            <tr><td><script>document.write('10.0.0.3')</script></td>
                <td><script>document.write(gp.dep('ZZZZ'))</script></td>
                <td>Italy</td><td>Elite</td><td>50%</td><td>60ms</td></tr>
            </table></body></html>"#;

        let proxies = parse_listing(html);
        assert_eq!(proxies.len(), 1);
        assert_eq!(proxies[0].ip, "10.0.0.1");
        assert_eq!(proxies[0].port, 80);
        assert_eq!(proxies[0].location, "Poland");
        assert_eq!(proxies[0].speed_ms, 45);
    }
}
