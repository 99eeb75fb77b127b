//! Domain-restricted web search used as a presence check.
//!
//! Only the status code matters: a successful `site:` search marks the
//! domain as verified. The result page is never parsed.

use super::{LookupError, USER_AGENT};
use crate::consts::LOOKUP_TIMEOUT;

pub const SEARCH_URL: &str = "https://html.duckduckgo.com/html/";

pub fn site_query(domain: &str, question: &str) -> String {
    format!("site:{domain} {question}")
}

pub(crate) async fn confirm(
    client: &reqwest::Client,
    endpoint: &str,
    domain: &str,
    question: &str,
) -> Result<(), LookupError> {
    let query = site_query(domain, question);
    let resp = client
        .get(endpoint)
        .query(&[("q", query.as_str())])
        .header("User-Agent", USER_AGENT)
        .timeout(LOOKUP_TIMEOUT)
        .send()
        .await?;

    if resp.status().is_success() {
        Ok(())
    } else {
        Err(LookupError::Status(resp.status()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_query_restricts_domain() {
        assert_eq!(
            site_query("gramota.ru", "как пишется «в течение»"),
            "site:gramota.ru как пишется «в течение»"
        );
    }
}
