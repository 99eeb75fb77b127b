//! Encyclopedia search via the MediaWiki `list=search` API.

use scraper::Html;
use serde::Deserialize;

use super::{LookupError, Snippet, USER_AGENT, WIKIPEDIA};
use crate::consts::{LOOKUP_TIMEOUT, MAX_ENCYCLOPEDIA_RESULTS, SNIPPET_MAX_CHARS, truncate_chars};

pub const API_URL: &str = "https://ru.wikipedia.org/w/api.php";

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    title: String,
    #[serde(default)]
    snippet: String,
}

pub(crate) async fn search(
    client: &reqwest::Client,
    endpoint: &str,
    query: &str,
) -> Result<Vec<Snippet>, LookupError> {
    let limit = MAX_ENCYCLOPEDIA_RESULTS.to_string();
    let resp = client
        .get(endpoint)
        .query(&[
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", limit.as_str()),
            ("format", "json"),
            ("utf8", "1"),
        ])
        .header("User-Agent", USER_AGENT)
        .timeout(LOOKUP_TIMEOUT)
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(LookupError::Status(resp.status()));
    }

    let body: SearchResponse = resp.json().await?;
    Ok(into_snippets(body))
}

fn into_snippets(body: SearchResponse) -> Vec<Snippet> {
    body.query
        .map(|q| q.search)
        .unwrap_or_default()
        .into_iter()
        .take(MAX_ENCYCLOPEDIA_RESULTS)
        .map(|hit| Snippet {
            source_name: WIKIPEDIA.to_string(),
            title: hit.title,
            text: truncate_chars(&strip_markup(&hit.snippet), SNIPPET_MAX_CHARS),
        })
        .collect()
}

/// Drop tags (e.g. `<span class="searchmatch">`) and decode entities.
pub fn strip_markup(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
