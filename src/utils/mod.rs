//! Utility functions and helpers.

pub mod http;

use url::Url;

use crate::error::Result;

/// Join an endpoint path onto an API base URL, keeping the base path.
///
/// `endpoint_url("https://host/api/v1", "competitions/list")` yields
/// `https://host/api/v1/competitions/list`.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    Ok(base.join(path.trim_start_matches('/'))?)
}

/// Build a paged endpoint URL (`?page=N`).
pub fn page_url(base_url: &str, path: &str, page: usize) -> Result<Url> {
    let mut url = endpoint_url(base_url, path)?;
    url.query_pairs_mut().append_pair("page", &page.to_string());
    Ok(url)
}
