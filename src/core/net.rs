// src/core/net.rs
// Blocking HTTP(S) GET for the roster exports. Callers already run this on
// worker threads, so no async runtime is involved.

use std::time::Duration;

use reqwest::{
    blocking::Client,
    header::ACCEPT,
    redirect::Policy,
    Url,
};

use super::BoxError;
use crate::config::consts::{HTTP_TIMEOUT_SECS, MAX_REDIRECTS, USER_AGENT};

/// Parse an `http://` or `https://` URL with a host.
pub fn parse_url(s: &str) -> Result<Url, BoxError> {
    let url = Url::parse(s.trim()).map_err(|e| format!("Invalid URL {s}: {e}"))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("Unsupported scheme \"{other}\" in {s}").into()),
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(format!("Missing host in URL: {s}").into());
    }
    Ok(url)
}

fn client() -> Result<Client, BoxError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .build()?;
    Ok(client)
}

/// GET `url` and return the body as text. Non-2xx statuses are errors.
pub fn http_get(url: &Url) -> Result<String, BoxError> {
    let resp = client()?
        .get(url.clone())
        .header(ACCEPT, "text/csv, text/plain, */*")
        .send()?
        .error_for_status()?;
    if resp.url() != url {
        logd!("HTTP: {} → {}", url, resp.url());
    }
    Ok(resp.text()?)
}
