// src/core/net.rs
// One blocking GET per run. No retry; transport defaults for redirects and timeouts.

use std::path::Path;

use tracing::{debug, info};

use crate::error::FetchError;

/// Fetch `url` and return the body. Network errors and non-2xx statuses are fatal.
pub fn http_get(url: &str) -> Result<String, FetchError> {
    let wrap = |source: reqwest::Error| FetchError::Request { url: url.to_string(), source };

    let t = std::time::Instant::now();
    let resp = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(wrap)?;
    let status = resp.status();
    let body = resp.text().map_err(wrap)?;

    info!(%url, %status, bytes = body.len(), "fetched dashboard");
    debug!("GET took {:?}", t.elapsed());
    Ok(body)
}

/// Read a previously saved copy of the page instead of hitting the network.
pub fn read_saved(path: &Path) -> Result<String, FetchError> {
    let body = std::fs::read_to_string(path)
        .map_err(|source| FetchError::Saved { path: path.to_path_buf(), source })?;
    info!(path = %path.display(), bytes = body.len(), "using saved dashboard page");
    Ok(body)
}
