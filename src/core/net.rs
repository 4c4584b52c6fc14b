// src/core/net.rs
// One blocking HTTPS GET. The docs host is TLS-only, so this rides on
// reqwest/rustls instead of a raw socket; the surface stays a single
// `http_get(url) -> Result<String>`.

use std::error::Error;
use std::time::Duration;

use reqwest::blocking::Client;

pub fn http_get(url: &str) -> Result<String, Box<dyn Error>> {
    let client = Client::builder()
        .timeout(Duration::from_secs(15))
        .user_agent("tba_typegen/0.2")
        .build()?;

    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(format!("HTTP error: {} {}", status, url).into());
    }
    Ok(resp.text()?)
}
