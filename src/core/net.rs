// src/core/net.rs
// Blocking HTTP GET. Redirects are followed (http → https on the store).

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::consts::USER_AGENT;
use crate::error::{Error, Result};

/// Page source for the scrape loop. Tests swap in canned HTML.
pub trait Fetch {
    fn fetch(&mut self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&mut self, url: &str) -> Result<String> {
        http_get(&self.client, url)
    }
}

pub fn http_get(client: &Client, url: &str) -> Result<String> {
    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Http { status: status.as_u16(), url: url.to_string() });
    }
    let body = resp.text()?;
    debug!("net: GET {url} -> {} bytes", body.len());
    Ok(body)
}
