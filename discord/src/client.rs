use eyre::{Result, WrapErr};
use reqwest::Client;
use tokio::time::Duration;

/// Downloads avatar images from the Discord CDN.
#[derive(Debug, Clone)]
pub struct AvatarClient {
    client: Client,
}

impl AvatarClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .wrap_err("build http client")?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .wrap_err("fetch avatar image")?;

        if !resp.status().is_success() {
            return Err(eyre::eyre!("Failed to fetch avatar: HTTP {}", resp.status()));
        }

        resp.bytes()
            .await
            .map(|b| b.to_vec())
            .wrap_err("read avatar image bytes")
    }
}
