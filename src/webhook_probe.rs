use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::AppResult;

/// Confirms a webhook URL is reachable before the subscription is persisted.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WebhookProber: Send + Sync {
    /// POSTs to the URL and returns the response status code. A transport
    /// failure (unreachable host, invalid URL) is an error.
    async fn probe(&self, url: &str) -> AppResult<u16>;
}

pub struct HttpWebhookProber {
    client: reqwest::Client,
}

impl HttpWebhookProber {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpWebhookProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebhookProber for HttpWebhookProber {
    async fn probe(&self, url: &str) -> AppResult<u16> {
        let response = self.client.post(url).send().await?;
        Ok(response.status().as_u16())
    }
}
