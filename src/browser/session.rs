//! WebDriver-backed implementation of [`BrowserSession`]

use crate::browser::BrowserSession;
use crate::{Result, ScrapeError};
use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use std::time::Duration;

/// A live browser session speaking the WebDriver protocol
///
/// Wraps a [`fantoccini::Client`] connected to a driver endpoint (chromedriver
/// by default). The inner client is taken on `close`, so the wrapper can be
/// dropped safely after release.
pub struct WebDriverSession {
    client: Option<Client>,
}

impl WebDriverSession {
    /// Connects a new session to the given WebDriver endpoint
    pub async fn connect(webdriver_url: &str) -> Result<Self> {
        let client = ClientBuilder::rustls().connect(webdriver_url).await?;
        Ok(Self {
            client: Some(client),
        })
    }

    fn client(&mut self) -> Result<&mut Client> {
        self.client.as_mut().ok_or(ScrapeError::SessionClosed)
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        self.client()?.goto(url).await?;
        Ok(())
    }

    async fn await_marker(&mut self, selector: &str, timeout_secs: u64) -> Result<()> {
        let result = self
            .client()?
            .wait()
            .at_most(Duration::from_secs(timeout_secs))
            .for_element(Locator::Css(selector))
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(CmdError::WaitTimeout) => Err(ScrapeError::NavigationTimeout {
                selector: selector.to_string(),
                timeout_secs,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        let element = self.client()?.find(Locator::Css(selector)).await?;
        element.click().await?;
        Ok(())
    }

    async fn click_matching_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let elements = self.client()?.find_all(Locator::Css(selector)).await?;
        for element in elements {
            if element.text().await?.trim() == text {
                element.click().await?;
                return Ok(());
            }
        }

        Err(ScrapeError::Extraction {
            field: selector.to_string(),
            context: format!("no element with text `{}`", text),
        })
    }

    async fn current_html(&mut self) -> Result<String> {
        Ok(self.client()?.source().await?)
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(client) = self.client.take() {
            client.close().await?;
        }
        Ok(())
    }
}
