//! HTTP download and timing

#[cfg(test)]
mod integration_tests;

use crate::{
    error::{AppError, Result},
    logging::Logger,
    models::{config::download_url, Measurement},
};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, Url};
use std::time::Instant;

/// Fetches a test payload and measures the transfer
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `<server>/dl-<size_kb>`.
    ///
    /// With `dry_run` the request is still issued but the body is not read
    /// and fixed values are returned.
    async fn download(&self, server: &str, size_kb: u64, dry_run: bool) -> Result<Measurement>;
}

/// [`Downloader`] backed by reqwest
pub struct HttpDownloader {
    client: Client,
    logger: Logger,
}

impl HttpDownloader {
    /// Create a downloader with the HTTP client's default timeouts
    pub fn new(logger: Logger) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", crate::PKG_NAME, crate::VERSION))
            .build()?;

        Ok(Self::with_client(client, logger))
    }

    pub fn with_client(client: Client, logger: Logger) -> Self {
        Self { client, logger }
    }

    /// Read and discard the body chunk by chunk, returning the byte count
    async fn drain(&self, response: reqwest::Response) -> Result<u64> {
        let mut stream = response.bytes_stream();
        let mut received: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| AppError::from_reqwest("Error reading response body", e))?;
            received += chunk.len() as u64;
            self.logger.trace("Received chunk")
                .field("chunk_bytes", chunk.len())
                .field("total_bytes", received)
                .log();
        }

        Ok(received)
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, server: &str, size_kb: u64, dry_run: bool) -> Result<Measurement> {
        let url = Url::parse(&download_url(server, size_kb))?;
        self.logger.info(&format!("Starting download from {:?}", url.as_str()))
            .field("dry_run", dry_run)
            .log();

        // Status codes are not inspected; any response counts.
        let response = self.client.get(url).send().await
            .map_err(|e| AppError::from_reqwest(format!("Error downloading data from {}", server), e))?;

        self.logger.debug("Response received")
            .field("status", response.status().as_u16())
            .field("content_length", response.content_length())
            .log();

        let measurement = if dry_run {
            Measurement::dry_run()
        } else {
            let start = Instant::now();
            let bytes = self.drain(response).await?;
            Measurement::new(bytes, start.elapsed())
        };

        self.logger.info(&format!(
            "{} bytes downloaded in {}",
            measurement.bytes,
            crate::output::format_duration(measurement.elapsed)
        ))
            .log();

        Ok(measurement)
    }
}
