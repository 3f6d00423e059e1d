use crate::core::CharacterSource;
use crate::utils::error::{HitError, Result};
use crate::utils::validation::looks_like_url;
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;

/// 本機 JSON 檔案
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CharacterSource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Reading character data from {}", self.path.display());
        let data = tokio::fs::read(&self.path).await?;
        Ok(data)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// HTTP(S) 端點，每次請求都重新抓取
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl CharacterSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Making request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("Response status: {}", response.status());

        if !response.status().is_success() {
            return Err(HitError::SourceStatusError {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// 依設定的位置字串選擇來源
#[derive(Debug, Clone)]
pub enum DataSource {
    File(FileSource),
    Http(HttpSource),
}

impl DataSource {
    pub fn from_location(location: &str) -> Self {
        if looks_like_url(location) {
            DataSource::Http(HttpSource::new(location))
        } else {
            DataSource::File(FileSource::new(location))
        }
    }
}

#[async_trait]
impl CharacterSource for DataSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            DataSource::File(source) => source.fetch().await,
            DataSource::Http(source) => source.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            DataSource::File(source) => source.describe(),
            DataSource::Http(source) => source.describe(),
        }
    }
}
