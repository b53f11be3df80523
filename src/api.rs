//! 登録APIクライアント（reqwest）

use geodais_common::{Error, RecordSource, Registro, Result};

pub struct HttpRecordSource {
    client: reqwest::Client,
    url: String,
}

impl HttpRecordSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RecordSource for HttpRecordSource {
    async fn fetch_registros(&self) -> Result<Vec<Registro>> {
        log::debug!("GET {}", self.url);
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(status.as_u16()));
        }

        let body = resp.text().await.map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }
}
