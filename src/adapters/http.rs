use crate::domain::model::{MutationRequest, MutationResponse, Table};
use crate::domain::ports::{ClaimsApi, ConfigProvider};
use crate::utils::error::{ClaimsError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const CLAIMS_LISTING_PATH: &str = "/api/claims";

/// `ClaimsApi` over HTTP with a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpClaimsApi {
    client: Client,
    base_url: Url,
}

impl HttpClaimsApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::with_timeout(config.base_url(), config.request_timeout())
    }

    /// Resolves a site-absolute path against the base URL, keeping any prefix.
    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Target of a flag or note. The claim id is one percent-encoded path
    /// segment, so `/`, `?`, `#` or `..` inside it cannot reach another claim.
    pub fn mutation_url(&self, request: &MutationRequest) -> Result<Url> {
        if matches!(request.target_id.as_str(), "" | "." | "..") {
            return Err(ClaimsError::ValidationError {
                message: format!("'{}' is not a usable claim id", request.target_id),
            });
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(request.path_segments());
        Ok(url)
    }
}

#[async_trait]
impl ClaimsApi for HttpClaimsApi {
    async fn post_mutation(&self, request: &MutationRequest) -> Result<MutationResponse> {
        let endpoint = request.endpoint();
        let url = self.mutation_url(request)?;

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.post(url).json(&request.payload()).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        match serde_json::from_str::<MutationResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(ClaimsError::UnexpectedResponse {
                endpoint,
                message: format!("status {} with a non-JSON body", status),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_claims(&self) -> Result<Table> {
        let url = self.url(CLAIMS_LISTING_PATH)?;

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(ClaimsError::UnexpectedResponse {
                endpoint: CLAIMS_LISTING_PATH.to_string(),
                message: format!("status {}", response.status()),
            });
        }

        let records: Table = response.json().await?;
        Ok(records)
    }
}
