//! HTTP client for the grade backend.
//!
//! Every endpoint takes a JSON body and answers with `{ "success": bool, ... }`;
//! the body is parsed whatever the HTTP status is.

use crate::config::PanelConfig;
use crate::errors::ClientError;
use crate::models::{
    ApiResult, ChartData, ChartQuery, GpaQuery, GpaSummary, RecordSubmission, SaveConfirmation,
};
use reqwest::{Client, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

pub const SAVE_RECORD_PATH: &str = "/api/save-record";
pub const CALCULATE_GPA_PATH: &str = "/api/calculate-gpa";
pub const GET_CHART_PATH: &str = "/api/get-chart";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &PanelConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| ClientError::config(format!("http client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
        })
    }

    pub async fn save_record(
        &self,
        record: &RecordSubmission,
    ) -> Result<ApiResult<SaveConfirmation>, ClientError> {
        self.post(SAVE_RECORD_PATH, record).await
    }

    pub async fn calculate_gpa(&self, query: &GpaQuery) -> Result<ApiResult<GpaSummary>, ClientError> {
        self.post(CALCULATE_GPA_PATH, query).await
    }

    pub async fn get_chart(&self, query: &ChartQuery) -> Result<ApiResult<ChartData>, ClientError> {
        self.post(GET_CHART_PATH, query).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<ApiResult<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| ClientError::config(format!("{path}: {err}")))?;

        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        debug!("{path} answered {status}");

        let bytes = response.bytes().await?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|err| ClientError::decode(format!("{status} with a non-JSON body ({err})")))?;
        ApiResult::from_value(value)
    }
}
