use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client};
use url::Url;

use super::error::{AttemptError, FetchError};
use super::model::Varsel;
use super::retry::{is_connection_lost, retry_on_connection_lost};
use crate::common::identity::{Fodselsnummer, FODSELSNUMMER_HEADER};
use crate::token::{AccessToken, AccessTokenFetcher};

/// 从事件处理服务读取通知
///
/// 每次调用独立获取令牌、发起请求，不共享可变状态。
#[derive(Clone)]
pub struct VarselReader {
    token_fetcher: Arc<dyn AccessTokenFetcher>,
    client: Client,
    event_handler_base_url: String,
    retry_delay: Duration,
}

impl VarselReader {
    pub fn new(
        token_fetcher: Arc<dyn AccessTokenFetcher>,
        client: Client,
        event_handler_base_url: &str,
        retry_delay: Duration,
    ) -> anyhow::Result<Self> {
        let parsed = Url::parse(event_handler_base_url).map_err(|e| {
            anyhow::anyhow!("invalid event handler url '{}': {}", event_handler_base_url, e)
        })?;
        if parsed.cannot_be_a_base() {
            anyhow::bail!(
                "event handler url '{}' cannot be a base",
                event_handler_base_url
            );
        }
        Ok(Self {
            token_fetcher,
            client,
            event_handler_base_url: event_handler_base_url.trim_end_matches('/').to_string(),
            retry_delay,
        })
    }

    fn endpoint(&self, varsel_path: &str) -> String {
        format!("{}/{}", self.event_handler_base_url, varsel_path)
    }

    pub async fn fetch_varsel(
        &self,
        fnr: &Fodselsnummer,
        varsel_path: &str,
    ) -> Result<Vec<Varsel>, FetchError> {
        let endpoint = self.endpoint(varsel_path);

        let token = self
            .token_fetcher
            .fetch_token_for_event_handler()
            .await
            .map_err(|e| FetchError::UpstreamAuth(e.to_string()))?;

        retry_on_connection_lost(self.retry_delay, || {
            self.get_with_token_and_fnr(&endpoint, &token, fnr)
        })
        .await
    }

    async fn get_with_token_and_fnr(
        &self,
        endpoint: &str,
        token: &AccessToken,
        fnr: &Fodselsnummer,
    ) -> Result<Vec<Varsel>, AttemptError> {
        let response = self
            .client
            .get(endpoint)
            .bearer_auth(&token.value)
            .header(FODSELSNUMMER_HEADER, fnr.as_str())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UpstreamHttp {
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.bytes().await.map_err(classify)?;
        serde_json::from_slice::<Vec<Varsel>>(&body)
            .map_err(|e| AttemptError::Failed(FetchError::UpstreamDecode(e.to_string())))
    }
}

fn classify(err: reqwest::Error) -> AttemptError {
    if is_connection_lost(&err) {
        AttemptError::ConnectionLost(err.to_string())
    } else {
        AttemptError::Failed(FetchError::UpstreamUnavailable(err.to_string()))
    }
}
