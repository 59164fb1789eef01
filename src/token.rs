//! 访问令牌获取
//!
//! 核心流程只依赖 [`AccessTokenFetcher`] trait；[`AzureTokenFetcher`] 是用于部署的
//! client-credentials 实现，不做缓存。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// 不透明的 Bearer 令牌
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_in: Option<Duration>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expires_in: None,
        }
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// 为事件处理服务换取访问令牌
#[async_trait]
pub trait AccessTokenFetcher: Send + Sync {
    async fn fetch_token_for_event_handler(&self) -> anyhow::Result<AccessToken>;
}

#[derive(Debug, Clone)]
pub struct AzureTokenFetcher {
    client: Client,
    token_endpoint: String,
    client_id: String,
    client_secret: String,
    event_handler_client_id: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl AzureTokenFetcher {
    pub fn new(
        client: Client,
        token_endpoint: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        event_handler_client_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            token_endpoint: token_endpoint.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            event_handler_client_id: event_handler_client_id.into(),
        }
    }

    /// `cluster:namespace:app` 形式的 client id 转换为 `api://cluster.namespace.app/.default`
    fn scope(&self) -> String {
        format!(
            "api://{}/.default",
            self.event_handler_client_id.replace(':', ".")
        )
    }
}

#[async_trait]
impl AccessTokenFetcher for AzureTokenFetcher {
    async fn fetch_token_for_event_handler(&self) -> anyhow::Result<AccessToken> {
        let scope = self.scope();
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", scope.as_str()),
        ];

        let response = self
            .client
            .post(&self.token_endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("token endpoint request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("token endpoint responded with status {}", status.as_u16());
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("invalid token response: {}", e))?;

        tracing::debug!("[Token] Fetched token for scope {}", scope);
        Ok(AccessToken {
            value: body.access_token,
            expires_in: body.expires_in.map(Duration::from_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_targets_event_handler() {
        let fetcher = AzureTokenFetcher::new(
            Client::new(),
            "http://localhost/token",
            "me",
            "secret",
            "dev-gcp:min-side:tms-event-handler",
        );
        assert_eq!(
            fetcher.scope(),
            "api://dev-gcp.min-side.tms-event-handler/.default"
        );
    }

    #[test]
    fn debug_hides_token_value() {
        let token = AccessToken::new("TokenSmoken");
        assert!(!format!("{:?}", token).contains("TokenSmoken"));
    }
}
