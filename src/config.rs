use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;

/// 应用配置总结构
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub event_handler: EventHandlerSettings,
    pub azure: AzureSettings,
}

/// 服务相关配置（监听地址、端口、路由前缀）
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// 所有路由挂载的前缀，空字符串表示挂在根路径
    pub base_path: String,
    /// 单个入站请求的最长处理时间（单位：秒）
    pub request_timeout_secs: u64,
}

/// 上游事件处理服务
#[derive(Debug, Deserialize, Clone)]
pub struct EventHandlerSettings {
    pub url: String,
    /// 换取令牌时使用的目标 client id
    pub client_id: String,
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
    /// 连接丢失后重试前的等待时间
    pub retry_delay_ms: u64,
}

impl EventHandlerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

#[derive(Deserialize, Clone)]
pub struct AzureSettings {
    pub token_endpoint: String,
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for AzureSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureSettings")
            .field("token_endpoint", &self.token_endpoint)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl Settings {
    /// 加载配置：默认值、可选配置文件、环境变量覆盖
    pub fn new() -> anyhow::Result<Self> {
        let builder = Self::defaults()?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("TMS").separator("__"));
        Self::build(builder)
    }

    /// 从 TOML 文本加载（不读取环境变量）
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let builder = Self::defaults()?.add_source(File::from_str(contents, FileFormat::Toml));
        Self::build(builder)
    }

    fn defaults() -> anyhow::Result<ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.base_path", "/tms-event-api")?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("event_handler.timeout_ms", 10_000)?
            .set_default("event_handler.connect_timeout_ms", 2_000)?
            .set_default("event_handler.retry_delay_ms", 100)?)
    }

    fn build(builder: ConfigBuilder<config::builder::DefaultState>) -> anyhow::Result<Self> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        url::Url::parse(&settings.event_handler.url).map_err(|e| {
            anyhow::anyhow!(
                "event_handler.url '{}' is not a valid url: {}",
                settings.event_handler.url,
                e
            )
        })?;
        // azure 配置没有默认值，缺失时在启动阶段失败
        url::Url::parse(&settings.azure.token_endpoint).map_err(|e| {
            anyhow::anyhow!(
                "azure.token_endpoint '{}' is not a valid url: {}",
                settings.azure.token_endpoint,
                e
            )
        })?;
        if settings.azure.client_id.is_empty() {
            anyhow::bail!("azure.client_id must not be empty");
        }
        Ok(settings)
    }
}
