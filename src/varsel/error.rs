/// 上游调用失败的分类
///
/// 携带的细节只用于日志，不会返回给调用方。
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("token request for event handler failed: {0}")]
    UpstreamAuth(String),
    #[error("event handler unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("event handler responded with status {status}")]
    UpstreamHttp { status: u16 },
    #[error("could not decode event handler response: {0}")]
    UpstreamDecode(String),
}

/// 单次请求尝试的结果，仅在重试层内部使用
#[derive(Debug)]
pub enum AttemptError {
    /// 连接层故障（被拒绝、被重置、响应未完成即断开等），允许重试一次
    ConnectionLost(String),
    Failed(FetchError),
}

impl From<FetchError> for AttemptError {
    fn from(err: FetchError) -> Self {
        AttemptError::Failed(err)
    }
}
