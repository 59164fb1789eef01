use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;

use super::error::{AttemptError, FetchError};

/// 连接丢失时重试一次
///
/// 第一次尝试出现连接层故障时，等待 `delay` 后再试一次；第二次仍为连接故障时
/// 返回 `UpstreamUnavailable`。其它错误直接返回，不重试。
pub async fn retry_on_connection_lost<T, F, Fut>(
    delay: Duration,
    mut attempt: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    match attempt().await {
        Ok(value) => return Ok(value),
        Err(AttemptError::Failed(err)) => return Err(err),
        Err(AttemptError::ConnectionLost(reason)) => {
            tracing::warn!(
                "[Retry] Connection lost ({}), retrying once in {}ms",
                reason,
                delay.as_millis()
            );
        }
    }

    tokio::time::sleep(delay).await;

    match attempt().await {
        Ok(value) => Ok(value),
        Err(AttemptError::Failed(err)) => Err(err),
        Err(AttemptError::ConnectionLost(reason)) => Err(FetchError::UpstreamUnavailable(
            format!("connection lost twice: {}", reason),
        )),
    }
}

/// 判断 reqwest 错误是否属于连接层故障
pub fn is_connection_lost(err: &reqwest::Error) -> bool {
    if err.is_connect() {
        return true;
    }
    if err.is_timeout() {
        return false;
    }

    let mut source = StdError::source(err);
    while let Some(cause) = source {
        if let Some(hyper_err) = cause.downcast_ref::<hyper::Error>() {
            if hyper_err.is_incomplete_message() || hyper_err.is_closed() {
                return true;
            }
        }
        if let Some(io_err) = cause.downcast_ref::<std::io::Error>() {
            use std::io::ErrorKind::*;
            if matches!(
                io_err.kind(),
                ConnectionReset
                    | ConnectionAborted
                    | ConnectionRefused
                    | BrokenPipe
                    | NotConnected
                    | UnexpectedEof
            ) {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DELAY: Duration = Duration::from_millis(1);

    #[tokio::test]
    async fn success_needs_single_attempt() {
        let calls = AtomicUsize::new(0);
        let result = retry_on_connection_lost(DELAY, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, AttemptError>(7) }
        })
        .await;

        assert_eq!(result.expect("ok"), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_once_after_connection_loss() {
        let calls = AtomicUsize::new(0);
        let result = retry_on_connection_lost(DELAY, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(AttemptError::ConnectionLost("reset".into()))
                } else {
                    Ok("second")
                }
            }
        })
        .await;

        assert_eq!(result.expect("ok"), "second");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_two_connection_losses() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), _> = retry_on_connection_lost(DELAY, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AttemptError::ConnectionLost("reset".into())) }
        })
        .await;

        assert!(matches!(result, Err(FetchError::UpstreamUnavailable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn other_failures_are_not_retried() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), _> = retry_on_connection_lost(DELAY, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AttemptError::Failed(FetchError::UpstreamHttp { status: 500 })) }
        })
        .await;

        assert!(matches!(result, Err(FetchError::UpstreamHttp { status: 500 })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn decode_failure_after_retry_is_surfaced() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), _> = retry_on_connection_lost(DELAY, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(AttemptError::ConnectionLost("eof".into()))
                } else {
                    Err(AttemptError::Failed(FetchError::UpstreamDecode(
                        "bad json".into(),
                    )))
                }
            }
        })
        .await;

        assert!(matches!(result, Err(FetchError::UpstreamDecode(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
