//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap the backend exchange (send + body read) with one deadline
//! - Connect timeout is configured on the connector, not here
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors
//! - Dropping the wrapped future cancels the in-flight backend call

use std::future::Future;
use std::time::Duration;

use crate::http::error::{ProxyError, ProxyResult};

/// Run `exchange`, failing with [`ProxyError::Timeout`] once `deadline` elapses.
pub async fn with_deadline<F, T>(deadline: Duration, exchange: F) -> ProxyResult<T>
where
    F: Future<Output = ProxyResult<T>>,
{
    match tokio::time::timeout(deadline, exchange).await {
        Ok(result) => result,
        Err(_) => Err(ProxyError::Timeout(deadline)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_completed_result() {
        let result = with_deadline(Duration::from_secs(1), async { Ok::<_, ProxyError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn elapsed_deadline_is_timeout() {
        let result = with_deadline(Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, ProxyError>(())
        })
        .await;

        match result {
            Err(ProxyError::Timeout(d)) => assert_eq!(d, Duration::from_millis(50)),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
