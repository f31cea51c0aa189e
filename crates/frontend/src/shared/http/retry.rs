use super::error::ApiError;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// How many extra attempts a request gets on transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
}

impl RetryPolicy {
    pub const NONE: RetryPolicy = RetryPolicy { retries: 0 };

    /// Only GET is retried; writes are never replayed.
    pub fn for_method(method: HttpMethod, get_retries: u32) -> Self {
        match method {
            HttpMethod::Get => RetryPolicy {
                retries: get_retries,
            },
            _ => RetryPolicy::NONE,
        }
    }
}

/// Run `op` (given the 0-based attempt number) until it succeeds, fails
/// with a non-transient error, or the policy is exhausted.
pub async fn retry<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, ApiError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0;
    loop {
        match op(attempt).await {
            Err(e) if e.is_transient() && attempt < policy.retries => {
                log::warn!("Attempt {} failed ({:?}), retrying", attempt + 1, e);
                attempt += 1;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    #[test]
    fn test_only_get_is_retried() {
        assert_eq!(RetryPolicy::for_method(HttpMethod::Get, 1).retries, 1);
        for method in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch, HttpMethod::Delete] {
            assert_eq!(RetryPolicy::for_method(method, 1), RetryPolicy::NONE);
        }
    }

    #[test]
    fn test_transient_failure_retried_once() {
        let calls = Cell::new(0);
        let result = block_on(retry(RetryPolicy { retries: 1 }, |attempt| {
            calls.set(calls.get() + 1);
            async move {
                if attempt == 0 {
                    Err(ApiError::Network("reset".into()))
                } else {
                    Ok(7)
                }
            }
        }));
        assert_eq!(result, Ok(7));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_gives_up_after_policy() {
        let calls = Cell::new(0);
        let result: Result<(), ApiError> = block_on(retry(RetryPolicy { retries: 1 }, |_| {
            calls.set(calls.get() + 1);
            async { Err(ApiError::ServerUnavailable(503)) }
        }));
        assert_eq!(result, Err(ApiError::ServerUnavailable(503)));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_permanent_failure_not_retried() {
        let calls = Cell::new(0);
        let result: Result<(), ApiError> = block_on(retry(RetryPolicy { retries: 3 }, |_| {
            calls.set(calls.get() + 1);
            async { Err(ApiError::NotFound) }
        }));
        assert_eq!(result, Err(ApiError::NotFound));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_no_retry_policy() {
        let calls = Cell::new(0);
        let _ = block_on(retry(RetryPolicy::NONE, |_| {
            calls.set(calls.get() + 1);
            async { Err::<(), _>(ApiError::Network("down".into())) }
        }));
        assert_eq!(calls.get(), 1);
    }
}
