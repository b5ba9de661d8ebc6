//! Short code generation, validation, and collision-bounded allocation.
//!
//! Generated codes draw from the 62-character alphanumeric alphabet only.
//! User-supplied codes are validated against a wider format that also
//! permits hyphen and underscore.

use regex::Regex;
use std::future::Future;
use std::sync::LazyLock;
use thiserror::Error;

/// Length of generated codes when the caller has no preference.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Candidate ceiling for [`allocate`] when the caller has no preference.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Generation alphabet. Narrower than the accepted format: generated codes
/// never contain `-` or `_`.
const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Bytes at or above this are redrawn so every alphabet index stays
/// equally likely (248 = 4 * 62).
const REJECTION_LIMIT: u8 = 248;

/// Accepted short code format for user-supplied codes.
static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{4,20}$").unwrap());

/// Failure modes of [`allocate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocateError {
    /// Every candidate up to the attempt ceiling was already taken.
    ///
    /// At 62^8 combinations this indicates the uniqueness check is
    /// misbehaving rather than a crowded keyspace; callers surface it as a
    /// retryable server error.
    #[error("short code space exhausted after {attempts} attempts")]
    Exhausted { attempts: usize },

    /// The caller-supplied uniqueness check itself failed.
    #[error("uniqueness check failed: {0}")]
    Check(String),
}

/// Validates a user-supplied short code: 4-20 characters from
/// `[A-Za-z0-9_-]`.
pub fn is_valid_short_code(code: &str) -> bool {
    SHORT_CODE_REGEX.is_match(code)
}

/// Generates a random alphanumeric code of the given length.
///
/// Uses the OS CSPRNG via `getrandom`; codes double as public handles and
/// must not be guessable.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code(length: usize) -> String {
    let mut code = String::with_capacity(length);
    let mut buffer = [0u8; 32];

    while code.len() < length {
        getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

        for &byte in buffer.iter() {
            if code.len() == length {
                break;
            }
            if byte < REJECTION_LIMIT {
                code.push(ALPHABET[(byte % 62) as usize] as char);
            }
        }
    }

    code
}

/// Allocates a code the uniqueness check reports as free.
///
/// Draws up to `max_attempts` random candidates of `length` characters and
/// returns the first one for which `is_taken` reports `false`. The retry
/// loop is collision *avoidance* only — two concurrent allocations can
/// still race to the same candidate, and the persistence layer's unique
/// constraint is what rejects the loser at insert time.
///
/// # Errors
///
/// - [`AllocateError::Exhausted`] after exactly `max_attempts` taken
///   candidates
/// - [`AllocateError::Check`] if the uniqueness check fails
pub async fn allocate<F, Fut, E>(
    length: usize,
    max_attempts: usize,
    mut is_taken: F,
) -> Result<String, AllocateError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
    E: std::fmt::Display,
{
    for _ in 0..max_attempts {
        let candidate = generate_code(length);

        match is_taken(candidate.clone()).await {
            Ok(false) => return Ok(candidate),
            Ok(true) => continue,
            Err(e) => return Err(AllocateError::Check(e.to_string())),
        }
    }

    Err(AllocateError::Exhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_generate_code_has_requested_length() {
        assert_eq!(generate_code(8).len(), 8);
        assert_eq!(generate_code(4).len(), 4);
        assert_eq!(generate_code(20).len(), 20);
    }

    #[test]
    fn test_generate_code_alphanumeric_only() {
        for _ in 0..100 {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            assert!(
                code.chars().all(|c| c.is_ascii_alphanumeric()),
                "generated code '{}' contains non-alphanumeric characters",
                code
            );
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generate_code(DEFAULT_CODE_LENGTH));
        }

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_is_valid_short_code_too_short() {
        assert!(!is_valid_short_code("ab"));
    }

    #[test]
    fn test_is_valid_short_code_accepts_hyphen_underscore() {
        assert!(is_valid_short_code("valid_code-1"));
    }

    #[test]
    fn test_is_valid_short_code_rejects_space() {
        assert!(!is_valid_short_code("bad code"));
    }

    #[test]
    fn test_is_valid_short_code_bounds() {
        assert!(is_valid_short_code("abcd"));
        assert!(is_valid_short_code(&"a".repeat(20)));
        assert!(!is_valid_short_code("abc"));
        assert!(!is_valid_short_code(&"a".repeat(21)));
        assert!(!is_valid_short_code(""));
        assert!(!is_valid_short_code("with!bang"));
    }

    #[tokio::test]
    async fn test_allocate_returns_first_free_candidate() {
        let code = allocate(8, 10, |_| async { Ok::<_, Infallible>(false) })
            .await
            .unwrap();

        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_allocate_exhausts_after_exactly_max_attempts() {
        let calls = AtomicUsize::new(0);

        let result = allocate(8, 10, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, Infallible>(true) }
        })
        .await;

        assert_eq!(result, Err(AllocateError::Exhausted { attempts: 10 }));
        assert_eq!(calls.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_allocate_skips_taken_candidates() {
        let calls = AtomicUsize::new(0);

        let code = allocate(8, 10, |_| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, Infallible>(n < 3) }
        })
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(code.len(), 8);
    }

    #[tokio::test]
    async fn test_allocate_propagates_check_failure() {
        let result = allocate(8, 10, |_| async { Err::<bool, _>("connection reset") }).await;

        assert_eq!(
            result,
            Err(AllocateError::Check("connection reset".to_string()))
        );
    }
}
