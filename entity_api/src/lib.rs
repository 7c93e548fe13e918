pub use entity::{emotion_analyses, sentiment, user_sessions, Id};

pub mod emotion_analysis;
pub mod error;
pub mod user_session;

/// Upper bound on rows returned by any list query, whatever the caller asks for.
pub const MAX_QUERY_LIMIT: u64 = 1000;

pub(crate) fn clamp_limit(limit: u64) -> u64 {
    limit.clamp(1, MAX_QUERY_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_keeps_requests_within_bounds() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(50), 50);
        assert_eq!(clamp_limit(5_000), MAX_QUERY_LIMIT);
    }
}
