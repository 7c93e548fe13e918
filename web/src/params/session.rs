use serde::Deserialize;
use utoipa::IntoParams;

pub(crate) const DEFAULT_SESSIONS_LIMIT: u64 = 20;

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct IndexParams {
    /// Maximum number of sessions to return, most recently active first.
    pub(crate) limit: Option<u64>,
}

impl IndexParams {
    pub(crate) fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_SESSIONS_LIMIT)
    }
}
