use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedSession {
    pub session_id: String,
    pub analyses_deleted: u64,
}
