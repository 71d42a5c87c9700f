use crate::error::ApiError;

pub fn parse_id(id: &str) -> Result<u64, ApiError> {
    id.trim().parse().map_err(|_| ApiError::InvalidId)
}

pub fn rate_limit_key(operation: &str, principal: &shared::Principal) -> String {
    format!("{}:{}", operation, principal)
}
