use crate::models::{CreateProposalRequest, RegisterCandidateRequest, RegisterUserRequest};

pub const MAX_NAME_LENGTH: usize = 64;
pub const MAX_MANIFESTO_LENGTH: usize = 1000;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Name must not be empty")]
    EmptyName,
    #[error("Name exceeds maximum length of {MAX_NAME_LENGTH}")]
    NameTooLong,
    #[error("Manifesto exceeds maximum length of {MAX_MANIFESTO_LENGTH}")]
    ManifestoTooLong,
    #[error("Description must not be empty")]
    EmptyDescription,
    #[error("Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH}")]
    DescriptionTooLong,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() { return Err(ValidationError::EmptyName); }
    if name.chars().count() > MAX_NAME_LENGTH { return Err(ValidationError::NameTooLong); }
    Ok(())
}

pub fn validate_user_request(request: &RegisterUserRequest) -> Result<(), ValidationError> {
    validate_name(&request.name)
}

pub fn validate_candidate_request(request: &RegisterCandidateRequest) -> Result<(), ValidationError> {
    validate_name(&request.name)?;
    if request.manifesto.chars().count() > MAX_MANIFESTO_LENGTH { return Err(ValidationError::ManifestoTooLong); }
    Ok(())
}

pub fn validate_proposal_request(request: &CreateProposalRequest) -> Result<(), ValidationError> {
    let description = request.description.trim();
    if description.is_empty() { return Err(ValidationError::EmptyDescription); }
    if description.chars().count() > MAX_DESCRIPTION_LENGTH { return Err(ValidationError::DescriptionTooLong); }
    Ok(())
}
