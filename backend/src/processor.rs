use shared::models::*;
use tracing::{debug, info};
use crate::error::ApiError;
use crate::store::{lock, RegistryStore};

pub struct RegistryProcessor;

impl RegistryProcessor {
    pub fn register_user(store: &RegistryStore, caller: &Principal, name: &str) -> Result<User, ApiError> {
        let mut registry = lock(store)?;
        match registry.try_register_user(caller, name.trim()) {
            Ok(user) => {
                info!("Registered user {}", caller);
                Ok(user.clone())
            }
            Err(rejection) => {
                debug!("Registration rejected for {}: {}", caller, rejection);
                Err(rejection.into())
            }
        }
    }

    pub fn get_user(store: &RegistryStore, identity: &Principal) -> Result<Option<User>, ApiError> {
        Ok(lock(store)?.get_user(identity).cloned())
    }

    pub fn register_candidate(
        store: &RegistryStore,
        caller: &Principal,
        request: &RegisterCandidateRequest,
    ) -> Result<CandidateId, ApiError> {
        let mut registry = lock(store)?;
        let id = registry
            .try_register_candidate(caller, request.name.trim(), request.manifesto.as_str())
            .map_err(|rejection| {
                debug!("Candidate registration rejected for {}: {}", caller, rejection);
                ApiError::from(rejection)
            })?;
        info!("Candidate {} registered by {}", id, caller);
        Ok(id)
    }

    pub fn get_candidate(store: &RegistryStore, id: CandidateId) -> Result<Option<Candidate>, ApiError> {
        Ok(lock(store)?.get_candidate(id).cloned())
    }

    pub fn list_candidates(store: &RegistryStore) -> Result<Vec<Candidate>, ApiError> {
        Ok(lock(store)?.list_candidates().cloned().collect())
    }

    pub fn create_proposal(store: &RegistryStore, caller: &Principal, description: &str) -> Result<ProposalId, ApiError> {
        let mut registry = lock(store)?;
        let id = registry
            .try_create_proposal(caller, description.trim())
            .map_err(|rejection| {
                debug!("Proposal rejected for {}: {}", caller, rejection);
                ApiError::from(rejection)
            })?;
        info!("Proposal {} created by {}", id, caller);
        Ok(id)
    }

    /// The vote record and the counter bump happen under one lock, and the
    /// returned count is read before it is released.
    pub fn cast_vote(store: &RegistryStore, caller: &Principal, proposal_id: ProposalId) -> Result<VoteCount, ApiError> {
        let mut registry = lock(store)?;
        match registry.try_cast_vote(caller, proposal_id) {
            Ok(proposal) => {
                info!("Vote by {} recorded on proposal {} ({} total)", caller, proposal.id, proposal.votes);
                Ok(VoteCount { proposal_id: proposal.id, votes: proposal.votes })
            }
            Err(rejection) => {
                debug!("Vote by {} on proposal {} rejected: {}", caller, proposal_id, rejection);
                Err(rejection.into())
            }
        }
    }

    pub fn list_proposals(store: &RegistryStore) -> Result<Vec<Proposal>, ApiError> {
        Ok(lock(store)?.list_proposals().cloned().collect())
    }

    pub fn get_proposal(store: &RegistryStore, id: ProposalId) -> Result<Option<Proposal>, ApiError> {
        Ok(lock(store)?.get_proposal(id).cloned())
    }

    pub fn get_vote_count(store: &RegistryStore, proposal_id: ProposalId) -> Result<VoteCount, ApiError> {
        let votes = lock(store)?.get_vote_count(proposal_id);
        Ok(VoteCount { proposal_id, votes })
    }

    pub fn get_user_votes(store: &RegistryStore, identity: &Principal) -> Result<Vec<Vote>, ApiError> {
        Ok(lock(store)?.get_user_votes(identity).to_vec())
    }

    pub fn stats(store: &RegistryStore) -> Result<RegistryStats, ApiError> {
        Ok(lock(store)?.stats())
    }
}
