use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use serde::{Serialize, Deserialize};
use crate::models::{Candidate, CandidateId, Principal, Proposal, ProposalId, RegistryStats, User, Vote};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Caller is not a registered user")] NotRegistered,
    #[error("Caller is registered but not approved")] NotApproved,
    #[error("Caller is already registered")] AlreadyRegistered,
    #[error("Unknown proposal {0}")] UnknownProposal(ProposalId),
    #[error("Caller already voted on proposal {0}")] AlreadyVoted(ProposalId),
}

/// In-memory registry of users, candidates, proposals and votes.
///
/// Every method runs to completion against `&mut self`, so wrapping the
/// registry in a single lock is enough to serialize all operations. In
/// particular a vote record and the matching proposal counter bump are
/// applied in the same call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registry {
    users: HashMap<Principal, User>,
    candidates: BTreeMap<CandidateId, Candidate>,
    proposals: BTreeMap<ProposalId, Proposal>,
    votes: HashMap<Principal, Vec<Vote>>,
    next_proposal_id: ProposalId,
    next_candidate_id: CandidateId,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_register_user(&mut self, caller: &Principal, name: impl Into<String>) -> Result<&User, Rejection> {
        if self.users.contains_key(caller) {
            return Err(Rejection::AlreadyRegistered);
        }
        Ok(self.users.entry(caller.clone()).or_insert_with(|| User::new(caller.clone(), name)))
    }

    /// Returns `false` without touching the existing record when `caller`
    /// is already known.
    pub fn register_user(&mut self, caller: &Principal, name: impl Into<String>) -> bool {
        self.try_register_user(caller, name).is_ok()
    }

    pub fn get_user(&self, identity: &Principal) -> Option<&User> {
        self.users.get(identity)
    }

    // `registered` is set on creation and never cleared, so NotApproved is
    // unreachable today.
    fn authorize(&self, caller: &Principal) -> Result<&User, Rejection> {
        let user = self.users.get(caller).ok_or(Rejection::NotRegistered)?;
        if !user.registered {
            return Err(Rejection::NotApproved);
        }
        Ok(user)
    }

    pub fn try_register_candidate(
        &mut self,
        caller: &Principal,
        name: impl Into<String>,
        manifesto: impl Into<String>,
    ) -> Result<CandidateId, Rejection> {
        self.authorize(caller)?;
        let id = self.next_candidate_id;
        self.candidates.insert(id, Candidate { id, name: name.into(), manifesto: manifesto.into() });
        self.next_candidate_id += 1;
        Ok(id)
    }

    pub fn register_candidate(
        &mut self,
        caller: &Principal,
        name: impl Into<String>,
        manifesto: impl Into<String>,
    ) -> Option<CandidateId> {
        self.try_register_candidate(caller, name, manifesto).ok()
    }

    pub fn get_candidate(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.get(&id)
    }

    /// Candidates in registration order.
    pub fn list_candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.values()
    }

    pub fn try_create_proposal(&mut self, caller: &Principal, description: impl Into<String>) -> Result<ProposalId, Rejection> {
        self.authorize(caller)?;
        let id = self.next_proposal_id;
        self.proposals.insert(id, Proposal::new(id, description));
        self.next_proposal_id += 1;
        Ok(id)
    }

    pub fn create_proposal(&mut self, caller: &Principal, description: impl Into<String>) -> Option<ProposalId> {
        self.try_create_proposal(caller, description).ok()
    }

    pub fn try_cast_vote(&mut self, caller: &Principal, proposal_id: ProposalId) -> Result<&Proposal, Rejection> {
        self.authorize(caller)?;
        let proposal = self.proposals.get_mut(&proposal_id)
            .ok_or(Rejection::UnknownProposal(proposal_id))?;

        let ballots = self.votes.entry(caller.clone()).or_default();
        if ballots.iter().any(|v| v.proposal_id == proposal_id) {
            return Err(Rejection::AlreadyVoted(proposal_id));
        }

        ballots.push(Vote { proposal_id, voter: caller.clone() });
        proposal.votes += 1;
        Ok(&*proposal)
    }

    pub fn cast_vote(&mut self, caller: &Principal, proposal_id: ProposalId) -> bool {
        self.try_cast_vote(caller, proposal_id).is_ok()
    }

    /// Proposals in creation order.
    pub fn list_proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }

    pub fn get_proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    /// Zero for unknown proposals as well; use [`Registry::get_proposal`] to
    /// tell the two apart.
    pub fn get_vote_count(&self, proposal_id: ProposalId) -> u64 {
        self.proposals.get(&proposal_id).map_or(0, |p| p.votes)
    }

    pub fn get_user_votes(&self, identity: &Principal) -> &[Vote] {
        self.votes.get(identity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Counts vote records pointing at `proposal_id` by walking every voter's
    /// list. Always equal to the proposal's stored counter.
    pub fn votes_for_proposal(&self, proposal_id: ProposalId) -> u64 {
        self.votes.values()
            .flatten()
            .filter(|v| v.proposal_id == proposal_id)
            .count() as u64
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            users: self.users.len(),
            candidates: self.candidates.len(),
            proposals: self.proposals.len(),
            votes: self.votes.values().map(Vec::len).sum(),
        }
    }
}
