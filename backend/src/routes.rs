use std::sync::Arc;
use rocket::{State, get, post, http::Status, serde::json::Json};
use tracing::instrument;
use shared::{models::*, caller::Caller, validation::*};
use crate::{
    config::AppConfig,
    error::ApiError,
    processor::RegistryProcessor,
    rate_limiter::RateLimiter,
    store::{new_store, RegistryStore},
    utils::{parse_id, rate_limit_key},
};

pub struct AppState {
    pub registry: Arc<RegistryStore>,
    pub mutation_limiter: Arc<RateLimiter>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_registry(config, shared::Registry::new())
    }

    pub fn with_registry(config: AppConfig, registry: shared::Registry) -> Self {
        Self {
            registry: Arc::new(new_store(registry)),
            mutation_limiter: Arc::new(RateLimiter::new(config.mutation_limit, config.mutation_window_minutes)),
            config,
        }
    }

    fn check_rate_limit(&self, operation: &str, caller: &Caller) -> Result<(), ApiError> {
        self.mutation_limiter.check_rate_limit(&rate_limit_key(operation, &caller.principal))
    }
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

#[instrument(skip(state, request, caller), fields(request_id = %caller.request_id, principal = %caller.principal))]
#[post("/users", format = "json", data = "<request>")]
pub async fn register_user(
    state: &State<AppState>,
    request: Json<RegisterUserRequest>,
    caller: Caller,
) -> Result<Json<RegistrationResponse>, ApiError> {
    let request = request.into_inner();
    validate_user_request(&request)?;
    state.check_rate_limit("register_user", &caller)?;

    let user = RegistryProcessor::register_user(&state.registry, &caller.principal, &request.name)?;
    Ok(Json(RegistrationResponse { registered: true, user }))
}

#[get("/me")]
pub async fn get_me(state: &State<AppState>, caller: Caller) -> Result<Json<Option<User>>, ApiError> {
    RegistryProcessor::get_user(&state.registry, &caller.principal).map(Json)
}

#[get("/users/<identity>")]
pub async fn get_user(state: &State<AppState>, identity: &str) -> Result<Json<Option<User>>, ApiError> {
    RegistryProcessor::get_user(&state.registry, &Principal::new(identity)).map(Json)
}

#[get("/me/votes")]
pub async fn get_my_votes(state: &State<AppState>, caller: Caller) -> Result<Json<Vec<Vote>>, ApiError> {
    RegistryProcessor::get_user_votes(&state.registry, &caller.principal).map(Json)
}

#[get("/users/<identity>/votes")]
pub async fn get_user_votes(state: &State<AppState>, identity: &str) -> Result<Json<Vec<Vote>>, ApiError> {
    RegistryProcessor::get_user_votes(&state.registry, &Principal::new(identity)).map(Json)
}

#[instrument(skip(state, request, caller), fields(request_id = %caller.request_id, principal = %caller.principal))]
#[post("/candidates", format = "json", data = "<request>")]
pub async fn register_candidate(
    state: &State<AppState>,
    request: Json<RegisterCandidateRequest>,
    caller: Caller,
) -> Result<Json<CreatedResponse>, ApiError> {
    let request = request.into_inner();
    validate_candidate_request(&request)?;
    state.check_rate_limit("register_candidate", &caller)?;

    let id = RegistryProcessor::register_candidate(&state.registry, &caller.principal, &request)?;
    Ok(Json(CreatedResponse { id }))
}

#[get("/candidates")]
pub async fn list_candidates(state: &State<AppState>) -> Result<Json<Vec<Candidate>>, ApiError> {
    RegistryProcessor::list_candidates(&state.registry).map(Json)
}

#[get("/candidates/<id>")]
pub async fn get_candidate(state: &State<AppState>, id: &str) -> Result<Json<Option<Candidate>>, ApiError> {
    let id = parse_id(id)?;
    RegistryProcessor::get_candidate(&state.registry, id).map(Json)
}

#[instrument(skip(state, request, caller), fields(request_id = %caller.request_id, principal = %caller.principal))]
#[post("/proposals", format = "json", data = "<request>")]
pub async fn create_proposal(
    state: &State<AppState>,
    request: Json<CreateProposalRequest>,
    caller: Caller,
) -> Result<Json<CreatedResponse>, ApiError> {
    let request = request.into_inner();
    validate_proposal_request(&request)?;
    state.check_rate_limit("create_proposal", &caller)?;

    let id = RegistryProcessor::create_proposal(&state.registry, &caller.principal, &request.description)?;
    Ok(Json(CreatedResponse { id }))
}

#[get("/proposals")]
pub async fn list_proposals(state: &State<AppState>) -> Result<Json<Vec<Proposal>>, ApiError> {
    RegistryProcessor::list_proposals(&state.registry).map(Json)
}

#[get("/proposals/<id>")]
pub async fn get_proposal(state: &State<AppState>, id: &str) -> Result<Json<Option<Proposal>>, ApiError> {
    let id = parse_id(id)?;
    RegistryProcessor::get_proposal(&state.registry, id).map(Json)
}

#[instrument(skip(state, caller), fields(request_id = %caller.request_id, principal = %caller.principal))]
#[post("/proposals/<id>/votes")]
pub async fn cast_vote(
    state: &State<AppState>,
    id: &str,
    caller: Caller,
) -> Result<Json<VoteCount>, ApiError> {
    let proposal_id = parse_id(id)?;
    state.check_rate_limit("cast_vote", &caller)?;

    RegistryProcessor::cast_vote(&state.registry, &caller.principal, proposal_id).map(Json)
}

#[get("/proposals/<id>/votes")]
pub async fn get_vote_count(state: &State<AppState>, id: &str) -> Result<Json<VoteCount>, ApiError> {
    let id = parse_id(id)?;
    RegistryProcessor::get_vote_count(&state.registry, id).map(Json)
}

#[get("/stats")]
pub async fn stats(state: &State<AppState>) -> Result<Json<RegistryStats>, ApiError> {
    RegistryProcessor::stats(&state.registry).map(Json)
}
