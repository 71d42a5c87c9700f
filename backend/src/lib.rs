pub mod processor;
pub mod routes;
pub mod store;
pub mod cors;
pub mod error;
pub mod utils;
pub mod rate_limiter;
pub mod catchers;
pub mod config;
pub mod maintenance;
pub use shared::{models::*, error::*, caller::*};
pub use shared::registry::{Registry, Rejection};

use rocket::{Build, Rocket, routes, catchers};
use crate::{
    routes::*,
    cors::CORS,
    catchers::{bad_request, internal_error, not_found, unprocessable_entity},
};

/// Composition root: the registry is created once here and owned by Rocket's
/// managed state for the life of the process.
pub fn build_rocket(state: AppState) -> Rocket<Build> {
    let cors = CORS::new(state.config.cors_origin_prefix.clone());

    rocket::build()
        .attach(cors)
        .manage(state)
        .mount(
            "/api",
            routes![
                all_options,
                register_user,
                get_me,
                get_user,
                get_my_votes,
                get_user_votes,
                register_candidate,
                list_candidates,
                get_candidate,
                create_proposal,
                list_proposals,
                get_proposal,
                cast_vote,
                get_vote_count,
                stats
            ],
        )
        .register(
            "/",
            catchers![
                bad_request,
                unprocessable_entity,
                internal_error,
                not_found
            ],
        )
}
