pub mod error;
pub mod models;
pub mod validation;
pub mod caller;
pub mod registry;

pub use error::{Error, ErrorCode, ErrorResponse};
pub use models::*;
pub use validation::*;
pub use caller::*;
pub use registry::{Registry, Rejection};

#[cfg(test)]
mod tests;
