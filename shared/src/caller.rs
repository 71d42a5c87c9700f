use uuid::Uuid;
use crate::models::Principal;

pub const PRINCIPAL_HEADER: &str = "X-Principal";

#[derive(Debug, Clone)]
pub struct Caller {
    pub request_id: Uuid,
    pub principal: Principal,
}

pub fn generate_server_fingerprint(ip: &str, user_agent: Option<&str>) -> String {
    use base64::engine::general_purpose::URL_SAFE;
    use base64::Engine;
    use sha2::{Sha256, Digest};

    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    if let Some(ua) = user_agent {
        hasher.update(ua.as_bytes());
    }
    URL_SAFE.encode(hasher.finalize())
}

/// An upstream-verified principal wins; otherwise the caller is identified by
/// a fingerprint of its address and user agent.
pub fn resolve_principal(principal_header: Option<&str>, ip: &str, user_agent: Option<&str>) -> Principal {
    match principal_header.map(str::trim).filter(|p| !p.is_empty()) {
        Some(principal) => Principal::new(principal),
        None => Principal::new(generate_server_fingerprint(ip, user_agent)),
    }
}

#[cfg(feature = "backend")]
mod backend_impl {
    use super::*;
    use rocket::request::{FromRequest, Outcome};
    use rocket::Request;

    #[rocket::async_trait]
    impl<'r> FromRequest<'r> for Caller {
        type Error = ();

        async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
            let headers = req.headers();
            let ip = headers.get_one("X-Real-IP")
                .or_else(|| headers.get_one("X-Forwarded-For"))
                .unwrap_or("0.0.0.0");

            let principal = resolve_principal(
                headers.get_one(PRINCIPAL_HEADER),
                ip,
                headers.get_one("User-Agent"),
            );

            Outcome::Success(Caller {
                request_id: Uuid::new_v4(),
                principal,
            })
        }
    }
}
