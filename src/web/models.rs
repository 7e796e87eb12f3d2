use serde::{Deserialize, Serialize};

use crate::monitor::{Timestamp, UserId};

/// JWT claims of an authenticated session. Issuing these tokens is the
/// responsibility of the surrounding auth service, not this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub user_id: UserId,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTarget {
    pub name: String,
    pub url: String,
    pub interval_seconds: Option<i32>,
}

/// Query-string parameters of the history endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SeriesParams {
    pub since: Option<Timestamp>,
    pub step: Option<u64>,
}
