use serde::{Deserialize, Serialize};

use crate::domain::role::Role;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// What a successful login tells the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub role: Role,
    pub specialty: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthStatus {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}
