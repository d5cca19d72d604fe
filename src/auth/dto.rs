use serde::{Deserialize, Serialize};

/// Request body for self-registration. New accounts are always customers.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub uid: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub uid: String,
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64, // seconds
}
