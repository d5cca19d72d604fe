use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        claims::Role,
        dto::{LoginRequest, RegisterRequest, TokenResponse},
        extractors::AuthPrincipal,
        password::{check_password_policy, hash_password, verify_password},
        principal::Principal,
        repo::User,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn issue_for(
    state: &AppState,
    uid: &str,
    role: Role,
) -> Result<Json<TokenResponse>, (StatusCode, String)> {
    let token = state.tokens.issue_token(uid, role).map_err(|e| {
        error!(error = %e, uid, "jwt issue failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(Json(TokenResponse {
        token,
        token_type: "Bearer",
        expires_in: state.tokens.validity().whole_seconds(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, (StatusCode, String)> {
    payload.uid = payload.uid.trim().to_string();

    if payload.uid.is_empty() {
        warn!("register without uid");
        return Err((StatusCode::BAD_REQUEST, "Missing uid".into()));
    }

    if let Err(msg) = check_password_policy(&payload.password) {
        warn!(uid = %payload.uid, "password rejected by policy");
        return Err((StatusCode::BAD_REQUEST, msg));
    }

    match User::find_by_uid(&state.db, &payload.uid).await {
        Ok(None) => {}
        Ok(Some(_)) => {
            warn!(uid = %payload.uid, "uid already registered");
            return Err((StatusCode::CONFLICT, "Uid already registered".into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_uid failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    let user = User::create(&state.db, &payload.uid, &hash, Role::Customer)
        .await
        .map_err(|e| {
            error!(error = %e, "create user failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    info!(uid = %user.uid, user_id = %user.id, "user registered");
    issue_for(&state, &user.uid, Role::Customer)
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, (StatusCode, String)> {
    payload.uid = payload.uid.trim().to_string();

    if payload.uid.is_empty() {
        warn!("login without uid");
        return Err((StatusCode::BAD_REQUEST, "Missing uid".into()));
    }

    let user = match User::find_by_uid(&state.db, &payload.uid).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(uid = %payload.uid, "login unknown uid");
            return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_uid failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    let ok = match verify_password(&payload.password, &user.password_hash) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "verify_password failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    if !ok {
        warn!(uid = %user.uid, "login invalid password");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
    }

    let role = user.role().map_err(|e| {
        error!(error = %e, uid = %user.uid, "stored role is invalid");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    info!(uid = %user.uid, role = %role, "user logged in");
    issue_for(&state, &user.uid, role)
}

pub async fn get_me(AuthPrincipal(principal): AuthPrincipal) -> Json<Principal> {
    Json(principal)
}
