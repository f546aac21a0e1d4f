//! Auth Endpoints
//!
//! Login, register, logout. Success answers carry `{ token, username }`.

use serde::Serialize;

use crate::error::Result;
use crate::models::AuthResponse;

#[derive(Serialize)]
struct LoginArgs<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterArgs<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

pub async fn login(username: &str, password: &str) -> Result<AuthResponse> {
    super::send_json("POST", "login", &LoginArgs { username, password }).await
}

pub async fn register(username: &str, email: &str, password: &str) -> Result<AuthResponse> {
    super::send_json(
        "POST",
        "register",
        &RegisterArgs {
            username,
            email,
            password,
        },
    )
    .await
}

/// Best effort; the caller clears local state regardless
pub async fn logout() -> Result<()> {
    super::send_no_content::<()>("POST", "logout", None).await
}
