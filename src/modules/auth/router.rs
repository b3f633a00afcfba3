use crate::state::AppState;
use axum::{Router, routing::post};

use super::controller::login_admin;

pub fn init_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login_admin))
}
