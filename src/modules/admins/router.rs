use crate::modules::admins::controller::{
    get_admins, get_grouped_permissions, permanent_delete_admin, register_admin, restore_admin,
    soft_delete_admin, toggle_admin_permission, update_admin,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

pub fn init_admins_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_admins))
        .route("/permissions", get(get_grouped_permissions))
        .route("/register", post(register_admin))
        .route("/{id}", put(update_admin).delete(soft_delete_admin))
        .route("/{id}/restore", post(restore_admin))
        .route("/{id}/permanent", delete(permanent_delete_admin))
        .route("/{id}/permissions/toggle", post(toggle_admin_permission))
}
