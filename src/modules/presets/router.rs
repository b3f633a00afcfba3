use crate::modules::presets::controller::{
    create_preset, delete_preset, get_presets, toggle_preset_permission, update_preset,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

pub fn init_presets_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_presets).post(create_preset))
        .route("/{id}", patch(update_preset).delete(delete_preset))
        .route("/{id}/permissions/toggle", post(toggle_preset_permission))
}
