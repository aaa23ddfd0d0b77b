use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
mod password;
mod token;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}
