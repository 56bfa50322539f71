//! The HTTP surface of the API.

use std::any::Any;
use std::sync::Arc;

use axum::extract::Query;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::dashboard::{self, Snapshot};
use crate::db::DashboardStore;
use crate::error::{DashboardError, DashboardResult, UNKNOWN_SERVER_ERROR};

pub const DASHBOARD_PATH: &str = "/api/account/dashboard";
pub const HEALTH_PATH: &str = "/health";

/// Shared by every request. Holds no per-request state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DashboardStore>,
}

/// The first value given for `name`, as a browser's `searchParams.get` would pick it.
fn first_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

pub fn router(store: Arc<dyn DashboardStore>) -> Router {
    Router::new()
        .route(DASHBOARD_PATH, get(account_dashboard))
        .route(HEALTH_PATH, get(health))
        .layer(Extension(AppState { store }))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods([Method::GET]),
        )
}

async fn account_dashboard(
    Extension(state): Extension<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> DashboardResult<Json<Snapshot>> {
    let email = first_param(&params, "email").unwrap_or_default();
    let snapshot = dashboard::resolve(state.store.as_ref(), email).await?;
    info!(
        swimmers = snapshot.swimmers.len(),
        notes = snapshot.notes.len(),
        "Served dashboard snapshot"
    );

    Ok(Json(snapshot))
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        UNKNOWN_SERVER_ERROR.to_owned()
    };
    error!(%message, "Panicked while handling request");

    DashboardError::Unexpected(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn repeated_params_take_the_first_value() {
        let params = params(&[("tab", "skills"), ("email", "a@x.com"), ("email", "b@x.com")]);

        assert_eq!(first_param(&params, "email"), Some("a@x.com"));
        assert_eq!(first_param(&params, "tab"), Some("skills"));
        assert_eq!(first_param(&params, "missing"), None);
    }
}
