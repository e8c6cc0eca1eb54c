//! HTTP routes for the adapter.

use std::any::Any;

use axum::Router;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use ivrquery::{AccessDenied, RawRequest};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::state::AppState;

/// Header carrying the access token when it is not in the query.
pub const TOKEN_HEADER: &str = "token";

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health))
        .route("/ivrquery", get(ivr_query));
    with_layers(routes, &state).with_state(state)
}

/// Wrap `routes` with panic containment and request tracing.
///
/// A panic below this layer still answers with a fault document.
pub fn with_layers(routes: Router<AppState>, state: &AppState) -> Router<AppState> {
    let panic_state = state.clone();
    routes
        .layer(CatchPanicLayer::custom(
            move |payload: Box<dyn Any + Send + 'static>| panic_response(&panic_state, payload),
        ))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}

/// GET /ivrquery - run the adapter on the query parameters.
async fn ivr_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "query rejected");
            let body = state
                .adapter
                .fault_document(format!("decode query: {}", rejection.body_text()));
            return xml_response(&state, body);
        }
    };

    let token_header = headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let raw = RawRequest {
        query: pairs,
        token_header,
    };

    match state.adapter.handle(&raw) {
        Ok(body) => xml_response(&state, body),
        Err(AccessDenied) => (StatusCode::UNAUTHORIZED, "unauthorized").into_response(),
    }
}

fn xml_response(state: &AppState, body: String) -> Response {
    (
        [(header::CONTENT_TYPE, state.content_type().to_string())],
        body,
    )
        .into_response()
}

fn panic_response(state: &AppState, payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "handler panicked"
    };
    error!(panic = %message, "request handler panicked");
    let body = state.adapter.fault_document(format!("panic: {message}"));
    xml_response(state, body)
}
