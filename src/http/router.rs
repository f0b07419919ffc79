//! HTTP Routes
//!
//! | Method | Path       | Behavior                                       |
//! |--------|------------|------------------------------------------------|
//! | GET    | `/`        | Landing page                                   |
//! | GET    | `/command` | Always `400 Bad Request`, "Use POST method"    |
//! | POST   | `/command` | Runs the `command` form field                  |
//! | GET    | other      | Static file from the `www` directory           |
//!
//! Every request is handled on the Tokio worker that accepted it; the only
//! shared state is the [`CommandService`].

use crate::commands::{CommandError, CommandService};
use crate::http::pages;
use crate::protocol::Reply;
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

type Params = HashMap<String, String>;

/// Builds the application router.
pub fn build_router(service: Arc<CommandService>, www_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/command", get(command_get).post(command_post))
        .fallback_service(ServeDir::new(www_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn home() -> Html<String> {
    Html(pages::home_page())
}

async fn command_get(State(service): State<Arc<CommandService>>) -> Response {
    respond(service.handle_get())
}

/// Query parameters and form fields are merged; form fields win.
async fn command_post(
    State(service): State<Arc<CommandService>>,
    query: Result<Query<Params>, QueryRejection>,
    form: Result<Form<Params>, FormRejection>,
) -> Response {
    let mut params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable query string");
            Params::new()
        }
    };
    match form {
        Ok(Form(fields)) => params.extend(fields),
        Err(rejection) => warn!(error = %rejection, "Unreadable command form"),
    }
    respond(service.handle_post(&params))
}

fn respond(result: Result<Reply, CommandError>) -> Response {
    match result {
        Ok(reply) => reply.body().into_response(),
        Err(err) => {
            let status = err.status();
            if err.is_client_error() {
                warn!(status = status.as_u16(), error = %err, "Command rejected");
            } else {
                error!(status = status.as_u16(), error = %err, "Command failed");
            }
            (status, Html(pages::error_page(status, &err.to_string()))).into_response()
        }
    }
}
