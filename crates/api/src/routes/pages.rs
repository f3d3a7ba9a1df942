//! The landing page and the scripted database tour page.

use axum::extract::State;
use axum::response::Html;
use axum::{routing::get, Router};

use galaxy_core::Trace;

use crate::state::AppState;
use crate::views;

/// Landing page markup, embedded in the binary.
const LANDING_PAGE: &str = include_str!("../../assets/index.html");

/// GET / -- static landing page.
async fn landing() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// GET /databasetest -- run the full scripted sequence and render its trace.
///
/// Always responds 200: a failed run renders the partial trace with its
/// terminal error entry through the same view as a successful one. The
/// trace is request-scoped; concurrent requests never share it.
async fn database_test(State(state): State<AppState>) -> Html<String> {
    let trace = match state.config.resolve_endpoint() {
        Ok(endpoint) => {
            tracing::info!(endpoint = %endpoint, "Starting database tour");
            galaxy_db::run(&endpoint).await
        }
        Err(err) => {
            tracing::error!(error = %err, "Cannot resolve a database endpoint");
            Trace::from_error(err.to_string())
        }
    };

    if trace.has_error() {
        tracing::warn!("Database tour finished with an error entry");
    } else {
        tracing::info!("Database tour completed");
    }

    Html(views::render_trace(&trace))
}

/// Mount the page routes at the application root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(landing))
        .route("/databasetest", get(database_test))
}
