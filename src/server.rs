//! Pages rendered on request, everything else straight from the public dir.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use camino::Utf8PathBuf;
use console::style;
use serde::Deserialize;
use tower_http::services::ServeDir;
use tracing::{debug, error, info};

use crate::error::FolioError;
use crate::{Route, Site};

#[derive(Debug, Deserialize)]
struct DetailQuery {
    project: Option<String>,
}

/// Serve `site` on `127.0.0.1:<port>` until the process is stopped.
pub fn start(site: Site, public: Utf8PathBuf, port: u16) -> Result<(), FolioError> {
    info!(url = %style(format!("http://localhost:{port}/")).yellow(), "starting a HTTP server");

    // The blocking HTTP client inside a live source must not be dropped on the
    // runtime, so the last handle stays out here.
    let site = Arc::new(site);

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(FolioError::Server)?
        .block_on(serve(site.clone(), public, port))
        .map_err(FolioError::Server)
}

async fn serve(site: Arc<Site>, public: Utf8PathBuf, port: u16) -> std::io::Result<()> {
    let address = SocketAddr::from(([127, 0, 0, 1], port));
    let address = tokio::net::TcpListener::bind(address).await?;

    let router = Router::new()
        .route("/", get(list))
        .route("/index.html", get(list))
        .route("/about.html", get(about))
        .route("/project-detail.html", get(detail))
        .fallback_service(ServeDir::new(public))
        .with_state(site);

    axum::serve(address, router).await
}

async fn list(State(site): State<Arc<Site>>) -> Response {
    render(site, Route::List).await
}

async fn about(State(site): State<Arc<Site>>) -> Response {
    render(site, Route::About).await
}

async fn detail(State(site): State<Arc<Site>>, Query(query): Query<DetailQuery>) -> Response {
    render(site, Route::Detail(query.project)).await
}

async fn render(site: Arc<Site>, route: Route) -> Response {
    debug!(?route, "rendering");

    // content sources block on I/O
    let result = tokio::task::spawn_blocking(move || {
        let page = site.render(&route);
        (route, page)
    })
    .await;

    match result {
        Ok((route, page)) => {
            let status = match (&route, page.found) {
                (Route::Detail(_), false) => StatusCode::NOT_FOUND,
                _ => StatusCode::OK,
            };
            (status, Html(page.html)).into_response()
        }
        Err(err) => {
            error!("render task failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
