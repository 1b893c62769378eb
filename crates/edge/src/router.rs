// crates/edge/src/router.rs

use adapt::{
    live::EVENTS_PREFIX,
    session::{self, PageSession},
    ContentGateway, LiveEditChannel,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Redirect, Response,
    },
    routing::{get, post},
    Router,
};
use domain::page::{PageState, Route};
use serve::{
    page_status,
    render::{render_document, render_main, PageShell},
};
use std::{convert::Infallible, sync::Arc, time::Duration};
use tokio_stream::{wrappers::WatchStream, Stream, StreamExt};
use tracing::{debug, error, info};
use uuid::Uuid;

/// Shared by every request.
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<dyn ContentGateway>,
    live: LiveEditChannel,
    shell: Arc<PageShell>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ContentGateway>, live: LiveEditChannel, shell: Arc<PageShell>) -> Self {
        Self {
            gateway,
            live,
            shell,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Router construction
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip_all)]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/product-listing", get(redirect_home))
        .route("/product-listing/", get(redirect_home))
        .route("/product-listing/{slug}", get(listing))
        .route("/product", get(redirect_home))
        .route("/product/", get(redirect_home))
        .route("/product/{uid}", get(product))
        .route("/live/changed", post(content_changed))
        .route(&format!("{EVENTS_PREFIX}/"), get(home_events))
        .route(&format!("{EVENTS_PREFIX}/{{*route}}"), get(route_events))
        .route("/{slug}", get(listing))
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// Pages
// ─────────────────────────────────────────────────────────────────────────────

async fn home(State(state): State<AppState>) -> Response {
    render_route(&state, Route::Home).await
}

async fn listing(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match Route::listing(Some(slug.as_str())) {
        Some(route) => render_route(&state, route).await,
        None => redirect_home().await.into_response(),
    }
}

async fn product(State(state): State<AppState>, Path(uid): Path<String>) -> Response {
    match Route::product(Some(uid.as_str())) {
        Some(route) => render_route(&state, route).await,
        None => redirect_home().await.into_response(),
    }
}

async fn redirect_home() -> Redirect {
    Redirect::temporary("/")
}

#[tracing::instrument(skip_all, fields(route = %route))]
async fn render_route(state: &AppState, route: Route) -> Response {
    let page = session::load(state.gateway.as_ref(), route.clone()).await;
    let status = page_status(&page);
    let live = state.live.bootstrap(&route);

    match render_document(&state.shell, &page, live.as_ref()) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("page render failed for {}: {}", route, e);
            let e = serve::Error::from(e);
            (e.to_status(), "Page rendering error").into_response()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Live editing
// ─────────────────────────────────────────────────────────────────────────────

/// Webhook for "an entry changed"; the body is never read.
async fn content_changed(State(state): State<AppState>) -> StatusCode {
    info!("content change notification received");
    state.live.notify();
    StatusCode::NO_CONTENT
}

async fn home_events(State(state): State<AppState>) -> Response {
    page_events(state, Route::Home)
}

async fn route_events(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    match Route::from_path(&path) {
        Some(route) => page_events(state, route),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Server-sent `main` events carrying the re-rendered `<main>` after every
/// state change of a session owned by this connection.
fn page_events(state: AppState, route: Route) -> Response {
    if !state.live.enabled() {
        return StatusCode::NOT_FOUND.into_response();
    }

    let id = Uuid::new_v4();
    info!(session = %id, "live session opened for {}", route);

    let session = PageSession::spawn(Arc::clone(&state.gateway), Some(&state.live));
    session.navigate(route);

    Sse::new(main_fragments(session, id))
        .keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(15))
                .text("keep-alive"),
        )
        .into_response()
}

fn main_fragments(
    session: PageSession,
    id: Uuid,
) -> impl Stream<Item = Result<Event, Infallible>> {
    WatchStream::new(session.watch())
        .filter(|state| !matches!(state, PageState::Idle))
        .map(move |state| {
            // Held by the stream so the session lives as long as the connection.
            let _owner = &session;
            debug!(session = %id, "pushing {:?}", state.route());
            let html = render_main(&state).into_node().to_html().replace('\r', "");
            Ok(Event::default().event("main").data(html))
        })
}
