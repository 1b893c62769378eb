// crates/adapt/src/session.rs

//! Page state for one viewer.
//!
//! A [`PageSession`] owns an actor task that moves the page through
//! `Idle → Loading → {Loaded, NotFound, Error}`. Every fetch is stamped with a
//! generation; only the result of the latest generation may be committed, so
//! a slow response for an old route can never overwrite a newer one.

use crate::{
    artist::{artist_stubs, load_artist, load_artists},
    gateway::{fetch::fetch_page, ContentGateway, GatewayError},
    live::{LiveEditChannel, Subscription},
};
use domain::{
    content::Author,
    page::{LoadState, LoadedContent, PageState, Route},
};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};

enum Command {
    Navigate(Route),
    Refresh,
    Fetched {
        generation: u64,
        route: Route,
        result: Result<Option<LoadedContent>, GatewayError>,
    },
    Artist {
        generation: u64,
        position: usize,
        state: LoadState<Author>,
    },
}

/// Client handle for a page session actor. The actor stops when the handle
/// is dropped.
pub struct PageSession {
    tx: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<PageState>,
    _changes: Option<Subscription>,
}

impl PageSession {
    /// Spawn the actor. With a live-edit channel, every change notification
    /// re-fetches the current route.
    pub fn spawn(gateway: Arc<dyn ContentGateway>, live: Option<&LiveEditChannel>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(PageState::Idle);

        let changes = live.map(|channel| {
            let weak = tx.downgrade();
            channel.on_content_changed(move || {
                if let Some(tx) = weak.upgrade() {
                    let _ = tx.send(Command::Refresh);
                }
            })
        });

        let actor = SessionActor {
            gateway,
            generation: 0,
            route: None,
            state: state_tx,
            tx: tx.downgrade(),
        };
        tokio::spawn(actor.run(rx));

        Self {
            tx,
            state: state_rx,
            _changes: changes,
        }
    }

    /// Show `route`; whatever was loading before is superseded.
    pub fn navigate(&self, route: Route) {
        let _ = self.tx.send(Command::Navigate(route));
    }

    /// Re-fetch the current route.
    pub fn refresh(&self) {
        let _ = self.tx.send(Command::Refresh);
    }

    pub fn state(&self) -> PageState {
        self.state.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<PageState> {
        self.state.clone()
    }

    /// Wait until the page and every artist slot on it have settled.
    /// Only meaningful after [`PageSession::navigate`].
    pub async fn settled(&self) -> PageState {
        let mut rx = self.state.clone();
        if let Ok(state) = rx.wait_for(fully_settled).await {
            return state.clone();
        }
        let last = rx.borrow().clone();
        last
    }
}

/// Settled page with no artist slot still loading.
pub fn fully_settled(state: &PageState) -> bool {
    match state {
        PageState::Loaded {
            content: LoadedContent::Product { artists, .. },
            ..
        } => !artists.values().any(|s| matches!(s, LoadState::Loading)),
        other => other.is_settled(),
    }
}

/// Load `route` to completion without an actor: page fetch, then all
/// featured artists. Used for one-shot server rendering.
#[tracing::instrument(skip_all, fields(route = %route))]
pub async fn load(gateway: &dyn ContentGateway, route: Route) -> PageState {
    match fetch_page(gateway, &route).await {
        Ok(Some(LoadedContent::Product { product, .. })) => {
            let artists = load_artists(gateway, &product).await;
            PageState::Loaded {
                route,
                content: LoadedContent::Product { product, artists },
            }
        }
        Ok(Some(content)) => PageState::Loaded { route, content },
        Ok(None) => PageState::NotFound { route },
        Err(e) => {
            error!("failed to load {}: {}", route, e);
            PageState::Error {
                route,
                message: e.to_string(),
            }
        }
    }
}

struct SessionActor {
    gateway: Arc<dyn ContentGateway>,
    generation: u64,
    route: Option<Route>,
    state: watch::Sender<PageState>,
    tx: mpsc::WeakUnboundedSender<Command>,
}

impl SessionActor {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command>) {
        while let Some(cmd) = rx.recv().await {
            match cmd {
                Command::Navigate(route) => self.start(route),
                Command::Refresh => match self.route.clone() {
                    Some(route) => {
                        info!("content changed; reloading {}", route);
                        self.start(route);
                    }
                    None => debug!("refresh before first navigation; ignored"),
                },
                Command::Fetched {
                    generation,
                    route,
                    result,
                } => self.commit(generation, route, result),
                Command::Artist {
                    generation,
                    position,
                    state,
                } => self.commit_artist(generation, position, state),
            }
        }
        debug!("page session closed");
    }

    fn start(&mut self, route: Route) {
        self.generation += 1;
        self.route = Some(route.clone());
        self.state.send_replace(PageState::Loading {
            route: route.clone(),
        });

        let generation = self.generation;
        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = fetch_page(gateway.as_ref(), &route).await;
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(Command::Fetched {
                    generation,
                    route,
                    result,
                });
            }
        });
    }

    fn commit(
        &mut self,
        generation: u64,
        route: Route,
        result: Result<Option<LoadedContent>, GatewayError>,
    ) {
        if generation != self.generation {
            debug!(
                "discarding stale result for {} (generation {}, latest {})",
                route, generation, self.generation
            );
            return;
        }

        let next = match result {
            Ok(Some(content)) => {
                if let LoadedContent::Product { product, .. } = &content {
                    for (position, uid) in artist_stubs(product) {
                        self.spawn_artist(position, uid);
                    }
                }
                PageState::Loaded { route, content }
            }
            Ok(None) => PageState::NotFound { route },
            Err(e) => {
                error!("failed to load {}: {}", route, e);
                PageState::Error {
                    route,
                    message: e.to_string(),
                }
            }
        };
        self.state.send_replace(next);
    }

    fn spawn_artist(&self, position: usize, uid: String) {
        let generation = self.generation;
        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let state = load_artist(gateway.as_ref(), &uid).await;
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(Command::Artist {
                    generation,
                    position,
                    state,
                });
            }
        });
    }

    fn commit_artist(&mut self, generation: u64, position: usize, loaded: LoadState<Author>) {
        if generation != self.generation {
            debug!("discarding stale artist for module {}", position);
            return;
        }
        self.state.send_modify(|state| {
            if let PageState::Loaded {
                content: LoadedContent::Product { artists, .. },
                ..
            } = state
            {
                artists.insert(position, loaded);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockContentGateway;
    use async_trait::async_trait;
    use domain::setting::Settings;
    use parking_lot::Mutex;
    use serde_json::{json, Value as Json};
    use std::{
        collections::HashMap,
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };
    use tokio::sync::oneshot;

    /// Gateway whose responses can be held back per name until released.
    #[derive(Default)]
    struct GatedGateway {
        gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
        homepage_calls: AtomicUsize,
    }

    impl GatedGateway {
        fn hold(&self, name: &str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().insert(name.to_owned(), rx);
            tx
        }

        async fn pass(&self, name: &str) {
            let gate = self.gates.lock().remove(name);
            if let Some(gate) = gate {
                let _ = gate.await;
            }
        }
    }

    #[async_trait]
    impl ContentGateway for GatedGateway {
        async fn fetch_by_key(
            &self,
            content_type: &str,
            key: &str,
            _expand: bool,
        ) -> Result<Option<Json>, GatewayError> {
            self.pass(key).await;
            Ok(match content_type {
                "product" => Some(json!({
                    "uid": key,
                    "title": "Snare",
                    "modular_blocks": [
                        { "featured_artist": { "author": [ { "uid": "a1" } ] } }
                    ]
                })),
                "author" => Some(json!({ "uid": key, "title": "Ringo" })),
                _ => None,
            })
        }

        async fn fetch_by_slug(
            &self,
            _content_type: &str,
            slug: &str,
            _expand: bool,
        ) -> Result<Option<Json>, GatewayError> {
            let name = slug.trim_matches('/');
            self.pass(name).await;
            Ok(Some(json!({ "uid": name, "title": name })))
        }

        async fn fetch_singleton(
            &self,
            _content_type: &str,
            _expand: bool,
        ) -> Result<Option<Json>, GatewayError> {
            let n = self.homepage_calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Some(json!({ "uid": "home", "title": format!("Home {n}") })))
        }
    }

    fn title(state: &PageState) -> Option<&str> {
        match state {
            PageState::Loaded { content, .. } => Some(content.title()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn stale_response_never_overwrites_newer_route() {
        let gw = Arc::new(GatedGateway::default());
        let release_a = gw.hold("a");
        let session = PageSession::spawn(gw.clone(), None);

        session.navigate(Route::Listing("a".into()));
        session.navigate(Route::Listing("b".into()));

        let state = session.settled().await;
        assert_eq!(title(&state), Some("b"));

        release_a.send(()).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let state = session.state();
        assert_eq!(title(&state), Some("b"));
        assert_eq!(state.route(), Some(&Route::Listing("b".into())));
    }

    #[tokio::test]
    async fn artist_slots_load_after_the_page_commits() {
        let gw = Arc::new(GatedGateway::default());
        let release_artist = gw.hold("a1");
        let session = PageSession::spawn(gw.clone(), None);
        let mut rx = session.watch();

        session.navigate(Route::Product("p1".into()));
        let committed = rx
            .wait_for(|s| matches!(s, PageState::Loaded { .. }))
            .await
            .unwrap()
            .clone();
        match committed {
            PageState::Loaded {
                content: LoadedContent::Product { artists, .. },
                ..
            } => assert_eq!(artists.get(&0), Some(&LoadState::Loading)),
            other => panic!("unexpected state: {other:?}"),
        }
        assert!(!fully_settled(&session.state()));

        release_artist.send(()).unwrap();
        match session.settled().await {
            PageState::Loaded {
                content: LoadedContent::Product { artists, .. },
                ..
            } => match artists.get(&0) {
                Some(LoadState::Ready(author)) => assert_eq!(author.title, "Ringo"),
                other => panic!("unexpected slot: {other:?}"),
            },
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn change_notification_refetches_current_route() {
        let settings: Settings = toml::from_str(
            r#"
            [stack]
            api_key = "k"
            delivery_token = "t"
            environment = "dev"
            "#,
        )
        .unwrap();
        let live = LiveEditChannel::new(Arc::new(settings));
        let gw = Arc::new(GatedGateway::default());
        let session = PageSession::spawn(gw.clone(), Some(&live));

        session.navigate(Route::Home);
        assert_eq!(title(&session.settled().await), Some("Home 1"));

        live.notify();
        let mut rx = session.watch();
        let state = tokio::time::timeout(
            Duration::from_secs(1),
            rx.wait_for(|s| title(s) == Some("Home 2")),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();
        assert!(fully_settled(&state));

        drop(session);
        assert_eq!(live.handler_count(), 0);
    }

    #[tokio::test]
    async fn missing_entry_and_failure_are_distinct_states() {
        let mut gw = MockContentGateway::new();
        gw.expect_fetch_by_key()
            .returning(|_, _, _| Ok(None));
        gw.expect_fetch_singleton().returning(|_, _| {
            Err(GatewayError::Status {
                status: 412,
                url: "https://cdn.contentstack.io/v3/content_types/homepage/entries".into(),
            })
        });
        let gw: Arc<dyn ContentGateway> = Arc::new(gw);

        let missing = load(gw.as_ref(), Route::Product("nope".into())).await;
        assert!(matches!(missing, PageState::NotFound { .. }));

        let failed = load(gw.as_ref(), Route::Home).await;
        match failed {
            PageState::Error { message, .. } => assert!(message.contains("412")),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn one_shot_load_waits_for_artists() {
        let gw = GatedGateway::default();
        let state = load(&gw, Route::Product("p1".into())).await;
        assert!(fully_settled(&state));
        match state {
            PageState::Loaded {
                content: LoadedContent::Product { artists, .. },
                ..
            } => assert!(matches!(artists.get(&0), Some(LoadState::Ready(_)))),
            other => panic!("unexpected state: {other:?}"),
        }
    }
}
