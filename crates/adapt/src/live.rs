// crates/adapt/src/live.rs

//! The live-edit channel.
//!
//! The visual editor tells us that *something* changed; what changed is
//! never interpreted. Every registered handler just hears "re-fetch now".

use domain::{page::Route, setting::Settings};
use parking_lot::RwLock;
use serve::render::LiveBootstrap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Weak,
};
use tokio::sync::broadcast;
use tracing::debug;

/// Path prefix of the per-route event stream the browser listens on.
pub const EVENTS_PREFIX: &str = "/live/events";

type Handler = Arc<dyn Fn() + Send + Sync>;

struct Inner {
    settings: Arc<Settings>,
    handlers: RwLock<Vec<(u64, Handler)>>,
    next_id: AtomicU64,
    events: broadcast::Sender<()>,
}

/// Cheap to clone; all clones share the same handlers.
#[derive(Clone)]
pub struct LiveEditChannel {
    inner: Arc<Inner>,
}

impl LiveEditChannel {
    pub fn new(settings: Arc<Settings>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            inner: Arc::new(Inner {
                settings,
                handlers: RwLock::new(Vec::new()),
                next_id: AtomicU64::new(0),
                events,
            }),
        }
    }

    pub fn enabled(&self) -> bool {
        self.inner.settings.editing_enabled()
    }

    /// What the browser needs to join the editing session for `route`.
    /// `None` while editing is off.
    pub fn bootstrap(&self, route: &Route) -> Option<LiveBootstrap> {
        let settings = &self.inner.settings;
        self.enabled().then(|| LiveBootstrap {
            api_key: settings.stack.api_key.clone(),
            environment: settings.stack.environment.clone(),
            app_host: settings.app_host(),
            events_url: format!("{EVENTS_PREFIX}{}", route.path()),
        })
    }

    /// Register `handler` to run on every change notification. The handler
    /// stays registered until the returned [`Subscription`] is dropped.
    pub fn on_content_changed<F>(&self, handler: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.handlers.write().push((id, Arc::new(handler)));
        Subscription {
            id,
            channel: Arc::downgrade(&self.inner),
        }
    }

    /// Receiver that yields `()` per notification, for stream consumers.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.inner.events.subscribe()
    }

    /// An entry changed upstream: run every handler.
    pub fn notify(&self) {
        let handlers: Vec<Handler> = self
            .inner
            .handlers
            .read()
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();
        debug!("content changed; notifying {} handler(s)", handlers.len());

        for handler in handlers {
            handler();
        }
        // No receivers is fine.
        let _ = self.inner.events.send(());
    }

    pub fn handler_count(&self) -> usize {
        self.inner.handlers.read().len()
    }
}

/// Keeps a change handler registered. Dropping it unregisters the handler.
pub struct Subscription {
    id: u64,
    channel: Weak<Inner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.channel.upgrade() {
            inner.handlers.write().retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn settings(enable: bool) -> Arc<Settings> {
        let src = format!(
            r#"
            [stack]
            api_key = "blt_key"
            delivery_token = "cs_delivery"
            environment = "staging"

            [live_preview]
            enable = {enable}
            preview_token = "cs_preview"
            "#
        );
        Arc::new(toml::from_str(&src).unwrap())
    }

    #[test]
    fn notify_runs_every_handler_until_unsubscribed() {
        let channel = LiveEditChannel::new(settings(true));
        let hits = Arc::new(AtomicUsize::new(0));

        let a = {
            let hits = Arc::clone(&hits);
            channel.on_content_changed(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };
        let b = {
            let hits = Arc::clone(&hits);
            channel.on_content_changed(move || {
                hits.fetch_add(10, Ordering::SeqCst);
            })
        };

        channel.notify();
        assert_eq!(hits.load(Ordering::SeqCst), 11);

        drop(b);
        assert_eq!(channel.handler_count(), 1);
        channel.notify();
        assert_eq!(hits.load(Ordering::SeqCst), 12);
        drop(a);
        assert_eq!(channel.handler_count(), 0);
    }

    #[tokio::test]
    async fn subscribers_see_notifications() {
        let channel = LiveEditChannel::new(settings(true));
        let mut rx = channel.subscribe();
        channel.notify();
        assert!(rx.recv().await.is_ok());
    }

    #[test]
    fn bootstrap_only_while_editing() {
        let off = LiveEditChannel::new(settings(false));
        assert!(off.bootstrap(&Route::Home).is_none());

        let on = LiveEditChannel::new(settings(true));
        let boot = on.bootstrap(&Route::Listing("drums".into())).unwrap();
        assert_eq!(boot.api_key, "blt_key");
        assert_eq!(boot.environment, "staging");
        assert_eq!(boot.app_host, "app.contentstack.com");
        assert_eq!(boot.events_url, "/live/events/product-listing/drums");
    }
}
