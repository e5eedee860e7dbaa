//! Test doubles shared by the async integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use octoscope_core::error::ServiceError;
use octoscope_core::mock;
use octoscope_core::notify::{Notification, NotificationSink};
use octoscope_core::service::ProfileService;
use octoscope_core::types::{ProfileBundle, ProfileSummary};
use octoscope_core::Reply;
use tokio::sync::mpsc;

/// Profile service over the mock tables that logs every call and lets a test
/// pick the latency per query.
#[derive(Clone, Default)]
pub struct ScriptedService {
    searches: Arc<Mutex<Vec<String>>>,
    fetches: Arc<Mutex<Vec<String>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
}

impl ScriptedService {
    pub fn delay(&self, query: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(query.to_owned(), delay);
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn shared(&self) -> Arc<dyn ProfileService> {
        Arc::new(self.clone())
    }

    fn delay_for(&self, query: &str) -> Duration {
        self.delays
            .lock()
            .unwrap()
            .get(query)
            .copied()
            .unwrap_or(Duration::from_millis(50))
    }
}

impl ProfileService for ScriptedService {
    fn search(&self, query: &str) -> BoxFuture<'static, Result<Vec<ProfileSummary>, ServiceError>> {
        self.searches.lock().unwrap().push(query.to_owned());
        let delay = self.delay_for(query);
        let query = query.to_owned();
        async move {
            tokio::time::sleep(delay).await;
            mock::matching(&query)
        }
        .boxed()
    }

    fn fetch(&self, username: &str) -> BoxFuture<'static, Result<ProfileBundle, ServiceError>> {
        self.fetches.lock().unwrap().push(username.to_owned());
        let delay = self.delay_for(username);
        let username = username.to_owned();
        async move {
            tokio::time::sleep(delay).await;
            mock::lookup(&username)
        }
        .boxed()
    }
}

/// A reply callback feeding an unbounded channel.
pub fn channel<T: Send + 'static>() -> (Reply<T>, mpsc::UnboundedReceiver<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let reply: Reply<T> = Arc::new(move |value| {
        let _ = tx.send(value);
    });
    (reply, rx)
}

/// A notification sink recording into a shared vector.
pub fn recorder() -> (Arc<dyn NotificationSink>, Arc<Mutex<Vec<Notification>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&events);
    let sink: Arc<dyn NotificationSink> =
        Arc::new(move |n: Notification| captured.lock().unwrap().push(n));
    (sink, events)
}
