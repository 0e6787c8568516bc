//! Scripted in-memory transport for unit tests.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

use crate::fetch::Transport;
use crate::retry::TransportError;

type Reply = Result<Vec<u8>, u32>;

#[derive(Default)]
struct Route {
    /// Replies served in order; the last one repeats forever.
    replies: VecDeque<Reply>,
    latency: Duration,
}

#[derive(Default)]
struct Inner {
    routes: HashMap<String, Route>,
    log: Vec<(String, Instant)>,
}

/// Unknown URLs answer 404.
#[derive(Default)]
pub(crate) struct FakeTransport {
    inner: Mutex<Inner>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ok(&self, url: &str, body: &str) {
        self.script(url, vec![Ok(body.as_bytes().to_vec())]);
    }

    pub(crate) fn fail(&self, url: &str, status: u32) {
        self.script(url, vec![Err(status)]);
    }

    pub(crate) fn script(&self, url: &str, replies: Vec<Reply>) {
        let mut inner = self.inner.lock().unwrap();
        inner.routes.entry(url.to_string()).or_default().replies = replies.into();
    }

    /// Delay every reply for `url` by `latency` (simulates an in-flight request).
    pub(crate) fn latency(&self, url: &str, latency: Duration) {
        let mut inner = self.inner.lock().unwrap();
        inner.routes.entry(url.to_string()).or_default().latency = latency;
    }

    pub(crate) fn call_times(&self, url: &str) -> Vec<Instant> {
        let inner = self.inner.lock().unwrap();
        inner
            .log
            .iter()
            .filter(|(u, _)| u == url)
            .map(|(_, t)| *t)
            .collect()
    }

    /// Every requested URL, in request order.
    pub(crate) fn calls(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.log.iter().map(|(u, _)| u.clone()).collect()
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send {
        let (reply, latency) = {
            let mut inner = self.inner.lock().unwrap();
            inner.log.push((url.to_string(), Instant::now()));
            match inner.routes.get_mut(url) {
                Some(route) => {
                    let reply = if route.replies.len() > 1 {
                        route.replies.pop_front()
                    } else {
                        route.replies.front().cloned()
                    };
                    (reply.unwrap_or(Err(404)), route.latency)
                }
                None => (Err(404), Duration::ZERO),
            }
        };
        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            reply.map_err(TransportError::Http)
        }
    }
}
