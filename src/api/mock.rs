//! # Mock Transport
//!
//! An in-memory [`Transport`] for exercising API objects without a network.
//!
//! Queue replies with [`MockTransport::respond_json`] and friends, invoke API
//! methods, then inspect what was sent with [`MockTransport::requests`].
//! Replies are delivered synchronously from inside `dispatch`. When the queue
//! is empty the transport answers `200` with an empty body.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use bitbucket_api::api::mock::MockTransport;
//! use bitbucket_api::api::{ApiOptions, Methods};
//! use bitbucket_api::{args, resources};
//!
//! let transport = Arc::new(MockTransport::new());
//! transport.respond_json(serde_json::json!({"id": 42}));
//!
//! let api = resources::pull_requests::create_api(transport.clone(), ApiOptions::default());
//! api.call("get", args!["alice", "proj", 42], |result| {
//!     assert_eq!(result.unwrap()["id"], 42);
//! })
//! .unwrap();
//!
//! let sent = transport.last_request().unwrap();
//! assert_eq!(sent.path, "repositories/alice/proj/pullrequests/42");
//! ```

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::api::{Listener, Transport};
use crate::clients::{HttpError, HttpRequest, HttpResponse};

/// A scripted reply to one dispatched request.
#[derive(Debug)]
pub enum MockReply {
    /// Notify the listener once with this response.
    Respond(HttpResponse),
    /// Notify the listener once with this error.
    Fail(HttpError),
    /// Notify the listener `n` times with the same response.
    Repeat(HttpResponse, usize),
    /// Keep the listener without notifying it.
    Hold,
}

#[derive(Default)]
struct MockState {
    requests: Vec<HttpRequest>,
    replies: VecDeque<MockReply>,
    held: Vec<Listener>,
}

/// A transport that records requests and replays scripted replies.
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    /// Creates a mock with an empty reply queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues a reply for the next unanswered request.
    pub fn reply(&self, reply: MockReply) {
        self.state().replies.push_back(reply);
    }

    /// Queues a raw response.
    pub fn respond_with(&self, response: HttpResponse) {
        self.reply(MockReply::Respond(response));
    }

    /// Queues a `200` JSON response.
    pub fn respond_json(&self, body: Value) {
        self.respond_with(HttpResponse::json(&body));
    }

    /// Queues a transport failure.
    pub fn fail_with(&self, error: HttpError) {
        self.reply(MockReply::Fail(error));
    }

    /// Queues a response delivered `times` times to the same listener.
    pub fn notify_repeatedly(&self, response: HttpResponse, times: usize) {
        self.reply(MockReply::Repeat(response, times));
    }

    /// Queues a reply that never notifies the listener.
    pub fn hold(&self) {
        self.reply(MockReply::Hold);
    }

    /// Removes and returns the listeners kept by [`hold`](Self::hold).
    pub fn take_held(&self) -> Vec<Listener> {
        std::mem::take(&mut self.state().held)
    }

    /// Returns every request dispatched so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state().requests.clone()
    }

    /// Returns the most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.state().requests.last().cloned()
    }
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("MockTransport")
            .field("requests", &state.requests.len())
            .field("queued_replies", &state.replies.len())
            .field("held", &state.held.len())
            .finish()
    }
}

impl Transport for MockTransport {
    fn dispatch(&self, request: HttpRequest, listener: Listener) {
        let reply = {
            let mut state = self.state();
            state.requests.push(request);
            state.replies.pop_front()
        };

        // The lock is released before notifying so callbacks may dispatch again.
        match reply {
            None => listener.notify(Ok(HttpResponse::new(200, HashMap::new(), ""))),
            Some(MockReply::Respond(response)) => listener.notify(Ok(response)),
            Some(MockReply::Fail(error)) => listener.notify(Err(error)),
            Some(MockReply::Repeat(response, times)) => {
                for _ in 0..times {
                    listener.notify(Ok(response.clone()));
                }
            }
            Some(MockReply::Hold) => self.state().held.push(listener),
        }
    }
}
