//! Monotonic request tokens for async context loads.
//!
//! A load takes a token when it starts. When its response arrives it is applied only
//! if the token is still the latest one issued and nothing invalidated it since.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    last_issued: u64,
    /// `None` once the latest request was invalidated.
    current: Option<RequestToken>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token. Every earlier token becomes stale.
    pub fn issue(&mut self) -> RequestToken {
        self.last_issued += 1;
        let token = RequestToken(self.last_issued);
        self.current = Some(token);
        token
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.current == Some(token)
    }

    /// Mark all outstanding tokens stale without issuing a new one.
    pub fn invalidate(&mut self) {
        self.current = None;
    }

    /// Accept a response once; later responses with the same token are stale.
    pub fn complete(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
