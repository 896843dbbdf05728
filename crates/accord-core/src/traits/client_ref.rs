//! Non-owning client handle held by entities

use std::fmt;
use std::sync::{Arc, Weak};

use super::ApiClient;
use crate::error::{ApiError, ApiResult};

/// Weak back-reference from an entity to the client that produced it
///
/// An unbound handle and a handle whose client has been dropped behave the
/// same: [`ClientRef::get`] fails with [`ApiError::NoClient`].
#[derive(Clone, Default)]
pub struct ClientRef(Option<Weak<dyn ApiClient>>);

impl ClientRef {
    /// Handle bound to no client
    pub fn none() -> Self {
        Self(None)
    }

    pub fn from_arc<A: ApiClient + 'static>(client: &Arc<A>) -> Self {
        Self::from_weak(Arc::downgrade(client))
    }

    pub fn from_weak<A: ApiClient + 'static>(client: Weak<A>) -> Self {
        let client: Weak<dyn ApiClient> = client;
        Self(Some(client))
    }

    /// Upgrade to the live client
    pub fn get(&self) -> ApiResult<Arc<dyn ApiClient>> {
        self.0
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or(ApiError::NoClient)
    }

    /// Whether a live client is currently reachable
    pub fn is_bound(&self) -> bool {
        self.0.as_ref().is_some_and(|client| client.strong_count() > 0)
    }
}

impl fmt::Debug for ClientRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bound() {
            f.write_str("ClientRef(bound)")
        } else {
            f.write_str("ClientRef(unbound)")
        }
    }
}
