//! Registries
//!
//! One registry per entity type, all backend-agnostic through
//! [`DocumentStore`](crate::store::DocumentStore). Registries own key
//! assignment, sorting and the order status rules; input validation stays
//! at the API boundary.

pub mod credentials;
pub mod customers;
pub mod menu;
pub mod orders;
pub mod settings;

pub use credentials::CredentialStore;
pub use customers::CustomerRegistry;
pub use menu::MenuRegistry;
pub use orders::OrderRegistry;
pub use settings::SettingsStore;

use tokio::task::JoinHandle;

/// Handle to a running change subscription
///
/// Dropping it stops delivery; callers that let the handle go out of scope
/// immediately get exactly one task cleaned up, no listener leaks.
#[derive(Debug)]
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    pub(crate) fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }

    /// Explicitly stop delivery (equivalent to dropping the handle)
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
