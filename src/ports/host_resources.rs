//! Host resource and model inventory port definitions.

use url::Url;

use crate::domain::{LlmModel, SystemResources};

/// Best-effort host resource snapshot.
pub trait HostResources {
    fn snapshot(&self) -> SystemResources;
}

/// Locally available inference models.
pub trait ModelInventory {
    /// Models served at `base_url`; empty when the server is unreachable.
    fn list_models(&self, base_url: &Url) -> Vec<LlmModel>;
}
