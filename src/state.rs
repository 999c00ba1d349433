//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// Handle to the link service, cloned per request.
///
/// Holds no mutable data of its own; the store behind the repository is the
/// only shared resource.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
}

impl AppState {
    /// Builds state around an already constructed repository.
    pub fn new(link_repository: Arc<dyn LinkRepository>) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository)),
        }
    }
}
