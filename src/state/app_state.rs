use std::sync::Arc;

use crate::auth::AuthBackend;
use crate::provider::ServerOptions;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Auth backend composing the token codec with the host predicates
    pub auth: Arc<AuthBackend>,
    /// Options for the Git-provider surface (project id, prefix, hooks)
    pub options: ServerOptions,
}

impl AppState {
    pub fn new(auth: AuthBackend, options: ServerOptions) -> Self {
        Self {
            auth: Arc::new(auth),
            options,
        }
    }
}
