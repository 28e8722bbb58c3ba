use crate::common::{Directory, DispatchGateway};
use std::sync::Arc;

/// Clients built once at start-up and shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn DispatchGateway>,
    pub directory: Arc<dyn Directory>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn DispatchGateway>, directory: Arc<dyn Directory>) -> Self {
        AppState { gateway, directory }
    }
}
