use std::sync::Arc;

use forkcast_core::application::ForkcastService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: ForkcastService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: ForkcastService) -> Self {
        Self { args, service }
    }
}
