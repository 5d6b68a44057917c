use std::sync::Arc;

use crate::bus::EventBus;
use crate::config::AppConfig;
use crate::exchange::traits::Venue;
use crate::queue::{QueueFs, QueueLayout};

/// Everything the pipeline components share, built once at startup.
#[derive(Clone)]
pub struct AgentContext {
    pub config: AppConfig,
    pub layout: QueueLayout,
    pub fs: Arc<dyn QueueFs>,
    pub venue: Arc<dyn Venue>,
    pub bus: EventBus,
}

impl AgentContext {
    pub fn new(
        config: AppConfig,
        fs: Arc<dyn QueueFs>,
        venue: Arc<dyn Venue>,
        bus: EventBus,
    ) -> Self {
        let layout = QueueLayout::new(config.queue.root.clone());
        Self {
            config,
            layout,
            fs,
            venue,
            bus,
        }
    }
}
