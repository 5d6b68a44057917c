//! The single write of record for queue state: relocating a file out of
//! `pending` into `done` or `failed`.

use std::sync::Arc;

use tracing::{info, warn};

use crate::constants::events;
use crate::error::MoveError;

use super::{
    fs::QueueFs,
    layout::{Destination, QueueLayout},
};

#[derive(Clone)]
pub struct QueueTransitioner {
    layout: QueueLayout,
    fs: Arc<dyn QueueFs>,
}

impl QueueTransitioner {
    pub fn new(layout: QueueLayout, fs: Arc<dyn QueueFs>) -> Self {
        Self { layout, fs }
    }

    /// Move `file_name` from `pending` into its terminal folder. On failure
    /// the file stays in `pending` and is picked up again next cycle.
    pub fn finalize(&self, file_name: &str, destination: Destination) -> Result<(), MoveError> {
        let from = self.layout.pending().join(file_name);
        let to = self.layout.dir_for(destination).join(file_name);

        let result = if self.fs.exists(&to) {
            Err(MoveError::DestinationExists { path: to.clone() })
        } else {
            self.fs
                .rename(&from, &to)
                .map_err(|source| MoveError::Io { path: from.clone(), source })
        };

        match &result {
            Ok(()) => info!("📦 [QUEUE] {} -> {}", file_name, destination.as_str()),
            Err(e) => warn!(
                event = events::MOVE_ERROR,
                file = file_name,
                destination = destination.as_str(),
                "⚠️ [QUEUE] Move failed, file stays pending: {}",
                e
            ),
        }
        result
    }
}
