//! Producer side of the queue. Writes each intent under a temporary name and
//! renames it into place so the agent never reads a half-written file.

use std::io;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::constants::queue::{INTENT_FILE_SUFFIX, TEMP_FILE_SUFFIX};
use crate::intent::Intent;

use super::{fs::QueueFs, layout::QueueLayout};

#[derive(Clone)]
pub struct FileIntentSink {
    layout: QueueLayout,
    fs: Arc<dyn QueueFs>,
}

impl FileIntentSink {
    /// Creates the queue folders if needed.
    pub fn new(layout: QueueLayout, fs: Arc<dyn QueueFs>) -> io::Result<Self> {
        layout.ensure(fs.as_ref())?;
        Ok(Self { layout, fs })
    }

    /// Queue an intent; returns the file name it landed under.
    pub fn emit(&self, intent: &Intent) -> io::Result<String> {
        self.emit_raw(&intent.to_json())
    }

    /// Queue an already-serialized document.
    pub fn emit_raw(&self, document: &str) -> io::Result<String> {
        let name = format!("{}{}", Uuid::new_v4(), INTENT_FILE_SUFFIX);
        let tmp = self
            .layout
            .pending()
            .join(format!("{}{}", name, TEMP_FILE_SUFFIX));
        let target = self.layout.pending().join(&name);

        self.fs.write(&tmp, document)?;
        self.fs.rename(&tmp, &target)?;
        debug!("Queued intent file {}", name);
        Ok(name)
    }
}
