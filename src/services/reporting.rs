use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{
    bus::EventBus,
    error::ValidationError,
    events::{CycleReport, Event, ExecutionOutcome, OutcomeReport, RejectCause},
};

/// Running totals since process start. In memory only.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AgentStats {
    pub cycles: u64,
    pub files_seen: u64,

    pub executed: u64,
    pub ignored: u64,
    pub rejected: u64,

    pub decode_errors: u64,
    pub invalid_quantity: u64,
    pub invalid_side: u64,
    pub venue_rejections: u64,

    /// Rejection counts keyed by venue return code
    pub venue_codes: HashMap<i64, u64>,

    pub move_errors: u64,
    pub read_errors: u64,
    pub duplicates_suppressed: u64,

    pub last_ticket: Option<u64>,
    pub last_cycle_at: Option<String>,
}

#[derive(Clone, Default)]
pub struct OutcomeReporter {
    stats: Arc<Mutex<AgentStats>>,
}

impl OutcomeReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> AgentStats {
        self.stats.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub async fn start(&self, event_bus: EventBus) {
        let mut rx = event_bus.subscribe();
        let reporter = self.clone();

        tokio::spawn(async move {
            info!("📈 OutcomeReporter started");

            loop {
                match rx.recv().await {
                    Ok(event) => reporter.apply(&event),
                    Err(RecvError::Lagged(missed)) => {
                        warn!("OutcomeReporter lagged, {} events not counted", missed)
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }

    pub fn apply(&self, event: &Event) {
        match event {
            Event::Outcome(report) => self.on_outcome(report),
            Event::CycleCompleted(report) => self.on_cycle(report),
        }
    }

    fn on_outcome(&self, report: &OutcomeReport) {
        let mut s = self.stats.lock().unwrap_or_else(|e| e.into_inner());
        s.files_seen += 1;

        match &report.outcome {
            ExecutionOutcome::Executed { ticket } => {
                s.executed += 1;
                s.last_ticket = Some(*ticket);
            }
            ExecutionOutcome::Ignored { .. } => s.ignored += 1,
            ExecutionOutcome::Rejected { cause } => {
                s.rejected += 1;
                match cause {
                    RejectCause::Decode(_) => s.decode_errors += 1,
                    RejectCause::Validation(ValidationError::InvalidQuantity { .. }) => {
                        s.invalid_quantity += 1
                    }
                    RejectCause::Validation(ValidationError::InvalidSide { .. }) => {
                        s.invalid_side += 1
                    }
                    RejectCause::Venue { code, .. } => {
                        s.venue_rejections += 1;
                        *s.venue_codes.entry(*code).or_insert(0) += 1;
                    }
                }
            }
        }

        if !report.moved {
            s.move_errors += 1;
        }
        if report.duplicate {
            s.duplicates_suppressed += 1;
        }
    }

    fn on_cycle(&self, report: &CycleReport) {
        let mut s = self.stats.lock().unwrap_or_else(|e| e.into_inner());
        s.cycles += 1;
        s.read_errors += report.read_errors as u64;
        s.last_cycle_at = Some(Utc::now().to_rfc3339());
    }
}
