use chrono::{DateTime, Utc};

use crate::error::{DecodeError, ValidationError};
use crate::queue::Destination;

/// Why an intent ended up in `failed`
#[derive(Clone, Debug, PartialEq)]
pub enum RejectCause {
    Decode(DecodeError),
    Validation(ValidationError),
    /// Venue declined (or could not be reached); code and description verbatim
    Venue { code: i64, description: String },
}

/// Terminal verdict for one processed file
#[derive(Clone, Debug, PartialEq)]
pub enum ExecutionOutcome {
    Executed { ticket: u64 },
    /// Handled without a venue call (non-LIVE mode)
    Ignored { reason: String },
    Rejected { cause: RejectCause },
}

impl ExecutionOutcome {
    /// `Ignored` counts as success for queueing purposes
    pub fn destination(&self) -> Destination {
        match self {
            ExecutionOutcome::Executed { .. } | ExecutionOutcome::Ignored { .. } => {
                Destination::Done
            }
            ExecutionOutcome::Rejected { .. } => Destination::Failed,
        }
    }
}

#[derive(Clone, Debug)]
pub struct OutcomeReport {
    pub file: String,
    /// Unknown when the document could not be decoded
    pub intent_id: Option<String>,
    pub outcome: ExecutionOutcome,
    /// False when the move failed and the file is still pending
    pub moved: bool,
    /// Executed ticket came from the idempotency ledger, not the venue
    pub duplicate: bool,
    pub at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CycleReport {
    pub discovered: usize,
    pub executed: usize,
    pub ignored: usize,
    pub rejected: usize,
    pub move_errors: usize,
    /// Files left pending because they could not be read
    pub read_errors: usize,
    pub duplicates: usize,
}

impl CycleReport {
    pub fn record(&mut self, report: &OutcomeReport) {
        match report.outcome {
            ExecutionOutcome::Executed { .. } => self.executed += 1,
            ExecutionOutcome::Ignored { .. } => self.ignored += 1,
            ExecutionOutcome::Rejected { .. } => self.rejected += 1,
        }
        if !report.moved {
            self.move_errors += 1;
        }
        if report.duplicate {
            self.duplicates += 1;
        }
    }
}

// Global Event Enum
#[derive(Clone, Debug)]
pub enum Event {
    Outcome(OutcomeReport),
    CycleCompleted(CycleReport),
}
