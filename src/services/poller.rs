//! The poll loop: list `pending`, then run decode, validate, dispatch and
//! finalize for each file in turn. One file's failure never stops the cycle.

use std::io::ErrorKind;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::bus::EventBus;
use crate::constants::events;
use crate::context::AgentContext;
use crate::error::DecodeError;
use crate::events::{CycleReport, Event, ExecutionOutcome, OutcomeReport, RejectCause};
use crate::intent::decode;
use crate::queue::{QueueFs, QueueLayout, QueueTransitioner};

use super::dispatcher::{Dispatch, ExecutionDispatcher};
use super::ledger::IntentLedger;
use super::validator::{validate, Verdict};

pub struct Poller {
    layout: QueueLayout,
    fs: Arc<dyn QueueFs>,
    dispatcher: ExecutionDispatcher,
    transitioner: QueueTransitioner,
    ledger: Option<IntentLedger>,
    bus: EventBus,
    sort_pending: bool,
    /// Held for the whole of a cycle; cycles never overlap
    cycle_guard: Mutex<()>,
    /// Set once shutdown begins. No cycle starts after that.
    stopping: AtomicBool,
}

/// What evaluating one document produced, before the move
struct Evaluation {
    intent_id: Option<String>,
    outcome: ExecutionOutcome,
    duplicate: bool,
}

impl Poller {
    pub fn new(ctx: &AgentContext) -> Self {
        let ledger = ctx
            .config
            .ledger
            .enabled
            .then(|| IntentLedger::new(Duration::from_secs(ctx.config.ledger.retention_secs)));

        Self {
            layout: ctx.layout.clone(),
            fs: ctx.fs.clone(),
            dispatcher: ExecutionDispatcher::new(ctx.venue.clone()),
            transitioner: QueueTransitioner::new(ctx.layout.clone(), ctx.fs.clone()),
            ledger,
            bus: ctx.bus.clone(),
            sort_pending: ctx.config.queue.sort_pending,
            cycle_guard: Mutex::new(()),
            stopping: AtomicBool::new(false),
        }
    }

    pub fn ledger(&self) -> Option<&IntentLedger> {
        self.ledger.as_ref()
    }

    pub fn is_stopping(&self) -> bool {
        self.stopping.load(Ordering::SeqCst)
    }

    /// Scheduler entry point. Skips the tick if a cycle is still running
    /// or shutdown has begun.
    pub async fn tick(&self) -> Option<CycleReport> {
        if self.is_stopping() {
            return None;
        }
        let Ok(_guard) = self.cycle_guard.try_lock() else {
            debug!(event = events::CYCLE_SKIPPED, "Previous cycle still running, skipping tick");
            return None;
        };
        // Shutdown may have begun while we were acquiring the guard
        if self.is_stopping() {
            return None;
        }
        Some(self.scan().await)
    }

    /// Run one full cycle, waiting for any in-flight cycle first. Returns an
    /// empty report without touching the queue once shutdown has begun.
    pub async fn run_cycle(&self) -> CycleReport {
        let _guard = self.cycle_guard.lock().await;
        if self.is_stopping() {
            debug!("Shutdown in progress, not starting a cycle");
            return CycleReport::default();
        }
        self.scan().await
    }

    /// Stop accepting new cycles, then resolve once the in-flight cycle (if
    /// any) has finished. Used at shutdown.
    pub async fn wait_idle(&self) {
        self.stopping.store(true, Ordering::SeqCst);
        let _guard = self.cycle_guard.lock().await;
    }

    async fn scan(&self) -> CycleReport {
        if let Some(ledger) = &self.ledger {
            ledger.prune();
        }

        let names = match self.layout.pending_files(self.fs.as_ref(), self.sort_pending) {
            Ok(names) => names,
            Err(e) => {
                warn!("⚠️ [POLL] Failed to list {}: {}", self.layout.pending().display(), e);
                return CycleReport::default();
            }
        };

        let mut report = CycleReport {
            discovered: names.len(),
            ..CycleReport::default()
        };

        for name in &names {
            match self.process_file(name).await {
                Some(outcome) => {
                    report.record(&outcome);
                    self.bus.notify(Event::Outcome(outcome));
                }
                None => report.read_errors += 1,
            }
        }

        if report.discovered > 0 {
            info!(
                "🔁 [POLL] Cycle done: {} files, {} executed, {} ignored, {} rejected, {} move errors",
                report.discovered,
                report.executed,
                report.ignored,
                report.rejected,
                report.move_errors
            );
        }
        self.bus.notify(Event::CycleCompleted(report.clone()));
        report
    }

    /// Full pipeline for one pending file. `None` when the file could not
    /// be read and was left untouched.
    pub async fn process_file(&self, name: &str) -> Option<OutcomeReport> {
        let path = self.layout.pending().join(name);
        let raw = match self.fs.read_to_string(&path) {
            Ok(raw) => Ok(raw),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                Err(DecodeError::Malformed(format!("not valid UTF-8: {}", e)))
            }
            Err(e) => {
                warn!(
                    event = events::READ_ERROR,
                    file = name,
                    "⚠️ [POLL] Could not read file: {}",
                    e
                );
                return None;
            }
        };

        let eval = self.evaluate(name, raw).await;
        let moved = self
            .transitioner
            .finalize(name, eval.outcome.destination())
            .is_ok();

        Some(OutcomeReport {
            file: name.to_string(),
            intent_id: eval.intent_id,
            outcome: eval.outcome,
            moved,
            duplicate: eval.duplicate,
            at: Utc::now(),
        })
    }

    async fn evaluate(&self, name: &str, raw: Result<String, DecodeError>) -> Evaluation {
        let intent = match raw.and_then(|text| decode(&text)) {
            Ok(intent) => intent,
            Err(e) => {
                warn!(event = events::DECODE_ERROR, file = name, "⚠️ [DECODE] {}", e);
                return Evaluation {
                    intent_id: None,
                    outcome: ExecutionOutcome::Rejected {
                        cause: RejectCause::Decode(e),
                    },
                    duplicate: false,
                };
            }
        };
        let intent_id = Some(intent.intent_id.clone());

        let verdict = match validate(&intent) {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(
                    event = e.event(),
                    intent_id = %intent.intent_id,
                    file = name,
                    "⚠️ [VALIDATION] {}",
                    e
                );
                return Evaluation {
                    intent_id,
                    outcome: ExecutionOutcome::Rejected {
                        cause: RejectCause::Validation(e),
                    },
                    duplicate: false,
                };
            }
        };

        if let Verdict::Ignore { reason } = verdict {
            info!(
                event = events::IGNORED,
                intent_id = %intent.intent_id,
                file = name,
                "ℹ️ [IGNORED] {}",
                reason
            );
            return Evaluation {
                intent_id,
                outcome: ExecutionOutcome::Ignored { reason },
                duplicate: false,
            };
        }

        let recorded = self
            .ledger
            .as_ref()
            .and_then(|l| l.ticket_for(&intent.intent_id));
        if let Some(ticket) = recorded {
            warn!(
                event = events::DUPLICATE_SUPPRESSED,
                intent_id = %intent.intent_id,
                ticket,
                file = name,
                "⚠️ [LEDGER] Intent already executed, not sending again"
            );
            return Evaluation {
                intent_id,
                outcome: ExecutionOutcome::Executed { ticket },
                duplicate: true,
            };
        }

        let outcome = match self.dispatcher.dispatch(&intent).await {
            Dispatch::Executed { ticket } => {
                if let Some(ledger) = &self.ledger {
                    ledger.record(&intent.intent_id, ticket);
                }
                ExecutionOutcome::Executed { ticket }
            }
            Dispatch::Rejected { code, description } => ExecutionOutcome::Rejected {
                cause: RejectCause::Venue { code, description },
            },
        };

        Evaluation {
            intent_id,
            outcome,
            duplicate: false,
        }
    }
}
