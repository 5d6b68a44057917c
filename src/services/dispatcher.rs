//! Turns a validated intent into a venue market order and normalizes the
//! answer to a ticket or a `(code, description)` rejection.

use std::sync::Arc;

use tracing::{error, info};

use crate::constants::{events, venue::*};
use crate::error::VenueError;
use crate::exchange::{
    traits::Venue,
    types::{OpenPositionRequest, OrderSide},
};
use crate::intent::{Intent, Side};

#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch {
    Executed { ticket: u64 },
    Rejected { code: i64, description: String },
}

#[derive(Clone)]
pub struct ExecutionDispatcher {
    venue: Arc<dyn Venue>,
}

impl ExecutionDispatcher {
    pub fn new(venue: Arc<dyn Venue>) -> Self {
        Self { venue }
    }

    pub fn venue_name(&self) -> &'static str {
        self.venue.name()
    }

    /// One venue call per invocation, no retries. Only call with intents
    /// that passed validation.
    pub async fn dispatch(&self, intent: &Intent) -> Dispatch {
        let side = match &intent.side {
            Side::Buy => OrderSide::Buy,
            Side::Sell => OrderSide::Sell,
            Side::Other(other) => {
                let result = Dispatch::Rejected {
                    code: UNSUPPORTED_SIDE_CODE,
                    description: format!("unsupported side '{}'", other),
                };
                Self::log_result(intent, &result);
                return result;
            }
        };

        let request = OpenPositionRequest {
            side,
            symbol: intent.symbol.clone(),
            volume: intent.quantity,
            stop_loss: intent.stop_loss,
            take_profit: intent.take_profit,
            tag: intent.intent_id.clone(),
        };

        info!(
            "🚀 [ORDER] Submitting to {}: {} {} {} (sl={:?}, tp={:?}, tif={}, policy={})",
            self.venue.name(),
            side.action(),
            request.volume,
            request.symbol,
            request.stop_loss,
            request.take_profit,
            intent.time_in_force,
            intent.policy_hash
        );

        let result = match self.venue.open_position(request).await {
            Ok(ack) => Dispatch::Executed { ticket: ack.ticket },
            Err(VenueError::Rejected { code, description }) => {
                Dispatch::Rejected { code, description }
            }
            Err(VenueError::Transport(e)) => Dispatch::Rejected {
                code: TRANSPORT_ERROR_CODE,
                description: e.to_string(),
            },
            Err(VenueError::Protocol(msg)) => Dispatch::Rejected {
                code: PROTOCOL_ERROR_CODE,
                description: msg,
            },
        };

        Self::log_result(intent, &result);
        result
    }

    fn log_result(intent: &Intent, result: &Dispatch) {
        match result {
            Dispatch::Executed { ticket } => info!(
                event = events::EXECUTED,
                intent_id = %intent.intent_id,
                ticket = *ticket,
                "✅ [EXECUTED] {} {} {}",
                intent.side.as_str(),
                intent.quantity,
                intent.symbol
            ),
            Dispatch::Rejected { code, description } => error!(
                event = events::FAILED,
                intent_id = %intent.intent_id,
                code = *code,
                description = %description,
                "❌ [FAILED] {} {} {}",
                intent.side.as_str(),
                intent.quantity,
                intent.symbol
            ),
        }
    }
}
