//! Paper venue: accepts every order locally and hands out sequential tickets.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::info;

use crate::config::PaperVenueConfig;
use crate::error::VenueError;

use super::{
    traits::{Venue, VenueResult},
    types::{OpenPositionRequest, VenueTicket},
};

#[derive(Clone, Default)]
pub struct PaperVenue {
    next_ticket: Arc<AtomicU64>,
    orders: Arc<Mutex<Vec<OpenPositionRequest>>>,
    /// When set, every order is rejected with this code and description
    reject_with: Option<(i64, String)>,
}

impl PaperVenue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PaperVenueConfig) -> Self {
        match config.reject_code {
            Some(code) => Self::rejecting(
                code,
                config.reject_description.clone().unwrap_or_default(),
            ),
            None => Self::new(),
        }
    }

    pub fn rejecting(code: i64, description: impl Into<String>) -> Self {
        Self {
            reject_with: Some((code, description.into())),
            ..Self::default()
        }
    }

    /// Every order this venue has seen, accepted or not
    pub fn orders(&self) -> Vec<OpenPositionRequest> {
        self.orders.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl Venue for PaperVenue {
    fn name(&self) -> &'static str {
        "paper"
    }

    async fn open_position(&self, request: OpenPositionRequest) -> VenueResult<VenueTicket> {
        self.orders
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        if let Some((code, description)) = &self.reject_with {
            return Err(VenueError::Rejected {
                code: *code,
                description: description.clone(),
            });
        }

        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            "📝 [PAPER] {} {} {} (sl={:?}, tp={:?}, tag={}) -> ticket {}",
            request.side.action(),
            request.volume,
            request.symbol,
            request.stop_loss,
            request.take_profit,
            request.tag,
            ticket
        );
        Ok(VenueTicket { ticket })
    }
}
