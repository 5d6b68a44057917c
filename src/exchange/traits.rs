use async_trait::async_trait;

use crate::error::VenueError;

use super::types::{OpenPositionRequest, VenueTicket};

pub type VenueResult<T> = Result<T, VenueError>;

/// A trading venue that can open market positions.
///
/// Implementations block (from the caller's point of view) until the venue
/// accepts, rejects or its own timeout fires.
#[async_trait]
pub trait Venue: Send + Sync {
    fn name(&self) -> &'static str;

    async fn open_position(&self, request: OpenPositionRequest) -> VenueResult<VenueTicket>;
}
