use std::sync::Arc;

use tracing::info;

use crate::config::{AppConfig, VenueKind};
use crate::error::VenueError;

use super::{http::HttpVenue, paper::PaperVenue, traits::Venue};

pub fn build_venue(config: &AppConfig) -> Result<Arc<dyn Venue>, VenueError> {
    match config.venue.kind {
        VenueKind::Paper => {
            info!("🧪 Using paper venue");
            Ok(Arc::new(PaperVenue::from_config(&config.venue.paper)))
        }
        VenueKind::Http => {
            info!("🌐 Using HTTP venue bridge at {}", config.venue.http.base_url);
            Ok(Arc::new(HttpVenue::new(&config.venue.http)?))
        }
    }
}
