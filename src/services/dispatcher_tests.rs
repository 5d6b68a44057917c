//! Unit tests for the execution dispatcher - side mapping and venue error
//! normalization.

#[cfg(test)]
mod dispatcher_tests {
    use crate::constants::venue::{PROTOCOL_ERROR_CODE, UNSUPPORTED_SIDE_CODE};
    use crate::error::VenueError;
    use crate::exchange::paper::PaperVenue;
    use crate::exchange::traits::{Venue, VenueResult};
    use crate::exchange::types::{OpenPositionRequest, OrderSide, VenueTicket};
    use crate::intent::{decode, Intent, Side};
    use crate::services::dispatcher::*;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct ProtocolFailureVenue;

    #[async_trait]
    impl Venue for ProtocolFailureVenue {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn open_position(&self, _request: OpenPositionRequest) -> VenueResult<VenueTicket> {
            Err(VenueError::Protocol("missing ticket".to_string()))
        }
    }

    fn intent(side: &str) -> Intent {
        decode(&format!(
            r#"{{"intent_id":"i1","policy_hash":"h","mode":"LIVE","symbol":"EURUSD","side":"{}","quantity":0.1,"stop_loss":1.05,"time_in_force":"GTC"}}"#,
            side
        ))
        .unwrap()
    }

    // ============= Side Mapping Tests =============

    #[tokio::test]
    async fn test_buy_opens_long() {
        let venue = PaperVenue::new();
        let dispatcher = ExecutionDispatcher::new(Arc::new(venue.clone()));

        let result = dispatcher.dispatch(&intent("BUY")).await;

        assert_eq!(result, Dispatch::Executed { ticket: 1 });
        let orders = venue.orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].side, OrderSide::Buy);
        assert_eq!(orders[0].symbol, "EURUSD");
        assert_eq!(orders[0].volume, 0.1);
        assert_eq!(orders[0].stop_loss, Some(1.05));
        assert_eq!(orders[0].take_profit, None);
        assert_eq!(orders[0].tag, "i1");
    }

    #[tokio::test]
    async fn test_sell_opens_short() {
        let venue = PaperVenue::new();
        let dispatcher = ExecutionDispatcher::new(Arc::new(venue.clone()));

        dispatcher.dispatch(&intent("SELL")).await;

        assert_eq!(venue.orders()[0].side, OrderSide::Sell);
    }

    #[tokio::test]
    async fn test_unknown_side_never_reaches_venue() {
        let venue = PaperVenue::new();
        let dispatcher = ExecutionDispatcher::new(Arc::new(venue.clone()));

        let mut odd = intent("BUY");
        odd.side = Side::Other("HOLD".to_string());
        let result = dispatcher.dispatch(&odd).await;

        match result {
            Dispatch::Rejected { code, description } => {
                assert_eq!(code, UNSUPPORTED_SIDE_CODE);
                assert!(description.contains("HOLD"));
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
        assert_eq!(venue.order_count(), 0);
    }

    // ============= Rejection Tests =============

    #[tokio::test]
    async fn test_venue_rejection_passed_through_verbatim() {
        let venue = PaperVenue::rejecting(10019, "No money");
        let dispatcher = ExecutionDispatcher::new(Arc::new(venue.clone()));

        let result = dispatcher.dispatch(&intent("BUY")).await;

        assert_eq!(
            result,
            Dispatch::Rejected {
                code: 10019,
                description: "No money".to_string()
            }
        );
        assert_eq!(venue.order_count(), 1);
    }

    #[tokio::test]
    async fn test_protocol_error_gets_synthetic_code() {
        let dispatcher = ExecutionDispatcher::new(Arc::new(ProtocolFailureVenue));
        assert_eq!(dispatcher.venue_name(), "broken");

        let result = dispatcher.dispatch(&intent("SELL")).await;

        assert_eq!(
            result,
            Dispatch::Rejected {
                code: PROTOCOL_ERROR_CODE,
                description: "missing ticket".to_string()
            }
        );
    }
}
