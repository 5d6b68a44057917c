//! Semantic checks on a decoded intent. Rules run in order and the first
//! failing one wins: mode gate, then quantity, then side.

use crate::error::ValidationError;
use crate::intent::{Intent, Side};

#[derive(Clone, Debug, PartialEq)]
pub enum Verdict {
    /// Send to the venue
    Execute,
    /// Handled successfully without execution
    Ignore { reason: String },
}

pub fn validate(intent: &Intent) -> Result<Verdict, ValidationError> {
    // Non-LIVE intents are never rejected, whatever else they carry
    if !intent.mode.is_live() {
        return Ok(Verdict::Ignore {
            reason: format!("mode {} is not LIVE", intent.mode.as_str()),
        });
    }

    if intent.quantity <= 0.0 {
        return Err(ValidationError::InvalidQuantity {
            quantity: intent.quantity,
        });
    }

    if let Side::Other(side) = &intent.side {
        return Err(ValidationError::InvalidSide { side: side.clone() });
    }

    Ok(Verdict::Execute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Mode;

    fn intent(mode: &str, side: &str, quantity: f64) -> Intent {
        Intent {
            intent_id: "i1".to_string(),
            policy_hash: "h".to_string(),
            mode: Mode::parse(mode),
            symbol: "EURUSD".to_string(),
            side: Side::parse(side),
            quantity,
            stop_loss: None,
            take_profit: None,
            time_in_force: "GTC".to_string(),
            order_type: "MARKET".to_string(),
            timestamp: None,
        }
    }

    #[test]
    fn test_live_buy_and_sell_execute() {
        assert_eq!(validate(&intent("LIVE", "BUY", 0.1)), Ok(Verdict::Execute));
        assert_eq!(validate(&intent("LIVE", "SELL", 2.0)), Ok(Verdict::Execute));
    }

    #[test]
    fn test_non_live_is_ignored_even_with_garbage() {
        let verdict = validate(&intent("BACKTEST", "SIDEWAYS", -1.0)).unwrap();
        assert!(matches!(verdict, Verdict::Ignore { .. }));

        // Mode match is case-sensitive
        let verdict = validate(&intent("live", "BUY", 0.1)).unwrap();
        assert!(matches!(verdict, Verdict::Ignore { .. }));
    }

    #[test]
    fn test_zero_and_negative_quantity() {
        assert_eq!(
            validate(&intent("LIVE", "BUY", 0.0)),
            Err(ValidationError::InvalidQuantity { quantity: 0.0 })
        );
        assert_eq!(
            validate(&intent("LIVE", "SELL", -0.5)),
            Err(ValidationError::InvalidQuantity { quantity: -0.5 })
        );
    }

    #[test]
    fn test_quantity_checked_before_side() {
        assert_eq!(
            validate(&intent("LIVE", "HOLD", 0.0)),
            Err(ValidationError::InvalidQuantity { quantity: 0.0 })
        );
    }

    #[test]
    fn test_unknown_side() {
        assert_eq!(
            validate(&intent("LIVE", "buy", 0.1)),
            Err(ValidationError::InvalidSide { side: "buy".to_string() })
        );
        assert_eq!(
            validate(&intent("LIVE", "CLOSE", 0.1)),
            Err(ValidationError::InvalidSide { side: "CLOSE".to_string() })
        );
    }
}
