use serde::{Deserialize, Serialize};

/// Direction of the position to open. Only the two sides a venue accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    /// Open long (buy at market)
    Buy,
    /// Open short (sell at market)
    Sell,
}

impl OrderSide {
    /// Action name understood by venue bridges
    pub fn action(&self) -> &'static str {
        match self {
            OrderSide::Buy => "open_long",
            OrderSide::Sell => "open_short",
        }
    }
}

/// Market order to open a new position. There is no limit price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpenPositionRequest {
    pub side: OrderSide,
    pub symbol: String,
    pub volume: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    /// Idempotency / comment tag, the intent id
    pub tag: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VenueTicket {
    pub ticket: u64,
}

/// Wire body sent to an HTTP venue bridge
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BridgeOrder {
    pub action: String,
    pub symbol: String,
    pub volume: f64,
    /// 0.0 means no stop loss
    pub sl: f64,
    /// 0.0 means no take profit
    pub tp: f64,
    pub comment: String,
}

/// Response from an HTTP venue bridge. Either `ticket` is present (accepted)
/// or `retcode` + `description` are (rejected).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BridgeResponse {
    pub ticket: Option<u64>,
    pub retcode: Option<i64>,
    #[serde(alias = "comment")]
    pub description: Option<String>,
}
