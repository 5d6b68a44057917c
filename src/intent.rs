//! Execution intents: the data model, the decoder for queued documents and
//! the compact serializer producers use to write them.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::constants::venue::DEFAULT_MARKET_ORDER_TYPE;
use crate::error::DecodeError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
    /// Anything that is not exactly `BUY` or `SELL`. Kept so validation can
    /// report it instead of the decoder.
    Other(String),
}

impl Side {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "BUY" => Side::Buy,
            "SELL" => Side::Sell,
            other => Side::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
            Side::Other(s) => s,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Live,
    Other(String),
}

impl Mode {
    pub fn parse(raw: &str) -> Self {
        if raw == "LIVE" {
            Mode::Live
        } else {
            Mode::Other(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Mode::Live => "LIVE",
            Mode::Other(s) => s,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Mode::Live)
    }
}

/// One decoded execution intent. Immutable once decoded.
#[derive(Clone, Debug, PartialEq)]
pub struct Intent {
    /// Opaque correlation key, also sent to the venue as the order comment
    pub intent_id: String,
    /// Provenance tag, logged only
    pub policy_hash: String,
    pub mode: Mode,
    pub symbol: String,
    pub side: Side,
    pub quantity: f64,
    /// `None` when absent, non-numeric or zero
    pub stop_loss: Option<f64>,
    /// `None` when absent, non-numeric or zero
    pub take_profit: Option<f64>,
    /// Passed through for logging
    pub time_in_force: String,
    /// Passed through for logging; dispatch is always a market order
    pub order_type: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Parse the full text of one queued file into an [`Intent`].
pub fn decode(raw: &str) -> Result<Intent, DecodeError> {
    // Strip BOM if present
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let doc: Value =
        serde_json::from_str(raw).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    let obj = doc.as_object().ok_or(DecodeError::NotAnObject)?;

    Ok(Intent {
        intent_id: required_str(obj, "intent_id")?,
        policy_hash: optional_str(obj, "policy_hash").unwrap_or_default(),
        mode: Mode::parse(&required_str(obj, "mode")?),
        symbol: required_str(obj, "symbol")?,
        side: Side::parse(&required_str(obj, "side")?),
        quantity: required_number(obj, "quantity")?,
        stop_loss: optional_level(obj, "stop_loss"),
        take_profit: optional_level(obj, "take_profit"),
        time_in_force: optional_str(obj, "time_in_force").unwrap_or_default(),
        order_type: optional_str(obj, "order_type")
            .unwrap_or_else(|| DEFAULT_MARKET_ORDER_TYPE.to_string()),
        timestamp: optional_str(obj, "timestamp").and_then(|s| parse_timestamp(&s)),
    })
}

impl Intent {
    /// Compact JSON using the same field names [`decode`] reads.
    pub fn to_json(&self) -> String {
        let mut obj = Map::new();
        obj.insert("intent_id".into(), Value::from(self.intent_id.clone()));
        if let Some(ts) = &self.timestamp {
            obj.insert("timestamp".into(), Value::from(ts.to_rfc3339()));
        }
        obj.insert("symbol".into(), Value::from(self.symbol.clone()));
        obj.insert("side".into(), Value::from(self.side.as_str()));
        obj.insert("order_type".into(), Value::from(self.order_type.clone()));
        obj.insert("quantity".into(), Value::from(self.quantity));
        if let Some(sl) = self.stop_loss {
            obj.insert("stop_loss".into(), Value::from(sl));
        }
        if let Some(tp) = self.take_profit {
            obj.insert("take_profit".into(), Value::from(tp));
        }
        obj.insert("time_in_force".into(), Value::from(self.time_in_force.clone()));
        obj.insert("policy_hash".into(), Value::from(self.policy_hash.clone()));
        obj.insert("mode".into(), Value::from(self.mode.as_str()));
        Value::Object(obj).to_string()
    }
}

fn required_str(obj: &Map<String, Value>, field: &'static str) -> Result<String, DecodeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(DecodeError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(DecodeError::InvalidField {
            field,
            reason: format!("expected string, got {}", other),
        }),
    }
}

fn optional_str(obj: &Map<String, Value>, field: &str) -> Option<String> {
    obj.get(field).and_then(|v| v.as_str()).map(str::to_string)
}

fn as_number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .filter(|n| n.is_finite())
}

fn required_number(obj: &Map<String, Value>, field: &'static str) -> Result<f64, DecodeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(DecodeError::MissingField(field)),
        Some(v) => as_number(v).ok_or_else(|| DecodeError::InvalidField {
            field,
            reason: format!("expected a finite number, got {}", v),
        }),
    }
}

/// Zero is the "no level" sentinel, so it collapses into `None` too.
fn optional_level(obj: &Map<String, Value>, field: &str) -> Option<f64> {
    obj.get(field).and_then(as_number).filter(|n| *n != 0.0)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    // Naive ISO timestamps are taken as UTC
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
