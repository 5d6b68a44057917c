//! HTTP venue bridge adapter (REST, JSON).
//!
//! Talks to a small bridge process that sits in front of the real terminal:
//! `POST {base_url}/positions` with a [`BridgeOrder`], answered by a
//! [`BridgeResponse`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::HttpVenueConfig;
use crate::constants::venue::NO_LEVEL;
use crate::error::VenueError;

use super::{
    traits::{Venue, VenueResult},
    types::{BridgeOrder, BridgeResponse, OpenPositionRequest, VenueTicket},
};

#[derive(Clone)]
pub struct HttpVenue {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpVenue {
    pub fn new(config: &HttpVenueConfig) -> Result<Self, VenueError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn auth_headers(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.header("X-API-KEY", key),
            None => req,
        }
    }

    pub(crate) fn bridge_order(request: &OpenPositionRequest) -> BridgeOrder {
        BridgeOrder {
            action: request.side.action().to_string(),
            symbol: request.symbol.clone(),
            volume: request.volume,
            sl: request.stop_loss.unwrap_or(NO_LEVEL),
            tp: request.take_profit.unwrap_or(NO_LEVEL),
            comment: request.tag.clone(),
        }
    }

    /// Turn a bridge reply into a ticket or a rejection.
    pub(crate) fn interpret(status: u16, body: &str) -> VenueResult<VenueTicket> {
        let success = (200..300).contains(&status);

        match serde_json::from_str::<BridgeResponse>(body) {
            Ok(resp) => {
                if let (true, Some(ticket)) = (success, resp.ticket) {
                    return Ok(VenueTicket { ticket });
                }
                if let Some(code) = resp.retcode {
                    return Err(VenueError::Rejected {
                        code,
                        description: resp.description.unwrap_or_default(),
                    });
                }
                if !success {
                    return Err(VenueError::Rejected {
                        code: status as i64,
                        description: resp
                            .description
                            .unwrap_or_else(|| format!("HTTP {}", status)),
                    });
                }
                Err(VenueError::Protocol(
                    "response carried neither ticket nor retcode".to_string(),
                ))
            }
            Err(_) if !success => Err(VenueError::Rejected {
                code: status as i64,
                description: body.trim().to_string(),
            }),
            Err(e) => Err(VenueError::Protocol(e.to_string())),
        }
    }
}

#[async_trait]
impl Venue for HttpVenue {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn open_position(&self, request: OpenPositionRequest) -> VenueResult<VenueTicket> {
        let url = format!("{}/positions", self.base_url);
        let body = Self::bridge_order(&request);

        let resp = self
            .auth_headers(self.client.post(&url))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let text = resp.text().await?;
        Self::interpret(status, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::types::OrderSide;

    #[test]
    fn test_bridge_order_uses_zero_sentinel() {
        let request = OpenPositionRequest {
            side: OrderSide::Sell,
            symbol: "EURUSD".to_string(),
            volume: 0.2,
            stop_loss: None,
            take_profit: Some(1.05),
            tag: "i1".to_string(),
        };
        let order = HttpVenue::bridge_order(&request);
        assert_eq!(order.action, "open_short");
        assert_eq!(order.sl, 0.0);
        assert_eq!(order.tp, 1.05);
        assert_eq!(order.comment, "i1");
    }

    #[test]
    fn test_interpret_accepted() {
        let ticket = HttpVenue::interpret(200, r#"{"ticket":123456}"#).unwrap();
        assert_eq!(ticket.ticket, 123456);
    }

    #[test]
    fn test_interpret_rejected_with_retcode() {
        let body = r#"{"retcode":10019,"comment":"No money"}"#;
        let err = HttpVenue::interpret(200, body).unwrap_err();
        match err {
            VenueError::Rejected { code, description } => {
                assert_eq!(code, 10019);
                assert_eq!(description, "No money");
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_interpret_http_error_without_retcode() {
        let err = HttpVenue::interpret(503, "bridge offline").unwrap_err();
        match err {
            VenueError::Rejected { code, description } => {
                assert_eq!(code, 503);
                assert_eq!(description, "bridge offline");
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_interpret_garbage_success_is_protocol_error() {
        assert!(matches!(
            HttpVenue::interpret(200, "<html>"),
            Err(VenueError::Protocol(_))
        ));
        assert!(matches!(
            HttpVenue::interpret(200, "{}"),
            Err(VenueError::Protocol(_))
        ));
    }

    #[test]
    fn test_new_trims_base_url() {
        let config = HttpVenueConfig {
            base_url: "http://127.0.0.1:8000/".to_string(),
            api_key: None,
            timeout_secs: 5,
        };
        let venue = HttpVenue::new(&config).unwrap();
        assert_eq!(venue.base_url, "http://127.0.0.1:8000");
    }
}
