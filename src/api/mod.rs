//! Request/response channel to the exchange: registration and order entry.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{Direction, PlayerName, Suit};

pub const TESTNET_HTTP: &str = "http://testnet.figgiewars.com";
pub const LIVE_HTTP: &str = "http://exchange.figgiewars.com";
pub const TESTNET_WS: &str = "ws://testnet-ws.figgiewars.com";
pub const LIVE_WS: &str = "ws://exchange-ws.figgiewars.com";

// =-= Wire types =-= //

#[derive(Deserialize, Serialize, Debug)]
pub struct SubscribeMessage {
    pub action: String,
    pub playerid: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct HttpResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status == "SUCCESS"
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct RawOrderData {
    pub card: String, // "spade", "club", "diamond", "heart"
    pub price: i64,
    pub direction: String, // "buy" or "sell"
}

#[derive(Deserialize, Serialize, Debug)]
pub struct RawCancelOrderData {
    pub card: String,
    pub direction: String,
}

// =-= RestAPI =-= //

pub struct ExchangeApi {
    client: reqwest::Client,
    base_url: String,
    player_id: String,
}

impl ExchangeApi {
    pub fn new(base_url: &str, player_id: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            player_id: player_id.to_string(),
        }
    }

    /// Register the player id on the testnet. A non-SUCCESS status is a
    /// rejection; the message carries the reason.
    pub async fn register(&self) -> Result<HttpResponse, ApiError> {
        let body = self
            .client
            .post(format!("{}/register_testnet", self.base_url))
            .header("Playerid", &self.player_id)
            .send()
            .await?
            .text()
            .await?;
        debug!(body = %body, "registration response");

        let response = decode_response(&body)?;
        if !response.is_success() {
            return Err(ApiError::Rejected(response.message));
        }
        Ok(response)
    }

    pub async fn place_order(
        &self,
        suit: Suit,
        price: i64,
        direction: Direction,
    ) -> Result<HttpResponse, ApiError> {
        let order = RawOrderData {
            card: suit.singular().to_string(),
            price,
            direction: direction.as_str().to_string(),
        };
        self.post_json("order", &order).await
    }

    pub async fn cancel_order(
        &self,
        suit: Suit,
        direction: Direction,
    ) -> Result<HttpResponse, ApiError> {
        let cancel = RawCancelOrderData {
            card: suit.singular().to_string(),
            direction: direction.as_str().to_string(),
        };
        self.post_json("cancel", &cancel).await
    }

    async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<HttpResponse, ApiError> {
        let text = self
            .client
            .post(format!("{}/{path}", self.base_url))
            .header("Playerid", &self.player_id)
            .json(body)
            .send()
            .await?
            .text()
            .await?;
        debug!(path, body = %text, "exchange response");

        let response = decode_response(&text)?;
        if !response.is_success() {
            return Err(ApiError::Rejected(response.message));
        }
        Ok(response)
    }
}

/// The exchange sometimes double-encodes a response (a JSON string containing
/// JSON); one extra unwrap recovers the object before `status` is read.
pub fn decode_response(body: &str) -> Result<HttpResponse, ApiError> {
    let value: Value = serde_json::from_str(body)?;
    let value = match value {
        Value::String(inner) => serde_json::from_str(&inner)?,
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

/// Pull the assigned display name out of a registration message of the form
/// `"Registration successful. Player name: Alice."`.
pub fn player_name_from_registration(message: &str) -> Option<PlayerName> {
    let name = message.split(':').nth(1)?;
    let name = name.split('.').next()?.trim();
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}
