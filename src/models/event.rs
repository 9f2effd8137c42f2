use std::collections::HashMap;

use serde_json::Value;

use crate::error::DecodeError;

use super::{Book, GameResult, Quote, RoundResult, Suit, VACANT_PRICE};

/// One decoded push event from the exchange. Every frame decodes to exactly
/// one variant; unrecognized kinds land in `Unknown` so the dispatcher can
/// drop them without treating them as stream failures.
#[derive(Debug, Clone)]
pub enum ServerEvent {
    /// A new round's hand for the local player.
    DealingCards(HashMap<Suit, i64>),
    /// Book replacement for the suits present, plus an optional raw trade
    /// summary (`suit,price,buyer,seller`) left for the ledger to parse.
    Update {
        books: HashMap<Suit, Book>,
        trade: Option<String>,
    },
    EndRound(RoundResult),
    EndGame(GameResult),
    /// A `{status, message}` acknowledgment with no `kind`; log-only.
    Notice { status: String, message: String },
    Unknown { kind: String },
}

impl ServerEvent {
    /// Decode one text frame. Any failure discards only this frame; the
    /// stream itself is untouched.
    pub fn decode(raw: &str) -> Result<ServerEvent, DecodeError> {
        let value: Value = serde_json::from_str(raw)?;
        match value.get("kind").and_then(Value::as_str) {
            Some("dealing_cards") => decode_deal(data(&value)?),
            Some("update") => decode_update(data(&value)?),
            Some("end_round") => Ok(ServerEvent::EndRound(serde_json::from_value(
                data(&value)?.clone(),
            )?)),
            Some("end_game") => Ok(ServerEvent::EndGame(serde_json::from_value(
                data(&value)?.clone(),
            )?)),
            Some(other) => Ok(ServerEvent::Unknown {
                kind: other.to_string(),
            }),
            None => {
                let status = value.get("status").and_then(Value::as_str);
                let message = value.get("message").and_then(Value::as_str);
                match (status, message) {
                    (Some(status), Some(message)) => Ok(ServerEvent::Notice {
                        status: status.to_string(),
                        message: message.to_string(),
                    }),
                    _ => Err(DecodeError::MissingField("kind")),
                }
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::DealingCards(_) => "dealing_cards",
            ServerEvent::Update { .. } => "update",
            ServerEvent::EndRound(_) => "end_round",
            ServerEvent::EndGame(_) => "end_game",
            ServerEvent::Notice { .. } => "notice",
            ServerEvent::Unknown { .. } => "unknown",
        }
    }
}

fn data(value: &Value) -> Result<&Value, DecodeError> {
    value.get("data").ok_or(DecodeError::MissingField("data"))
}

fn decode_deal(data: &Value) -> Result<ServerEvent, DecodeError> {
    let map = data
        .as_object()
        .ok_or(DecodeError::BadShape("dealing_cards data"))?;

    let mut counts = HashMap::new();
    for (key, count) in map {
        // non-suit keys ride along in some payloads; they are not ours
        let Some(suit) = Suit::from_plural(key) else {
            continue;
        };
        let count = count.as_i64().ok_or(DecodeError::BadShape("card count"))?;
        counts.insert(suit, count);
    }
    Ok(ServerEvent::DealingCards(counts))
}

fn decode_update(data: &Value) -> Result<ServerEvent, DecodeError> {
    let map = data.as_object().ok_or(DecodeError::BadShape("update data"))?;

    let mut books = HashMap::new();
    for suit in Suit::ALL {
        let Some(entry) = map.get(suit.plural()) else {
            continue;
        };
        books.insert(suit, decode_book(entry)?);
    }
    let trade = map
        .get("trade")
        .and_then(Value::as_str)
        .filter(|raw| !raw.is_empty())
        .map(str::to_string);

    Ok(ServerEvent::Update { books, trade })
}

fn decode_book(entry: &Value) -> Result<Book, DecodeError> {
    Ok(Book {
        bid: decode_best(entry.get("bids"))?,
        ask: decode_best(entry.get("asks"))?,
        last_trade: entry
            .get("last_trade")
            .and_then(Value::as_str)
            .filter(|raw| !raw.is_empty())
            .map(str::to_string),
    })
}

/// Best level of one side. An absent list, an empty list and the explicit
/// `[-1, ""]` sentinel all mean the side is vacant.
fn decode_best(levels: Option<&Value>) -> Result<Option<Quote>, DecodeError> {
    let Some(levels) = levels.and_then(Value::as_array) else {
        return Ok(None);
    };
    let Some(best) = levels.first() else {
        return Ok(None);
    };

    let pair = best.as_array().ok_or(DecodeError::BadShape("book level"))?;
    let price = match pair.first() {
        Some(Value::Number(price)) => price
            .as_i64()
            .ok_or(DecodeError::BadShape("book level price"))?,
        Some(Value::String(price)) => price
            .parse()
            .map_err(|_| DecodeError::BadShape("book level price"))?,
        _ => return Err(DecodeError::BadShape("book level")),
    };
    if price == VACANT_PRICE {
        return Ok(None);
    }

    let player_name = pair
        .get(1)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok(Some(Quote { price, player_name }))
}
