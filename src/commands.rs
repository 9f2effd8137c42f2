//! Outbound trading commands, gated locally before any network call.

use crate::api::{ExchangeApi, HttpResponse};
use crate::error::CommandError;
use crate::models::{Command, Session};

pub struct CommandSender {
    pub api: ExchangeApi,
    pub session: Session,
}

impl CommandSender {
    pub fn new(api: ExchangeApi, session: Session) -> Self {
        Self { api, session }
    }

    /// Send one command to the exchange. The trading gate is checked first:
    /// outside an active round the command is rejected locally and the
    /// network is never touched. In-flight commands are not serialized or
    /// cancelable; the exchange arbitrates whatever arrives.
    pub async fn submit(&self, command: Command) -> Result<HttpResponse, CommandError> {
        if !self.session.trading_enabled() {
            return Err(CommandError::NoActiveRound);
        }

        let response = match command {
            Command::Place {
                suit,
                price,
                direction,
            } => self.api.place_order(suit, price, direction).await?,
            Command::Cancel { suit, direction } => self.api.cancel_order(suit, direction).await?,
        };
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, Suit};

    #[tokio::test]
    async fn commands_outside_a_round_never_reach_the_network() {
        // nothing listens here; a network attempt would surface as a
        // transport error instead of the local rejection
        let api = ExchangeApi::new("http://127.0.0.1:1", "tester");
        let sender = CommandSender::new(api, Session::new("tester", "tester"));

        let result = sender
            .submit(Command::Place {
                suit: Suit::Spade,
                price: 5,
                direction: Direction::Buy,
            })
            .await;
        assert!(matches!(result, Err(CommandError::NoActiveRound)));

        let result = sender
            .submit(Command::Cancel {
                suit: Suit::Spade,
                direction: Direction::Sell,
            })
            .await;
        assert!(matches!(result, Err(CommandError::NoActiveRound)));
    }
}
