use crate::error::CommandError;

use super::Suit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Buy => "buy",
            Direction::Sell => "sell",
        }
    }

    pub fn parse(name: &str) -> Option<Direction> {
        match name {
            "buy" => Some(Direction::Buy),
            "sell" => Some(Direction::Sell),
            _ => None,
        }
    }
}

/// A trading command as entered at the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Place {
        suit: Suit,
        price: i64,
        direction: Direction,
    },
    Cancel {
        suit: Suit,
        direction: Direction,
    },
}

impl Command {
    /// Parse an input line: `buy <suit> <price>`, `sell <suit> <price>` or
    /// `cancel <suit> <buy|sell>`. Suits are accepted in singular or plural
    /// form. Rejections here are local; no network is involved.
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            ["buy", suit, price] => Self::place(Direction::Buy, suit, price),
            ["sell", suit, price] => Self::place(Direction::Sell, suit, price),
            ["cancel", suit, direction] => {
                let suit = parse_suit(suit)?;
                let direction = Direction::parse(direction)
                    .ok_or_else(|| CommandError::Unrecognized(line.trim().to_string()))?;
                Ok(Command::Cancel { suit, direction })
            }
            _ => Err(CommandError::Unrecognized(line.trim().to_string())),
        }
    }

    fn place(direction: Direction, suit: &str, price: &str) -> Result<Command, CommandError> {
        let suit = parse_suit(suit)?;
        let price = price
            .parse::<i64>()
            .ok()
            .filter(|price| *price >= 0)
            .ok_or_else(|| CommandError::BadPrice(price.to_string()))?;
        Ok(Command::Place {
            suit,
            price,
            direction,
        })
    }
}

fn parse_suit(name: &str) -> Result<Suit, CommandError> {
    Suit::from_singular(name)
        .or_else(|| Suit::from_plural(name))
        .ok_or_else(|| CommandError::UnknownSuit(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_buy_and_sell() {
        assert_eq!(
            Command::parse("buy spade 5").unwrap(),
            Command::Place {
                suit: Suit::Spade,
                price: 5,
                direction: Direction::Buy,
            }
        );
        assert_eq!(
            Command::parse("sell hearts 12").unwrap(),
            Command::Place {
                suit: Suit::Heart,
                price: 12,
                direction: Direction::Sell,
            }
        );
    }

    #[test]
    fn parses_cancel() {
        assert_eq!(
            Command::parse("cancel club buy").unwrap(),
            Command::Cancel {
                suit: Suit::Club,
                direction: Direction::Buy,
            }
        );
    }

    #[test]
    fn rejects_bad_prices_locally() {
        assert!(matches!(
            Command::parse("buy spade five"),
            Err(CommandError::BadPrice(_))
        ));
        assert!(matches!(
            Command::parse("buy spade -3"),
            Err(CommandError::BadPrice(_))
        ));
    }

    #[test]
    fn rejects_unknown_suit() {
        assert!(matches!(
            Command::parse("buy joker 5"),
            Err(CommandError::UnknownSuit(_))
        ));
    }

    #[test]
    fn rejects_unrecognized_input() {
        assert!(matches!(
            Command::parse("hold my beer"),
            Err(CommandError::Unrecognized(_))
        ));
        assert!(matches!(
            Command::parse("cancel spade maybe"),
            Err(CommandError::Unrecognized(_))
        ));
    }
}
