//! Colored-terminal rendering surface and the command input loop.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tracing::warn;

use crate::commands::CommandSender;
use crate::models::{
    Book, Command, GameResult, Inventory, PlayerHand, Quote, RoundResult, Suit, Trade,
    VACANT_PRICE,
};
use crate::sync::{Phase, SurfaceEvent};
use crate::utils::{FileHandler, CL};

pub struct TerminalSurface {
    pub updates: Receiver<SurfaceEvent>,
    pub trade_log: Option<FileHandler>,
}

impl TerminalSurface {
    pub fn new(updates: Receiver<SurfaceEvent>, trade_log: Option<FileHandler>) -> Self {
        Self { updates, trade_log }
    }

    pub async fn start(mut self) {
        loop {
            match self.updates.recv().await {
                Ok(event) => self.render(event),
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "surface lagged behind state updates");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    fn render(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Inventory(inventory) => render_inventory(&inventory),
            SurfaceEvent::BookRow(suit, book) => render_book_row(suit, &book),
            SurfaceEvent::TradeLine(trade) => self.render_trade(&trade),
            SurfaceEvent::Status(phase) => render_status(phase),
            SurfaceEvent::RoundSummary(result) => render_round_summary(&result),
            SurfaceEvent::GameSummary(result) => render_game_summary(&result),
            SurfaceEvent::Note(note) => println!("{}{}{}", CL::Dull.get(), note, CL::End.get()),
        }
    }

    fn render_trade(&mut self, trade: &Trade) {
        println!("{}[-] {}{}", CL::DimLightBlue.get(), trade, CL::End.get());
        if let Some(log) = self.trade_log.as_mut() {
            if let Err(error) = log.write_line(trade.to_string()) {
                warn!(%error, "failed to append to trade log");
            }
        }
    }
}

fn render_status(phase: Phase) {
    println!("{}[{}]{}", CL::Teal.get(), phase.status_line(), CL::End.get());
}

fn render_inventory(inventory: &Inventory) {
    println!(
        "{}Hand      |:| Spades: {}x | Clubs: {}x | Diamonds: {}x | Hearts: {}x{}",
        CL::DullGreen.get(),
        inventory.spades,
        inventory.clubs,
        inventory.diamonds,
        inventory.hearts,
        CL::End.get()
    );
}

fn render_book_row(suit: Suit, book: &Book) {
    println!(
        "{}{:<9} |:| Bid: {} | Ask: {} |:| Last trade: {}{}",
        CL::DullTeal.get(),
        suit.label(),
        side(&book.bid),
        side(&book.ask),
        book.last_trade.as_deref().unwrap_or("-"),
        CL::End.get()
    );
}

/// One side of a book row; a vacant side renders with the exchange's own
/// sentinel so the table matches what the wire says.
fn side(quote: &Option<Quote>) -> String {
    match quote {
        Some(quote) => format!("({}, {})", quote.price, quote.player_name),
        None => format!("({}, )", VACANT_PRICE),
    }
}

fn render_hand(hand: &PlayerHand) {
    println!(
        "{}{}{}{} |:| Spades: {}x | Clubs: {}x | Diamonds: {}x | Hearts: {}x{}",
        CL::Dull.get(),
        CL::DimLightBlue.get(),
        hand.player_name,
        CL::Dull.get(),
        hand.spades,
        hand.clubs,
        hand.diamonds,
        hand.hearts,
        CL::End.get()
    );
}

fn render_round_summary(result: &RoundResult) {
    println!("\n{}--- Round Results ---{}", CL::Purple.get(), CL::End.get());
    println!("{} - Common suit: {}{}", CL::Dull.get(), result.common_suit.label(), CL::End.get());
    println!(
        "{} - Goal suit: {}{}{}{}",
        CL::Dull.get(),
        CL::LimeGreen.get(),
        result.goal_suit.label(),
        CL::End.get(),
        CL::End.get()
    );

    println!("\nFinal card count:");
    for suit in Suit::ALL {
        if let Some(count) = result.card_count.get(&suit) {
            println!("{}{}: {}{}", CL::Dull.get(), suit.label(), count, CL::End.get());
        }
    }

    println!("\nPlayer inventories:");
    for hand in &result.player_inventories {
        render_hand(hand);
    }

    println!("\nPoints earned this round:");
    for player in &result.player_points {
        println!(
            "{}{}: {}{}",
            CL::DullGreen.get(),
            player.player_name,
            player.points,
            CL::End.get()
        );
    }
    println!();
}

fn render_game_summary(result: &GameResult) {
    println!("\n{}=== Game Over ==={}", CL::Purple.get(), CL::End.get());
    println!("Final standings:");
    for (rank, player) in result.standings().iter().enumerate() {
        println!(
            "{}{}. {}: {} points{}",
            CL::Green.get(),
            rank + 1,
            player.player_name,
            player.points,
            CL::End.get()
        );
    }
    println!("\nThank you for playing!");
}

fn print_help() {
    println!("{}Commands:{}", CL::Teal.get(), CL::End.get());
    println!("  buy <suit> <price>        place a buy order, e.g. `buy spade 5`");
    println!("  sell <suit> <price>       place a sell order");
    println!("  cancel <suit> <buy|sell>  pull your resting order");
    println!("  help                      show this list");
    println!("  quit                      exit");
}

/// Read trading commands from stdin until `quit` or end of input. Local
/// rejections (closed round, bad price, bad syntax) print without touching
/// the network; everything else is one request/response against the
/// exchange, reported once, win or lose.
pub async fn read_commands(sender: CommandSender) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_help();

    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if line == "help" {
            print_help();
            continue;
        }

        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(error) => {
                println!("{}[!] {}{}", CL::DullRed.get(), error, CL::End.get());
                continue;
            }
        };

        match sender.submit(command).await {
            Ok(response) => {
                println!("{}[+] {}{}", CL::Green.get(), response.message, CL::End.get());
            }
            Err(error) => {
                println!("{}[!] {}{}", CL::DullRed.get(), error, CL::End.get());
            }
        }
    }
}
