use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use figgie_term::api::{self, ExchangeApi};
use figgie_term::commands::CommandSender;
use figgie_term::feed::EventFeed;
use figgie_term::models::{ServerEvent, Session};
use figgie_term::surface::{read_commands, TerminalSurface};
use figgie_term::sync::{SurfaceEvent, Synchronizer};
use figgie_term::utils::{FileHandler, CL};

#[derive(Parser)]
#[command(name = "figgie-term")]
#[command(about = "Terminal client for the FiggieWars exchange")]
struct Args {
    /// Connect to the testnet exchange (registers the player id first)
    #[arg(long)]
    testnet: bool,

    /// Player id: the name to register on testnet, an existing id on live
    #[arg(long)]
    player_id: String,

    /// Append executed trades to this file
    #[arg(long)]
    trade_log: Option<String>,
}

fn banner() {
    println!("|==============================================|");
    println!("|{}          Welcome to Figgie Term!             {}|", CL::Teal.get(), CL::End.get());
    println!("|        ---------------------------           |");
    println!("|   A terminal seat at the FiggieWars          |");
    println!("|   exchange: live books, live trades, and     |");
    println!("|   order entry straight from your prompt.     |");
    println!("|      Type 'help' for the command list.       |");
    println!("|                                              |");
    println!("|{}   -  All credit goes to Jane Street  -       {}|", CL::DullTeal.get(), CL::End.get());
    println!("|==============================================|\n");
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    banner();

    let (http_url, ws_url) = if args.testnet {
        (api::TESTNET_HTTP, api::TESTNET_WS)
    } else {
        (api::LIVE_HTTP, api::LIVE_WS)
    };

    let exchange = ExchangeApi::new(http_url, &args.player_id);

    // Testnet assigns a display name at registration; live reuses the id.
    let player_name = if args.testnet {
        match exchange.register().await {
            Ok(response) => {
                println!("{}[+] {}{}", CL::Green.get(), response.message, CL::End.get());
                api::player_name_from_registration(&response.message)
                    .unwrap_or_else(|| args.player_id.clone())
            }
            Err(error) => {
                println!("{}[!] Registration failed: {}{}", CL::DullRed.get(), error, CL::End.get());
                return;
            }
        }
    } else {
        args.player_id.clone()
    };

    let session = Session::new(&args.player_id, &player_name);
    info!(player = %session.player_name, "session ready");

    let trade_log = match args.trade_log.as_deref().map(FileHandler::new) {
        Some(Ok(log)) => Some(log),
        Some(Err(error)) => {
            println!("{}[!] Cannot open trade log: {}{}", CL::DullRed.get(), error, CL::End.get());
            return;
        }
        None => None,
    };

    let mut handles = Vec::new();

    let (event_tx, event_rx) = kanal::unbounded_async::<ServerEvent>();
    let feed_event_sender = Arc::new(event_tx);
    let sync_event_receiver = Arc::new(event_rx);

    let (surface_sender, _) = tokio::sync::broadcast::channel::<SurfaceEvent>(100);
    let surface_receiver = surface_sender.subscribe();


    // Feed listener
    let feed = EventFeed::new(ws_url, session.clone(), feed_event_sender);
    let feed_handle: tokio::task::JoinHandle<()> = tokio::task::spawn(async move {
        feed.start().await;
    });
    handles.push(feed_handle);


    // Synchronizer
    let sync_session = session.clone();
    let sync_surface_sender = surface_sender.clone();
    let sync_handle: tokio::task::JoinHandle<()> = tokio::task::spawn(async move {
        let mut synchronizer =
            Synchronizer::new(sync_session, sync_event_receiver, sync_surface_sender);
        synchronizer.start().await;
    });
    handles.push(sync_handle);


    // Rendering surface
    let surface = TerminalSurface::new(surface_receiver, trade_log);
    let surface_handle: tokio::task::JoinHandle<()> = tokio::task::spawn(async move {
        surface.start().await;
    });
    handles.push(surface_handle);


    // Command input owns the foreground; quitting it ends the session
    let sender = CommandSender::new(exchange, session);
    read_commands(sender).await;

    for handle in handles {
        handle.abort();
    }
}
