use std::io::BufRead;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tokio::time::Duration;

use seabattle::cli::{parse_command, render_match};
use seabattle::{
    init_logging, Command, Match, MatchResult, PeerSession, SessionConfig, Side, SoloSession,
    TcpTransport, OPPONENT_MOVE_DELAY,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Play against the scripted opponent on the local machine.
    Solo {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Pause before each opponent shot, in milliseconds")]
        delay_ms: Option<u64>,
    },
    /// Host a networked game and wait for a peer to connect.
    Host {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Abort the match after this many seconds without a message")]
        idle_timeout_secs: Option<u64>,
    },
    /// Join a networked game hosted by a peer.
    Join {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 15)]
        connect_timeout_secs: u64,
        #[arg(long, help = "Abort the match after this many seconds without a message")]
        idle_timeout_secs: Option<u64>,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

/// Forward parsed stdin lines to the session. Runs on its own thread since
/// stdin reads block.
fn spawn_input(commands: mpsc::Sender<Command>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Ok(cmd) => {
                    if commands.blocking_send(cmd).is_err() {
                        break;
                    }
                }
                Err(e) => eprintln!("{}", e),
            }
        }
    });
}

async fn render_loop(mut snapshots: watch::Receiver<Match>) {
    let mut last: Option<Match> = None;
    while snapshots.changed().await.is_ok() {
        let game = snapshots.borrow_and_update().clone();
        if last.as_ref() != Some(&game) {
            println!("{}", render_match(&game));
            last = Some(game);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let (command_tx, command_rx) = mpsc::channel(16);
    let (snapshot_tx, snapshot_rx) = watch::channel(Match::new(Side::Local));

    let result = match cli.command {
        Commands::Solo { seed, delay_ms } => {
            let delay = delay_ms.map_or(OPPONENT_MOVE_DELAY, Duration::from_millis);
            let config = SessionConfig::solo().with_opponent_delay(delay);
            let mut session = SoloSession::new(config, make_rng(seed));
            let printer = tokio::spawn(render_loop(snapshot_rx));
            spawn_input(command_tx);
            let result = session.run(command_rx, snapshot_tx).await;
            let _ = printer.await;
            result
        }
        Commands::Host {
            bind,
            seed,
            idle_timeout_secs,
        } => {
            let rng = make_rng(seed);
            let listener = TcpListener::bind(&bind).await?;
            println!("Waiting for a player to connect on {}...", bind);
            let (stream, addr) = listener.accept().await?;
            println!("Player connected from {}", addr);
            let transport = TcpTransport::with_config(
                stream,
                Duration::from_secs(30),
                idle_timeout_secs.map(Duration::from_secs),
            );
            let mut session = PeerSession::new(transport, SessionConfig::host(), rng);
            let printer = tokio::spawn(render_loop(snapshot_rx));
            spawn_input(command_tx);
            let result = session.run(command_rx, snapshot_tx).await;
            let _ = printer.await;
            result
        }
        Commands::Join {
            connect,
            seed,
            connect_timeout_secs,
            idle_timeout_secs,
        } => {
            let rng = make_rng(seed);
            println!("Connecting to {}...", connect);
            let transport = TcpTransport::connect(
                &connect,
                Duration::from_secs(connect_timeout_secs),
                idle_timeout_secs.map(Duration::from_secs),
            )
            .await?;
            println!("Connected successfully!");
            let mut session = PeerSession::new(transport, SessionConfig::guest(), rng);
            let printer = tokio::spawn(render_loop(snapshot_rx));
            spawn_input(command_tx);
            let result = session.run(command_rx, snapshot_tx).await;
            let _ = printer.await;
            result
        }
    };

    match result {
        Some(MatchResult::Winner(Side::Local)) => println!("You won the last match."),
        Some(MatchResult::Winner(Side::Opponent)) => println!("You lost the last match."),
        Some(MatchResult::Aborted) => println!("The match was aborted."),
        None => println!("Bye."),
    }
    Ok(())
}
