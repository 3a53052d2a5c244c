use clap::{Parser, Subcommand};
use serde_json::json;
use tokio::net::TcpListener;

use shotgrid::{
    init_logging, server, ErrorKind, GameApi, GameSession, SessionHandle, Stub, TcpTransport,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Host the game session and serve clients over TCP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: String,
        #[arg(long, help = "Start a game on this board size at boot (e.g., --range 10)")]
        range: Option<i64>,
    },
    /// Send one operation to a running server and print the reply as JSON.
    Client {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        #[command(subcommand)]
        op: Operation,
    },
}

#[derive(Subcommand)]
enum Operation {
    /// Start a game on a RANGE×RANGE board.
    Start { range: i64 },
    /// Discard the current game.
    End,
    /// Place ships, e.g. "1A 2B, 3D 3E".
    Ships { spec: String },
    /// Fire at one or more cells, e.g. "1A, 2B".
    Shoot { spec: String },
    /// Print game statistics.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, range } => {
            let session = SessionHandle::new(GameSession::new());
            if let Some(range) = range {
                session.start(range).await?;
            }
            let listener = TcpListener::bind(&bind).await?;
            server::serve(listener, session).await?;
        }
        Commands::Client { connect, op } => {
            let stub = Stub::new(TcpTransport::connect(connect.as_str()).await?);
            let reply = match op {
                Operation::Start { range } => stub.start(range).await.map(|()| json!({})),
                Operation::End => stub.end().await.map(|()| json!({})),
                Operation::Ships { spec } => stub.add_ships(&spec).await.map(|()| json!({})),
                Operation::Shoot { spec } => stub
                    .shoot(&spec)
                    .await
                    .and_then(|r| Ok(serde_json::to_value(r)?)),
                Operation::Stats => stub
                    .statistic()
                    .await
                    .and_then(|s| Ok(serde_json::to_value(s)?)),
            };
            match reply {
                Ok(value) => println!("{}", value),
                Err(e) => {
                    let kind = ErrorKind::of(&e);
                    println!("{}", json!({ "error": kind, "message": e.to_string() }));
                    std::process::exit(match kind {
                        ErrorKind::BadRequest => 2,
                        ErrorKind::InvalidState => 3,
                        ErrorKind::Internal => 1,
                    });
                }
            }
        }
    }
    Ok(())
}
