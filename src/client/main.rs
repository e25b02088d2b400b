//! Command-line client for the ParkEasy API.
//!
//! ```text
//! parkeasy nearby [--lat 4.65 --lon -74.05]
//! parkeasy register --name Ana --email ana@example.com --password secret1
//! parkeasy login --email ana@example.com --password secret1
//! parkeasy logout
//! parkeasy lots
//! parkeasy create-lot --name Central --address "Main street 1" --lat 4.6 --lon -74.0 --capacity 20
//! parkeasy spots <lot-id>
//! parkeasy toggle <lot-id> <label>
//! ```
//!
//! The server URL comes from `--server` or `CLIENT_API_URL`. The session is
//! kept in `<config dir>/parkeasy/session.toml` between runs.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use parkeasy::client::{ApiClient, ClientError, FileSessionStore};
use parkeasy::shared::auth::{LoginRequest, RegisterRequest};
use parkeasy::shared::config::{AppConfig, SERVER_URL_ENV};
use parkeasy::shared::lot::CreateLotRequest;
use parkeasy::shared::ranking::{Position, RankedLot};

#[derive(Parser)]
#[command(name = "parkeasy", about = "Find a parking spot, or manage your lots")]
struct Cli {
    /// API base URL
    #[arg(long, global = true, env = SERVER_URL_ENV)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List lots with free spots, nearest first when a position is given
    Nearby {
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Create an owner account and log in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "PARKEASY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in as an owner
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PARKEASY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// List your lots
    Lots,
    /// Create a lot and its spots
    CreateLot {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long)]
        capacity: i32,
    },
    /// Show the spots of one of your lots
    Spots {
        lot_id: Uuid,
    },
    /// Flip a spot between free and occupied
    Toggle {
        lot_id: Uuid,
        /// Spot label, e.g. A3
        label: String,
    },
}

fn print_ranked(lots: &[RankedLot]) {
    if lots.is_empty() {
        println!("No lots available.");
        return;
    }

    println!("{:<30} {:>6} {:>6} {:>5} {:>10}", "NAME", "FREE", "TOTAL", "%", "DISTANCE");
    println!("{}", "-".repeat(62));
    for lot in lots {
        let a = &lot.availability;
        let distance = lot
            .distance
            .map(|d| format!("{:.2} km", d))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<30} {:>6} {:>6} {:>5} {:>10}",
            a.name,
            a.free_count(),
            a.snapshot.capacity,
            a.percentage(),
            distance
        );
    }
}

fn report(err: &ClientError) {
    eprintln!("Error: {}", err);
    for field in err.field_errors() {
        eprintln!("  {}: {}", field.field, field.message);
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let mut builder = AppConfig::builder();
    if let Some(server) = cli.server {
        builder = builder.server_url(server);
    }
    let config = builder.build()?;
    let client = ApiClient::new(config, Arc::new(FileSessionStore::default_location()?));

    match cli.command {
        Commands::Nearby { lat, lon } => {
            let lots = client.nearby(Position::from_parts(lat, lon)).await?;
            print_ranked(&lots);
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            let auth = client
                .register(&RegisterRequest {
                    name,
                    email,
                    password,
                })
                .await?;
            println!("{} ({})", auth.message, auth.user.email);
        }
        Commands::Login { email, password } => {
            let auth = client.login(&LoginRequest { email, password }).await?;
            println!("{} ({})", auth.message, auth.user.email);
        }
        Commands::Logout => {
            client.logout()?;
            println!("Logged out");
        }
        Commands::Lots => {
            let lots = client.my_lots().await?;
            if lots.is_empty() {
                println!("You have no lots yet.");
            }
            for lot in &lots {
                println!(
                    "{}  {:<30} {:>5} spots  {}",
                    lot.id,
                    lot.name,
                    lot.capacity,
                    lot.status.as_str()
                );
            }
        }
        Commands::CreateLot {
            name,
            address,
            lat,
            lon,
            capacity,
        } => {
            let created = client
                .create_lot(&CreateLotRequest {
                    name,
                    address,
                    latitude: lat,
                    longitude: lon,
                    capacity,
                })
                .await?;
            println!(
                "Created {} ({}) with {} spots",
                created.lot.name,
                created.lot.id,
                created.spots.len()
            );
        }
        Commands::Spots { lot_id } => {
            let spots = client.list_spots(lot_id).await?;
            for spot in &spots {
                let state = if spot.occupied { "occupied" } else { "free" };
                println!("{:<8} {:<10} {}", spot.label, spot.kind, state);
            }
            let occupied = spots.iter().filter(|s| s.occupied).count();
            println!("\n{} of {} occupied", occupied, spots.len());
        }
        Commands::Toggle { lot_id, label } => {
            let spots = client.list_spots(lot_id).await?;
            let spot = spots
                .iter()
                .find(|s| s.label.eq_ignore_ascii_case(&label))
                .ok_or_else(|| ClientError::Rejected {
                    status: 404,
                    message: format!("No spot labelled {} in lot {}", label, lot_id),
                })?;
            let updated = client.toggle_spot(spot).await?;
            let state = if updated.occupied { "occupied" } else { "free" };
            println!("{} is now {}", updated.label, state);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        report(&err);
        std::process::exit(1);
    }
}
