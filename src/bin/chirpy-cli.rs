use chirpy_sdk::{ChirpyClient, ClientError};
use clap::{Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "chirpy-cli")]
#[command(about = "Command-line client for the Chirpy API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080", env = "CHIRPY_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server liveness
    Health,
    /// Show the admin visit report
    Metrics,
    /// Reset visits and delete all users (dev servers only)
    Reset,
    /// Register a user
    User { email: String },
    /// Publish a chirp
    Post {
        body: String,
        #[arg(long)]
        user_id: Option<Uuid>,
    },
    /// Run the moderation check on a body without publishing it
    Check { body: String },
    /// List every chirp
    List,
    /// Fetch one chirp by id
    Get { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = ChirpyClient::new(&cli.url);

    let result = match cli.command {
        Commands::Health => client.health().await.map(|body| println!("{}", body)),
        Commands::Metrics => client.metrics_page().await.map(|page| println!("{}", page)),
        Commands::Reset => client.reset().await.map(|_| println!("Reset complete")),
        Commands::User { email } => client.create_user(&email).await.and_then(print_json),
        Commands::Post { body, user_id } => {
            client.create_chirp(&body, user_id).await.and_then(print_json)
        }
        Commands::Check { body } => client.validate_chirp(&body).await.map(|cleaned| println!("{}", cleaned)),
        Commands::List => client.list_chirps().await.and_then(print_json),
        Commands::Get { id } => client.get_chirp(&id).await.and_then(print_json),
    };

    if let Err(e) = result {
        match e {
            ClientError::Api { status, message } => {
                eprintln!("Error: server returned status {}", status);
                eprintln!("Response: {}", message);
            }
            other => return Err(other.into()),
        }
        std::process::exit(1);
    }

    Ok(())
}

fn print_json<T: Serialize>(value: T) -> Result<(), ClientError> {
    println!("{}", render_json(&value)?);
    Ok(())
}

fn render_json<T: Serialize>(value: &T) -> Result<String, ClientError> {
    Ok(serde_json::to_string_pretty(value)?)
}
