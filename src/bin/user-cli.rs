use clap::{Parser, Subcommand};
use serde::Serialize;
use user_sdk::{ClientError, UserClient};

#[derive(Parser)]
#[command(name = "user-cli")]
#[command(about = "Command-line client for the user service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Fetch a user by id
    Get { id: String },
    /// Replace a user's name and email
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Delete a user by id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = UserClient::new(&cli.url);

    let result = match cli.command {
        Commands::Create { name, email } => client.create(&name, &email).await.map(print_json),
        Commands::Get { id } => client.get(&id).await.map(print_json),
        Commands::Update { id, name, email } => {
            client.update(&id, &name, &email).await.map(print_message)
        }
        Commands::Delete { id } => client.delete(&id).await.map(print_message),
    };

    match result {
        Ok(()) => Ok(()),
        Err(ClientError::Api { status, message }) => {
            eprintln!("Error: user service returned status {}", status);
            eprintln!("Response: {}", message);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn print_json<T: Serialize>(value: T) {
    match serde_json::to_string_pretty(&value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: failed to render response: {}", e),
    }
}

fn print_message(message: String) {
    println!("{}", message);
}
