//! Staybook CLI - Stay API inspection and management tools.
//!
//! # Usage
//!
//! ```bash
//! # List the first page of rooms
//! staybook rooms list
//!
//! # Show one booking as JSON
//! staybook bookings get 813
//!
//! # Price a draft booking
//! staybook bookings quote --room 12 --check-in 2026-09-01 --check-out 2026-09-05
//!
//! # Delete a user account
//! staybook users delete 42
//! ```
//!
//! # Commands
//!
//! - `rooms` - List, show, and delete rooms
//! - `users` - List, show, create, and delete user accounts
//! - `bookings` - List, show, quote, and delete bookings
//!
//! # Environment Variables
//!
//! Same as the back-office service (`STAY_API_BASE_URL`, `STAY_API_KEY`),
//! plus optional `STAY_SESSION_TOKEN` for calls that need an operator
//! session.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "staybook")]
#[command(author, version, about = "Staybook CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and manage rooms
    Rooms {
        #[command(subcommand)]
        action: RoomAction,
    },
    /// Inspect and manage user accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Inspect and manage bookings
    Bookings {
        #[command(subcommand)]
        action: BookingAction,
    },
}

#[derive(Subcommand)]
enum RoomAction {
    /// List one page of rooms
    List {
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show one room as JSON
    Get {
        /// Room id
        id: i64,
    },
    /// Delete a room
    Delete {
        /// Room id
        id: i64,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all user accounts
    List,
    /// Create a user account
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (min 6 characters)
        #[arg(short, long)]
        password: String,

        /// Account role (`ADMIN`, `USER`)
        #[arg(short, long, default_value = "USER")]
        role: String,
    },
    /// Show one account as JSON
    Get {
        /// User id
        id: i64,
    },
    /// Delete an account
    Delete {
        /// User id
        id: i64,
    },
}

#[derive(Subcommand)]
enum BookingAction {
    /// List one page of bookings, newest first
    List {
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show one booking as JSON
    Get {
        /// Booking id
        id: i64,
    },
    /// Price a draft booking without creating it
    Quote {
        /// Room id
        #[arg(short, long)]
        room: i64,
        /// Check-in date (YYYY-MM-DD)
        #[arg(long)]
        check_in: String,
        /// Check-out date (YYYY-MM-DD)
        #[arg(long)]
        check_out: String,
    },
    /// Delete a booking
    Delete {
        /// Booking id
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Rooms { action } => match action {
            RoomAction::List { page } => commands::rooms::list(page).await?,
            RoomAction::Get { id } => commands::rooms::get(id).await?,
            RoomAction::Delete { id } => commands::rooms::delete(id).await?,
        },
        Commands::Users { action } => match action {
            UserAction::List => commands::users::list().await?,
            UserAction::Create {
                name,
                email,
                password,
                role,
            } => commands::users::create(name, email, password, &role).await?,
            UserAction::Get { id } => commands::users::get(id).await?,
            UserAction::Delete { id } => commands::users::delete(id).await?,
        },
        Commands::Bookings { action } => match action {
            BookingAction::List { page } => commands::bookings::list(page).await?,
            BookingAction::Get { id } => commands::bookings::get(id).await?,
            BookingAction::Quote {
                room,
                check_in,
                check_out,
            } => commands::bookings::quote(room, &check_in, &check_out).await?,
            BookingAction::Delete { id } => commands::bookings::delete(id).await?,
        },
    }
    Ok(())
}
