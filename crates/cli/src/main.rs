//! Orderdesk CLI - operator tools for order management.
//!
//! # Usage
//!
//! ```bash
//! # List the store's orders, optionally by status
//! odk orders list
//! odk orders list --status Complete
//!
//! # Show one order in full
//! odk orders show ord-100
//!
//! # Open the approval gate
//! odk orders approve ord-100
//!
//! # Change the order status (asks for confirmation)
//! odk orders set-status ord-100 Delivered
//! odk orders set-status ord-100 Delivered --yes
//! ```
//!
//! # Environment Variables
//!
//! - `ORDERDESK_API_URL` - Base URL of the order-management service
//! - `ORDERDESK_STORE_KEY` - Store-scope key for order listings
//! - `ORDERDESK_API_TOKEN` - Bearer token for the backend

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "odk")]
#[command(author, version, about = "Orderdesk operator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the store's orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders, optionally filtered by status
    List {
        /// Status filter (e.g. Open, Shipped, Complete)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Show one order in full
    Show {
        /// Order id
        id: String,
    },
    /// Open the approval gate for an order
    Approve {
        /// Order id
        id: String,
    },
    /// Move an order to a new status (two-step: asks before submitting)
    SetStatus {
        /// Order id
        id: String,
        /// Target status (must be legal from the current status)
        target: String,
        /// Answer yes at the confirmation step
        #[arg(long)]
        yes: bool,
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
        Commands::Orders { action } => match action {
            OrdersAction::List { status } => {
                commands::orders::list(status.as_deref()).await?;
            }
            OrdersAction::Show { id } => {
                commands::orders::show(&id).await?;
            }
            OrdersAction::Approve { id } => {
                commands::orders::approve(&id).await?;
            }
            OrdersAction::SetStatus { id, target, yes } => {
                commands::orders::set_status(&id, &target, yes).await?;
            }
        },
    }
    Ok(())
}
