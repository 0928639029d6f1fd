//! Order management commands.
//!
//! # Usage
//!
//! ```bash
//! odk orders list --status Shipped
//! odk orders show ord-100
//! odk orders approve ord-100
//! odk orders set-status ord-100 Delivered
//! ```
//!
//! Status changes go through the engine's two-step confirmation: the intent
//! is recorded first, the transition is only submitted after the operator
//! confirms at the prompt (or passes `--yes`, which answers the prompt).

// An operator tool talks on stdout; tracing carries the diagnostics.
#![allow(clippy::print_stdout)]

use std::io::Write;

use orderdesk_backoffice::backend::{BackendError, OrdersClient};
use orderdesk_backoffice::config::{BackofficeConfig, ConfigError};
use orderdesk_backoffice::orders::{self, LifecycleError, OrderSession, OrderView};
use orderdesk_core::{Money, OrderId, OrderStatus};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during order commands.
#[derive(Debug, Error)]
pub enum OrdersCommandError {
    /// Configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Lifecycle rule violation or backend refusal.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// The status argument is not a recognized status tag.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Reading the confirmation answer failed.
    #[error("Could not read confirmation: {0}")]
    Prompt(#[from] std::io::Error),
}

fn client() -> Result<OrdersClient, OrdersCommandError> {
    let config = BackofficeConfig::from_env()?;
    Ok(OrdersClient::new(&config))
}

fn parse_status(tag: &str) -> Result<OrderStatus, OrdersCommandError> {
    tag.parse().map_err(OrdersCommandError::InvalidStatus)
}

fn format_amount(view: &OrderView, amount: Decimal) -> String {
    Money::new(amount, view.currency).display()
}

/// List the store's orders, optionally filtered by status.
pub async fn list(status: Option<&str>) -> Result<(), OrdersCommandError> {
    let filter = status.map(parse_status).transpose()?;
    let client = client()?;

    let views = orders::load_orders(&client, filter).await?;
    tracing::info!(count = views.len(), "fetched orders");

    println!(
        "{:<24} {:<12} {:<9} {:>12}  {}",
        "ID", "STATUS", "APPROVED", "TOTAL", "UPDATED"
    );
    for view in &views {
        println!(
            "{:<24} {:<12} {:<9} {:>12}  {}",
            view.id.to_string(),
            view.status.to_string(),
            if view.is_approved { "yes" } else { "no" },
            format_amount(view, view.grand_total),
            view.updated_at.format("%Y-%m-%d %H:%M"),
        );
    }

    Ok(())
}

/// Show one order in full.
pub async fn show(id: &str) -> Result<(), OrdersCommandError> {
    let client = client()?;
    let view = orders::load_order(&client, &OrderId::new(id)).await?;

    println!("Order {} (version {})", view.id, view.version);
    println!(
        "  Status: {} (approved: {})",
        view.status,
        if view.is_approved { "yes" } else { "no" }
    );
    println!(
        "  Customer: {} {}",
        view.customer.first_name, view.customer.last_name
    );
    println!("  Delivery: {}", view.delivery_type);
    println!("  Created:  {}", view.created_at.format("%Y-%m-%d %H:%M"));
    println!("  Updated:  {}", view.updated_at.format("%Y-%m-%d %H:%M"));

    println!("  Lines:");
    for line in &view.lines {
        println!(
            "    {:<32} {:<16} x{:<4} {:>12}",
            line.name,
            line.sku,
            line.quantity,
            format_amount(&view, line.line_total),
        );
    }

    println!("  Subtotal: {}", format_amount(&view, view.sub_total));
    println!("  Shipping: {}", format_amount(&view, view.shipping_cost));
    println!("  Discount: -{}", format_amount(&view, view.discount));
    println!("  Total:    {}", format_amount(&view, view.grand_total));

    if !view.tax_breakdown.is_empty() {
        println!("  Taxes:");
        for tax in &view.tax_breakdown {
            println!(
                "    {:<24} {:>6.2}% on {:>12} = {}",
                tax.description,
                tax.rate_percent,
                format_amount(&view, tax.taxable_base),
                format_amount(&view, tax.tax_amount),
            );
        }
    }

    for payment in &view.payments {
        println!(
            "  Payment: {} {} (transaction {})",
            payment.method,
            format_amount(&view, payment.amount),
            payment.transaction_id,
        );
    }

    if let Some(address) = &view.shipping_address {
        println!("  Ship to:");
        println!("    {}", address.street_line1);
        println!("    {} {} {}", address.postal_code, address.city, address.province);
        println!("    {}", address.country);
        if !address.phone_number.is_empty() {
            println!("    {}", address.phone_number);
        }
    }

    if view.legal_next_states.is_empty() {
        println!("  Next states: (none - terminal)");
    } else {
        let next: Vec<String> = view
            .legal_next_states
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("  Next states: {}", next.join(", "));
    }

    Ok(())
}

/// Open the approval gate for an order.
pub async fn approve(id: &str) -> Result<(), OrdersCommandError> {
    let client = client()?;
    let mut session = OrderSession::open(client, &OrderId::new(id)).await?;

    if session.view().is_approved {
        println!("Order {id} is already approved.");
        return Ok(());
    }

    session.approve().await?;
    println!(
        "Order {id} approved (version {}).",
        session.view().version
    );

    Ok(())
}

/// Move an order to a new status through the two-step confirmation.
pub async fn set_status(id: &str, target: &str, yes: bool) -> Result<(), OrdersCommandError> {
    let target = parse_status(target)?;
    let client = client()?;
    let mut session = OrderSession::open(client, &OrderId::new(id)).await?;

    let from = session.view().status;
    session.begin_transition(target)?;

    if !(yes || confirm(&format!("Change order {id} from {from} to {target}?"))?) {
        session.cancel_transition();
        println!("Cancelled; order {id} left untouched.");
        return Ok(());
    }

    session.confirm_transition().await?;
    println!(
        "Order {id} is now {} (version {}).",
        session.view().status,
        session.view().version
    );

    Ok(())
}

fn confirm(question: &str) -> Result<bool, std::io::Error> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
