//! Order history and tracking.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use kabphone::Storefront;
use kabphone_auth::guard::Route;
use kabphone_core::error::AppError;
use kabphone_entity::order::Order;

use crate::output::{self, OutputFormat};

/// Arguments for order commands
#[derive(Debug, Args)]
pub struct OrdersArgs {
    /// Order subcommand
    #[command(subcommand)]
    pub command: OrdersCommand,
}

/// Order subcommands
#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List past orders
    History {
        /// Page number (0-based)
        #[arg(short, long, default_value_t = 0)]
        page: u32,
    },
    /// Look up an order by tracking number
    Track {
        /// Tracking number
        tracking_number: String,
    },
}

/// Order display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct OrderRow {
    /// Order ID
    id: u64,
    /// Tracking number
    tracking: String,
    /// Items
    items: String,
    /// Total charged
    total: String,
    /// Delivered
    delivered: String,
    /// Placed at
    placed: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            tracking: if order.tracking_number.is_empty() {
                "-".to_string()
            } else {
                order.tracking_number.clone()
            },
            items: order.item_summary().join(", "),
            total: output::baht(order.total_price),
            delivered: if order.is_delivered { "yes" } else { "no" }.to_string(),
            placed: order
                .created_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Execute order commands
pub async fn execute(args: &OrdersArgs, app: &Storefront, format: OutputFormat) -> Result<(), AppError> {
    if !super::enter(app, Route::TrackOrder) {
        return Ok(());
    }

    match &args.command {
        OrdersCommand::History { page } => {
            let mut history = app.order_history();
            if *page > 0 {
                history.go_to_page(*page);
            }
            let orders = history.settled().await.result::<Vec<Order>>()?;
            let rows: Vec<OrderRow> = orders.iter().map(OrderRow::from).collect();
            output::print_list(&rows, format);
        }
        OrdersCommand::Track { tracking_number } => {
            let mut tracking = app.order_tracking();
            let order = tracking.search(tracking_number).await?;
            match format {
                OutputFormat::Json => output::print_item(&order, format),
                OutputFormat::Table => output::print_list(&[OrderRow::from(&order)], format),
            }
        }
    }
    Ok(())
}
