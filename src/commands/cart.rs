//! Cart commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use kabphone::Storefront;
use kabphone_auth::guard::Route;
use kabphone_core::error::AppError;
use kabphone_entity::cart::{Cart, Item};

use crate::output::{self, OutputFormat};

/// Arguments for cart commands
#[derive(Debug, Args)]
pub struct CartArgs {
    /// Cart subcommand
    #[command(subcommand)]
    pub command: CartCommand,
}

/// Cart subcommands
#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart
    Show,
    /// Add one unit of a phone
    Add {
        /// Phone ID
        phone_id: u64,
    },
    /// Set an item's quantity (0 removes it)
    Set {
        /// Cart item ID
        item_id: u64,
        /// New quantity
        quantity: i64,
    },
    /// Remove an item
    Remove {
        /// Cart item ID
        item_id: u64,
    },
    /// Place an order for everything in the cart
    Checkout,
}

/// Cart item display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ItemRow {
    /// Item ID
    item: u64,
    /// Phone
    phone: String,
    /// Quantity
    quantity: i64,
    /// Unit price
    price: String,
    /// Line total
    subtotal: String,
}

impl From<&Item> for ItemRow {
    fn from(item: &Item) -> Self {
        Self {
            item: item.id,
            phone: item.phone.display_name(),
            quantity: item.amount,
            price: output::baht(item.phone.price),
            subtotal: output::baht(item.subtotal()),
        }
    }
}

/// Execute cart commands
pub async fn execute(args: &CartArgs, app: &Storefront, format: OutputFormat) -> Result<(), AppError> {
    if let CartCommand::Add { phone_id } = &args.command {
        super::enter(app, Route::Home);
        let listing = app.product_listing();
        if listing.add_to_cart(*phone_id).await? {
            output::print_kv("Items in cart", &listing.cart_count_settled().await.to_string());
        } else {
            output::print_warning("Log in to add items to the cart");
        }
        return Ok(());
    }

    if !super::enter(app, Route::Cart) {
        return Ok(());
    }
    let mut view = app.cart();
    let cart = view.settled().await.result::<Cart>()?;

    match &args.command {
        CartCommand::Show => print_cart(&cart, format),
        CartCommand::Set { item_id, quantity } => {
            view.on_update_quantity(*item_id, *quantity).await?;
            print_cart(&view.settled().await.result::<Cart>()?, format);
        }
        CartCommand::Remove { item_id } => {
            view.remove_item(*item_id).await?;
            print_cart(&view.settled().await.result::<Cart>()?, format);
        }
        CartCommand::Checkout => {
            if cart.items.is_empty() {
                output::print_warning("The cart is empty");
                return Ok(());
            }
            view.checkout().await?;
            output::print_kv("Now at", &app.current_path());
        }
        CartCommand::Add { .. } => {}
    }
    Ok(())
}

fn print_cart(cart: &Cart, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_item(cart, format),
        OutputFormat::Table => {
            let rows: Vec<ItemRow> = cart.items.iter().map(ItemRow::from).collect();
            output::print_list(&rows, format);
            output::print_kv("Total", &output::baht(cart.total_price()));
        }
    }
}
