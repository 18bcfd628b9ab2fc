//! Catalog browsing.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use kabphone::Storefront;
use kabphone_auth::guard::Route;
use kabphone_core::error::AppError;
use kabphone_entity::catalog::Phone;

use crate::output::{self, OutputFormat};

/// Arguments for `products`
#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Page number (0-based)
    #[arg(short, long, default_value_t = 0)]
    pub page: u32,
    /// Search term
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Product display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct PhoneRow {
    /// Phone ID
    id: u64,
    /// Brand and model
    name: String,
    /// Operating system
    os: String,
    /// Unit price
    price: String,
    /// Units in stock
    stock: i64,
}

impl From<&Phone> for PhoneRow {
    fn from(phone: &Phone) -> Self {
        Self {
            id: phone.id,
            name: phone.display_name(),
            os: phone.os.clone(),
            price: output::baht(phone.price),
            stock: phone.amount,
        }
    }
}

/// Execute `products`
pub async fn execute(args: &ProductsArgs, app: &Storefront, format: OutputFormat) -> Result<(), AppError> {
    super::enter(app, Route::Home);

    let listing = app.product_listing();
    if let Some(search) = &args.search {
        listing.search_now(search);
    }
    if args.page > 0 {
        listing.go_to_page(args.page);
    }

    let page = listing.settled().await.result::<kabphone_core::types::PageEnvelope<Phone>>()?;
    let rows: Vec<PhoneRow> = page.data.iter().map(PhoneRow::from).collect();
    output::print_list(&rows, format);

    if format == OutputFormat::Table {
        let total = page.total.map_or_else(|| "?".to_string(), |t| t.to_string());
        output::print_kv("Page", &format!("{} ({} matching)", listing.page(), total));
        if app.session().snapshot().is_authenticated() {
            output::print_kv("Items in cart", &listing.cart_count_settled().await.to_string());
        }
    }
    Ok(())
}
