//! Back-office commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use kabphone::Storefront;
use kabphone_auth::guard::Route;
use kabphone_core::error::{AppError, ErrorKind};
use kabphone_entity::analytics::{BestWorstPhones, TotalIncome};
use kabphone_entity::catalog::{ImageUpload, PhoneForm};
use kabphone_entity::order::Order;

use super::orders::OrderRow;
use crate::output::{self, OutputFormat};

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Product form fields shared by add and edit
#[derive(Debug, Args)]
pub struct ProductFields {
    /// Brand name
    #[arg(long)]
    pub brand: String,
    /// Model name
    #[arg(long)]
    pub model: String,
    /// Operating system
    #[arg(long)]
    pub os: String,
    /// Unit price
    #[arg(long)]
    pub price: f64,
    /// Units in stock
    #[arg(long)]
    pub amount: i64,
    /// Product image (.jpg, .jpeg or .png)
    #[arg(long)]
    pub image: Option<PathBuf>,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Income for the current day, week, month and year
    Income,
    /// Best and worst selling phones per period
    BestWorst,
    /// List every order
    Orders,
    /// Mark an order delivered
    Deliver {
        /// Order ID
        order_id: u64,
        /// Mark as not delivered instead
        #[arg(long)]
        undo: bool,
    },
    /// Attach a tracking number to an order
    AddTracking {
        /// Order ID
        order_id: u64,
        /// Tracking number
        tracking_number: String,
    },
    /// Add a product
    AddProduct(ProductFields),
    /// Replace a product's fields
    EditProduct {
        /// Phone ID
        id: u64,
        /// New field values
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    DeleteProduct {
        /// Phone ID
        id: u64,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct IncomeRow {
    period: &'static str,
    income: String,
}

#[derive(Debug, Serialize, Tabled)]
struct RankingRow {
    period: &'static str,
    best: String,
    worst: String,
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, app: &Storefront, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        AdminCommand::Income => {
            if !super::enter(app, Route::ShowIncome) {
                return Ok(());
            }
            let income = app.income_report().settled().await.result::<TotalIncome>()?;
            match format {
                OutputFormat::Json => output::print_item(&income, format),
                OutputFormat::Table => {
                    let rows: Vec<IncomeRow> = income
                        .rows()
                        .into_iter()
                        .map(|(period, amount)| IncomeRow {
                            period,
                            income: output::baht(amount),
                        })
                        .collect();
                    output::print_list(&rows, format);
                }
            }
        }
        AdminCommand::BestWorst => {
            if !super::enter(app, Route::WorstBestSelling) {
                return Ok(());
            }
            let ranking = app.sales_ranking().settled().await.result::<BestWorstPhones>()?;
            match format {
                OutputFormat::Json => output::print_item(&ranking, format),
                OutputFormat::Table => {
                    let rows: Vec<RankingRow> = ranking
                        .rows()
                        .into_iter()
                        .map(|(period, best, worst)| RankingRow {
                            period,
                            best: best.label().unwrap_or_else(|| "-".to_string()),
                            worst: worst.label().unwrap_or_else(|| "-".to_string()),
                        })
                        .collect();
                    output::print_list(&rows, format);
                }
            }
        }
        AdminCommand::Orders => {
            if !super::enter(app, Route::CheckOrder) {
                return Ok(());
            }
            let orders = app.admin_orders().settled().await.result::<Vec<Order>>()?;
            let rows: Vec<OrderRow> = orders.iter().map(OrderRow::from).collect();
            output::print_list(&rows, format);
        }
        AdminCommand::Deliver { order_id, undo } => {
            if !super::enter(app, Route::CheckOrder) {
                return Ok(());
            }
            app.admin_orders().set_delivered(*order_id, !undo).await?;
        }
        AdminCommand::AddTracking {
            order_id,
            tracking_number,
        } => {
            if !super::enter(app, Route::CheckOrder) {
                return Ok(());
            }
            app.admin_orders().add_tracking(*order_id, tracking_number).await?;
        }
        AdminCommand::AddProduct(fields) => {
            if !super::enter(app, Route::AddProduct) {
                return Ok(());
            }
            app.product_admin().add_product(phone_form(fields)?).await?;
        }
        AdminCommand::EditProduct { id, fields } => {
            if !super::enter(app, Route::EditProduct(*id)) {
                return Ok(());
            }
            app.product_admin().edit_product(*id, phone_form(fields)?).await?;
        }
        AdminCommand::DeleteProduct { id } => {
            if !super::enter(app, Route::EditProduct(*id)) {
                return Ok(());
            }
            app.product_admin().delete_product(*id).await?;
        }
    }
    Ok(())
}

fn phone_form(fields: &ProductFields) -> Result<PhoneForm, AppError> {
    let image = fields.image.as_deref().map(read_image).transpose()?;
    Ok(PhoneForm {
        brand_name: fields.brand.clone(),
        model_name: fields.model.clone(),
        os: fields.os.clone(),
        price: fields.price,
        amount: fields.amount,
        image,
    })
}

fn read_image(path: &Path) -> Result<ImageUpload, AppError> {
    let bytes = std::fs::read(path).map_err(|e| {
        AppError::with_source(
            ErrorKind::Validation,
            format!("Cannot read image {}", path.display()),
            e,
        )
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(ImageUpload::from_file_name(file_name, bytes))
}
