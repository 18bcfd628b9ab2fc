//! CLI command definitions and dispatch.

pub mod account;
pub mod admin;
pub mod cart;
pub mod orders;
pub mod products;
pub mod profile;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use kabphone::Storefront;
use kabphone_auth::guard::{GuardDecision, Route};
use kabphone_core::config::AppConfig;
use kabphone_core::error::AppError;
use kabphone_service::RecordingNotifier;

use crate::output::{self, OutputFormat};

/// KabPhone phone storefront client
#[derive(Debug, Parser)]
#[command(name = "kabphone", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login(account::LoginArgs),
    /// Create an account
    Register(account::RegisterArgs),
    /// Log out and clear the session
    Logout,
    /// Show the current session
    Whoami,
    /// Browse the product catalog
    Products(products::ProductsArgs),
    /// Manage the cart
    Cart(cart::CartArgs),
    /// Order history and tracking
    Orders(orders::OrdersArgs),
    /// View or edit the profile
    Profile(profile::ProfileArgs),
    /// Back-office commands (admin only)
    Admin(admin::AdminArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let notifier = Arc::new(RecordingNotifier::new());
        let app = Storefront::new(config, notifier.clone())?;

        let result = match &self.command {
            Commands::Login(args) => account::login(args, &app).await,
            Commands::Register(args) => account::register(args, &app).await,
            Commands::Logout => account::logout(&app).await,
            Commands::Whoami => account::whoami(&app, self.format),
            Commands::Products(args) => products::execute(args, &app, self.format).await,
            Commands::Cart(args) => cart::execute(args, &app, self.format).await,
            Commands::Orders(args) => orders::execute(args, &app, self.format).await,
            Commands::Profile(args) => profile::execute(args, &app, self.format).await,
            Commands::Admin(args) => admin::execute(args, &app, self.format).await,
        };

        output::print_toasts(&notifier.drain());
        if matches!(&result, Err(e) if e.is_unauthorized())
            && !matches!(self.command, Commands::Login(_))
        {
            output::print_warning("Session expired. Run `kabphone login` to sign in again.");
        }
        result
    }
}

/// Open `route` through the route guard. Prints the redirect and returns
/// `false` when the session may not see it.
pub fn enter(app: &Storefront, route: Route) -> bool {
    match app.open(&route) {
        GuardDecision::Allow => true,
        GuardDecision::Redirect(target) => {
            output::print_warning(&format!(
                "{} is not available to this session, redirected to {}",
                route.path(),
                target.path()
            ));
            false
        }
    }
}
