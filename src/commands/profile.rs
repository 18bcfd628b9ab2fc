//! Profile commands.

use clap::{Args, Subcommand};

use kabphone::Storefront;
use kabphone_auth::guard::Route;
use kabphone_core::error::AppError;
use kabphone_entity::user::{UpdateProfileRequest, User};

use crate::output::{self, OutputFormat};

/// Arguments for profile commands
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Profile subcommand
    #[command(subcommand)]
    pub command: ProfileCommand,
}

/// Profile subcommands
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show the profile
    Show,
    /// Change profile fields; omitted fields keep their current value
    Update {
        /// First name
        #[arg(long)]
        first_name: Option<String>,
        /// Last name
        #[arg(long)]
        last_name: Option<String>,
        /// Phone number
        #[arg(long)]
        phone_number: Option<String>,
        /// LINE ID
        #[arg(long)]
        line_id: Option<String>,
        /// Delivery address
        #[arg(long)]
        address: Option<String>,
        /// Age in years
        #[arg(long)]
        age: Option<u32>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<String>,
    },
}

/// Execute profile commands
pub async fn execute(args: &ProfileArgs, app: &Storefront, format: OutputFormat) -> Result<(), AppError> {
    if !super::enter(app, Route::Profile) {
        return Ok(());
    }
    let mut view = app.profile();
    let user = view.settled().await.result::<User>()?;

    match &args.command {
        ProfileCommand::Show => print_user(&user, format),
        ProfileCommand::Update {
            first_name,
            last_name,
            phone_number,
            line_id,
            address,
            age,
            birth_date,
        } => {
            let birth_date = match birth_date {
                Some(raw) => super::account::parse_birth_date(raw)?,
                None => user.birth_date.unwrap_or_default(),
            };
            let request = UpdateProfileRequest {
                first_name: first_name.clone().unwrap_or_else(|| user.first_name.clone()),
                last_name: last_name.clone().unwrap_or_else(|| user.last_name.clone()),
                phone_number: phone_number.clone().unwrap_or_else(|| user.phone_number.clone()),
                line_id: line_id.clone().unwrap_or_else(|| user.line_id.clone()),
                address: address.clone().unwrap_or_else(|| user.address.clone()),
                age: age.unwrap_or(user.age),
                birth_date,
            };
            view.update(request).await?;
            print_user(&view.settled().await.result::<User>()?, format);
        }
    }
    Ok(())
}

fn print_user(user: &User, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_item(user, format),
        OutputFormat::Table => {
            output::print_kv("Username", &user.username);
            output::print_kv("Name", &user.full_name());
            output::print_kv("Phone", &user.phone_number);
            output::print_kv("LINE", &user.line_id);
            output::print_kv("Address", &user.address);
            output::print_kv("Age", &user.age.to_string());
            if let Some(birth_date) = user.birth_date {
                output::print_kv("Birth date", &birth_date.format("%Y-%m-%d").to_string());
            }
            output::print_kv("Role", user.role.as_str());
        }
    }
}
