//! Account commands.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Args;
use dialoguer::Password;

use kabphone::Storefront;
use kabphone_auth::guard::Route;
use kabphone_core::error::{AppError, ErrorKind};
use kabphone_entity::user::{LoginRequest, RegisterRequest};

use crate::output::{self, OutputFormat};

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username
    pub username: String,
    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for `register`
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Username
    pub username: String,
    /// First name
    #[arg(long)]
    pub first_name: String,
    /// Last name
    #[arg(long)]
    pub last_name: String,
    /// Phone number (10 digits starting with 0)
    #[arg(long)]
    pub phone_number: String,
    /// LINE ID
    #[arg(long, default_value = "")]
    pub line_id: String,
    /// Delivery address
    #[arg(long)]
    pub address: String,
    /// Age in years
    #[arg(long)]
    pub age: u32,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub birth_date: String,
}

/// Execute `login`
pub async fn login(args: &LoginArgs, app: &Storefront) -> Result<(), AppError> {
    if !super::enter(app, Route::Login) {
        return Ok(());
    }
    let password = match &args.password {
        Some(password) => password.clone(),
        None => prompt_password("Password")?,
    };

    let claims = app
        .auth()
        .login(&LoginRequest {
            username: args.username.clone(),
            password,
        })
        .await?;

    let role = claims.role.as_ref().map_or("unknown", |r| r.as_str());
    output::print_success(&format!("Logged in as {} ({})", args.username, role));
    Ok(())
}

/// Execute `register`
pub async fn register(args: &RegisterArgs, app: &Storefront) -> Result<(), AppError> {
    if !super::enter(app, Route::Register) {
        return Ok(());
    }
    let birth_date = parse_birth_date(&args.birth_date)?;

    let request = RegisterRequest {
        username: args.username.clone(),
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        password: prompt_password("Password")?,
        confirm_password: prompt_password("Confirm password")?,
        phone_number: args.phone_number.clone(),
        line_id: args.line_id.clone(),
        address: args.address.clone(),
        age: args.age,
        birth_date,
    };
    app.auth().register(&request).await
}

/// Execute `logout`
pub async fn logout(app: &Storefront) -> Result<(), AppError> {
    app.auth().logout().await;
    Ok(())
}

/// Execute `whoami`
pub fn whoami(app: &Storefront, format: OutputFormat) -> Result<(), AppError> {
    let session = app.session().snapshot();
    let Some(claims) = session.claims else {
        output::print_warning("Not logged in");
        return Ok(());
    };

    match format {
        OutputFormat::Json => output::print_item(&claims, format),
        OutputFormat::Table => {
            output::print_kv("User", claims.username.as_deref().unwrap_or("-"));
            output::print_kv("ID", claims.subject_id.as_deref().unwrap_or("-"));
            output::print_kv("Role", claims.role.as_ref().map_or("-", |r| r.as_str()));
            if let Some(expires) = claims.expires_at() {
                let note = if claims.is_expired() { " (expired)" } else { "" };
                output::print_kv("Expires", &format!("{}{}", expires.to_rfc3339(), note));
            }
            let menu: Vec<&str> = Route::MENU
                .iter()
                .filter(|route| app.guard().check(route).is_allowed())
                .map(|route| route.title())
                .collect();
            output::print_kv("Menu", &menu.join(", "));
        }
    }
    Ok(())
}

fn prompt_password(prompt: &str) -> Result<String, AppError> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to read password", e))
}

/// Parse a `YYYY-MM-DD` date as midnight UTC.
pub(crate) fn parse_birth_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| AppError::with_source(ErrorKind::Validation, "birth_date must be YYYY-MM-DD", e))?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}
