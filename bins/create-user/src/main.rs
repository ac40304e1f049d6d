//! Creates a staff account.
//!
//! Applies the same password rule as registration, so the account can log
//! in through the API straight away.
//!
//! Usage: create-user <username> <password>
//! Example: create-user admin Admin@123

use anyhow::{Context, bail};
use crpms_core::auth::{check_password_policy, hash_password};
use crpms_db::{RepositoryError, UserRepository, connect};
use crpms_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let (Some(username), Some(password)) = (args.next(), args.next()) else {
        eprintln!("Usage: create-user <username> <password>");
        eprintln!("Example: create-user admin Admin@123");
        std::process::exit(1);
    };

    let username = username.trim();
    if username.is_empty() {
        bail!("Username must not be blank");
    }
    check_password_policy(&password)?;

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    let password_hash = hash_password(&password)?;
    let user = match UserRepository::new(db).create(username, &password_hash).await {
        Ok(user) => user,
        Err(RepositoryError::UsernameTaken(name)) => bail!("User '{name}' already exists"),
        Err(e) => return Err(e).context("Failed to create user"),
    };

    println!("User '{}' created successfully!", user.username);
    println!("   UserID: {}", user.user_id);
    println!("   You can now login with these credentials.");

    Ok(())
}
