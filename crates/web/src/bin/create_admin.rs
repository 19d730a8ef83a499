use anyhow::Context;
use clap::Parser;
use storage::{
    Database, dto::user::CreateUserRequest, models::Role, repository::user::UserRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

/// Bootstraps the first ADMIN_APP account so the API can be used at all.
#[derive(Parser)]
#[command(name = "create-admin")]
#[command(about = "Create an application administrator", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(long, env = "ADMIN_EMAIL")]
    email: String,

    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Skip running migrations before inserting
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "create_admin=info,storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let req = CreateUserRequest {
        email: cli.email,
        password: cli.password,
        role: Role::AdminApp,
        league_id: None,
        club_id: None,
    };
    req.validate().context("Invalid administrator credentials")?;

    let db = Database::new(&cli.database_url, 1)
        .await
        .context("Failed to connect to database")?;

    if !cli.no_migrate {
        db.run_migrations()
            .await
            .context("Failed to run migrations")?;
    }

    let user = UserRepository::new(db.pool())
        .create(&req)
        .await
        .context("Failed to create administrator")?;

    tracing::info!(user_id = %user.user_id, email = %user.email, "Administrator created");

    Ok(())
}
