use std::sync::Arc;

use clap::Args;
use tiffin_app::{
    database,
    domain::accounts::{
        AccountsService, AppAccountsService, PgAccountsRepository,
        models::{NewUser, UserRole, UserUuid},
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// User display name
    #[arg(long)]
    name: String,

    /// Role: customer or owner
    #[arg(long, default_value = "customer")]
    role: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let role = args
        .role
        .parse::<UserRole>()
        .map_err(|error| error.to_string())?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = AppAccountsService::new(Arc::new(PgAccountsRepository::new(pool)));

    let uuid = args
        .user_uuid
        .map_or_else(UserUuid::new, UserUuid::from_uuid);

    let user = service
        .create_user(NewUser {
            uuid,
            name: args.name,
            role,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_name: {}", user.name);
    println!("user_role: {}", user.role);

    Ok(())
}
