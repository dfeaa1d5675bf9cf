use std::sync::Arc;

use clap::Args;
use tiffin_app::{
    database,
    domain::{
        accounts::models::UserUuid,
        catalog::{
            AppCatalogService, CatalogService, PgCatalogRepository,
            models::{NewRestaurant, RestaurantUuid},
        },
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateRestaurantArgs {
    /// Restaurant display name
    #[arg(long)]
    name: String,

    /// UUID of the owner user
    #[arg(long)]
    owner_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateRestaurantArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = AppCatalogService::new(Arc::new(PgCatalogRepository::new(pool)));

    let restaurant = service
        .create_restaurant(NewRestaurant {
            uuid: RestaurantUuid::new(),
            name: args.name,
            owner_uuid: UserUuid::from_uuid(args.owner_uuid),
        })
        .await
        .map_err(|error| format!("failed to create restaurant: {error}"))?;

    println!("restaurant_uuid: {}", restaurant.uuid);
    println!("restaurant_name: {}", restaurant.name);
    println!("owner_uuid: {}", restaurant.owner_uuid);

    Ok(())
}
