use std::sync::Arc;

use clap::Args;
use tiffin_app::{
    database,
    domain::{
        accounts::models::UserUuid,
        catalog::{
            AppCatalogService, CatalogService, PgCatalogRepository,
            models::{FoodUuid, NewFood, RestaurantUuid},
        },
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateFoodArgs {
    /// Food display name
    #[arg(long)]
    name: String,

    /// Price in integer minor units (pence/cents)
    #[arg(long)]
    price: u64,

    /// Category label, e.g. "mains"
    #[arg(long, default_value = "")]
    category: String,

    /// UUID of the restaurant serving this food
    #[arg(long)]
    restaurant_uuid: Uuid,

    /// UUID of the acting owner
    #[arg(long)]
    owner_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateFoodArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = AppCatalogService::new(Arc::new(PgCatalogRepository::new(pool)));

    let food = service
        .create_food(
            UserUuid::from_uuid(args.owner_uuid),
            NewFood {
                uuid: FoodUuid::new(),
                name: args.name,
                price: args.price,
                category: args.category,
                restaurant_uuid: RestaurantUuid::from_uuid(args.restaurant_uuid),
            },
        )
        .await
        .map_err(|error| format!("failed to create food: {error}"))?;

    println!("food_uuid: {}", food.uuid);
    println!("food_name: {}", food.name);
    println!("food_price: {}", food.price);

    Ok(())
}
