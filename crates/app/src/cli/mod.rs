use clap::{Parser, Subcommand};

mod db;
mod food;
mod restaurant;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "tiffin-app", about = "Tiffin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    Restaurant(restaurant::RestaurantCommand),
    Food(food::FoodCommand),
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Restaurant(command) => restaurant::run(command).await,
            Commands::Food(command) => food::run(command).await,
            Commands::Token(command) => token::run(command).await,
        }
    }
}
