use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct FoodCommand {
    #[command(subcommand)]
    command: FoodSubcommand,
}

#[derive(Debug, Subcommand)]
enum FoodSubcommand {
    Create(create::CreateFoodArgs),
}

pub(crate) async fn run(command: FoodCommand) -> Result<(), String> {
    match command.command {
        FoodSubcommand::Create(args) => create::run(args).await,
    }
}
