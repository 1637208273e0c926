use clap::{Args, Subcommand};

mod create;
mod delete;
mod list;
mod show;
mod stock;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(create::CreateProductArgs),
    List(list::ListProductsArgs),
    Show(show::ShowProductArgs),
    Stock(stock::UpdateStockArgs),
    Delete(delete::DeleteProductArgs),
}

pub(crate) async fn run(command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Create(args) => create::run(args).await,
        ProductSubcommand::List(args) => list::run(args).await,
        ProductSubcommand::Show(args) => show::run(args).await,
        ProductSubcommand::Stock(args) => stock::run(args).await,
        ProductSubcommand::Delete(args) => delete::run(args).await,
    }
}
