use clap::Parser;
use spl_checkouts::cli::{run, Cli};
use spl_checkouts::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
