mod app;
mod cli;

use clap::Parser;
use cli::Cli;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    app::run(cli).await
}
