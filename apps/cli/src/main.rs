//! Binary entry point. All real work lives in the library crate so the
//! session logic stays testable without a terminal.

use clap::Parser;

use shelfstock_cli::{init_tracing, AppConfig, Cli};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = match AppConfig::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = shelfstock_cli::run(config).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
