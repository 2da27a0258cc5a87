use clap::Parser;

#[tokio::main]
async fn main() {
    if let Err(err) = dashboard_cli::run(dashboard_cli::args::Cli::parse()).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
