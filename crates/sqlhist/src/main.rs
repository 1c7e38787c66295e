use clap::Parser;

mod cli;
mod commands;
mod miner;

fn main() {
    let cli = cli::Cli::parse();
    sqlhist_core::init_logging(&cli.log_level);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
