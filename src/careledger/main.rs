use clap::Parser;

mod args;
mod cli;

fn main() {
    let cli = args::Cli::parse();
    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
