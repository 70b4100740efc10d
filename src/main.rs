use clap::Parser;
use ibkr2tv::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
