use clap::Parser;
use wealthwise::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
