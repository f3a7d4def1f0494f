use clap::Parser;
use propdesk::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
