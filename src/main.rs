use clap::Parser;
use fundbot::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
