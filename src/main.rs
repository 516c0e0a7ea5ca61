use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    routedispatch::cli::run_cli()
}
