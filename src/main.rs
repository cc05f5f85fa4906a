//! Entry point for `cake`, a viewer for layered INI configuration.
//!
//! This binary loads environment variables, parses CLI arguments via [`cli`],
//! and dispatches to the appropriate subcommand handler.

mod cli;
mod output;

/// Runs the `cake` CLI.
///
/// Loads `.env` files (silently ignored if absent) so they can supply
/// override variables, then parses arguments and dispatches the subcommand.
fn main() {
    dotenvy::dotenv().ok();
    let cli = cli::parse();
    cli::init_tracing(&cli);

    if let Err(e) = cli::run(cli) {
        output::print_error(&e);
        std::process::exit(1);
    }
}
