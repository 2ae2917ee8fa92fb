use anyhow::Result;
use dotenv::dotenv;
use timewise::commands::Cli;
use timewise::libs::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenv().ok();

    // The message macros route through tracing in debug mode, so the
    // subscriber is only set up when that mode is on.
    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
            .init();
    }

    Cli::menu()
}
