use std::process::exit;

use dwell::commands::Cli;
use dwell::libs::messages::macros::is_debug_mode;
use dwell::msg_error;
use tracing_subscriber::EnvFilter;

fn main() {
    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
            .init();
    }

    if let Err(err) = Cli::menu() {
        msg_error!(err);
        exit(1);
    }
}
