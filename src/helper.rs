use dotenv::dotenv;
use env_logger::Env;

/// Pulls `.env` into the process environment so clap's `env` fallbacks see it.
pub fn load_env() {
    dotenv().ok();
}

/// Logs go to stderr, filtered by `RUST_LOG` (warnings and errors by default).
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("warn")).try_init();
}
