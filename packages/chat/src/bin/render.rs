//! Render chat conversations from a JSON snapshot.
//!
//! Prints either the viewer's conversation list or one conversation in detail,
//! with private conversations named after the other member.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kaiwa-render -- snapshot.json --viewer 1
//! cargo run --bin kaiwa-render -- snapshot.json --viewer 1 --conversation 42
//! ```

use clap::Parser;
use kaiwa_chat::ui::Args;
use kaiwa_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    match kaiwa_chat::run(&args).await {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!("Render error: {}", e);
            std::process::exit(1);
        }
    }
}
