#[cfg(target_arch = "wasm32")]
mod frontend;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    if let Err(error) = frontend::run() {
        portfolio_motion::telemetry::log_event(
            log::Level::Error,
            "page_boot_failed",
            serde_json::json!({ "error": error.to_string() }),
        );
    }
}
