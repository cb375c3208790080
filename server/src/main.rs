use std::process::ExitCode;

use ml_cost_optimizer::core::CoreApp;

#[tokio::main]
async fn main() -> ExitCode {
    match CoreApp::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\nError: {}\n", e);
            ExitCode::FAILURE
        }
    }
}
