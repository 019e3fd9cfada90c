use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match wakalens_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("WakaLens failed: {e}");
            ExitCode::FAILURE
        }
    }
}
