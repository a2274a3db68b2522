use rask_log_insight::error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    rask_log_insight::app::run().await
}
