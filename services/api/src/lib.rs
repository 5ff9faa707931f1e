mod cli;
mod infra;
mod routes;
mod score;
mod server;

use session_credibility::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
