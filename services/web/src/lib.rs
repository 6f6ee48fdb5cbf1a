mod cli;
mod create;
mod infra;
mod pages;
mod routes;
mod server;

use home_listing::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
