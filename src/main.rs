use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    aquarist::cli::run().await
}
