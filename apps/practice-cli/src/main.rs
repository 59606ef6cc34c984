#[tokio::main]
async fn main() -> anyhow::Result<()> {
    flashcards_practice_cli::run().await
}
