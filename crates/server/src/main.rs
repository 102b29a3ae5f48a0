#[tokio::main]
async fn main() -> anyhow::Result<()> {
    askql_server::start().await
}
