#[tokio::main]
async fn main() -> anyhow::Result<()> {
    swapd_lib::run().await
}
