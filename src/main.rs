#[tokio::main]
async fn main() -> std::io::Result<()> {
    sim_broker::run_with_config().await
}
