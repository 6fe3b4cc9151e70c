#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let config = thoughts_server::config::Config::from_env()?;
    thoughts_server::web::start_web_server(config).await
}
