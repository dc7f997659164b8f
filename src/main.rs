use digipin_courier::config::Config;
use digipin_courier::engine::{Engine, Pricing};
use digipin_courier::server::serve;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    let engine = Engine::new(Pricing::default());

    if let Err(err) = serve(engine, config.bind_addr, &config.app_root).await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}
