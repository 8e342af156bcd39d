use log::{error, info};
use service::{config::Config, logging::Logger, AppState};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    info!(
        "Starting ai-service: emotion model [{}] on the {} backend",
        config.emotion_model(),
        config.emotion_backend
    );

    let models = service::init_models(&config).await;
    let app_state = AppState::new(config, models);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server stopped with error: {e}");
        std::process::exit(1);
    }
}
