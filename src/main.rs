use depthforge::{
    client, logger, present, Config, InputCollector, InputMode, WorkflowController, WorkflowState,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    logger::init_with_config(
        logger::LoggerConfig::development().with_level(logger::LogLevel::Debug),
    )?;

    log::info!("🚀 Starting depthforge demo");

    let config = Config::from_env();
    match env::var("DEPTHFORGE_BACKEND_URL") {
        Ok(url) => log::info!("DEPTHFORGE_BACKEND_URL: {}", url),
        Err(_) => log::info!("No backend configured, the stub client will be used"),
    }

    let generation_client = client::from_config(&config)?;
    let controller = WorkflowController::new(generation_client);

    // Text prompt flow.
    let mut collector = InputCollector::new();
    collector.set_prompt("a small toy car");
    let request = collector.take_request()?;

    log::info!("🔄 Submitting {} request...", request.kind());
    let handle = match controller.submit(request) {
        Some(handle) => handle,
        None => {
            log::error!("❌ Submission rejected, a generation is already in flight");
            return Ok(());
        }
    };

    log::info!("Current state: {:?}", controller.current_state());
    handle.await?;

    let state = controller.current_state();
    if let Some(notification) = present::notification_for(&state) {
        log::info!("🔔 {}: {}", notification.title, notification.description);
    }
    match present::render(&state) {
        present::ViewState::Model { artifact, exports } => {
            log::info!("✅ Model ready at {}", artifact);
            for format in exports {
                log::info!("   Download {} (.{})", format.label(), format.extension());
            }
        }
        other => log::warn!("Unexpected view after settlement: {:?}", other),
    }

    // Image upload flow, demonstrating validation and preview lifecycle.
    collector.set_mode(InputMode::Image);
    match collector.attach_image(vec![0u8; 16], "image/png") {
        Ok(preview) => log::info!("🖼️  Image staged, preview at {}", preview.url()),
        Err(e) => log::error!("❌ Image rejected: {}", e),
    }
    if let Err(e) = collector.attach_image(vec![0u8; 16], "text/plain") {
        log::info!("Rejected a non-image upload as expected: {}", e);
    }

    let request = collector.take_request()?;
    if let Some(handle) = controller.submit(request) {
        handle.await?;
    }

    match controller.current_state() {
        WorkflowState::Completed(result) => log::info!("🏁 Final result: {:?}", result),
        state => log::warn!("Workflow did not settle: {:?}", state),
    }

    Ok(())
}
