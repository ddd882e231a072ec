use depthforge::{present, Config, GenerationRequest, WorkflowController};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    depthforge::logger::init()?;

    let client = depthforge::client::from_config(&Config::from_env())?;
    let controller = WorkflowController::new(client);

    let request = GenerationRequest::text("a small toy car")?;
    let handle = controller
        .submit(request)
        .expect("no generation is in flight yet");
    handle.await?;

    println!("{:?}", present::render(&controller.current_state()));
    Ok(())
}
