use std::sync::Arc;
use tracing::info;
use wealth_advisor::{api::start_server, AdvisorService, GroqClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let groq_api_key = std::env::var("GROQ_API_KEY").unwrap_or_else(|_| {
        eprintln!("GROQ_API_KEY not set in .env - chat endpoints will fail until it is configured");
        String::new()
    });
    let groq_model = std::env::var("GROQ_MODEL").ok();

    let api_port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("API_PORT"))
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    info!("Wealth Advisor - API Server");
    info!("Port: {}", api_port);

    let model = Arc::new(GroqClient::new(groq_api_key, groq_model));
    let advisor = Arc::new(AdvisorService::new(model));

    info!("Advisor service initialized");
    info!("Starting API server...");

    start_server(advisor, api_port).await?;

    Ok(())
}
