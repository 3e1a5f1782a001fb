use std::env;
use whisk::{Prompt, WhiskClient, WhiskConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!(".env file loaded"),
        Err(_) => log::warn!("No .env file found, using system environment variables"),
    }

    whisk::logger::init_with_config(whisk::logger::LoggerConfig::development())?;

    if env::var("WHISK_SESSION_TOKEN").is_err() {
        log::error!("WHISK_SESSION_TOKEN is not set");
        log::error!("Copy the session cookie from a logged-in labs.google browser session");
    }

    let config = WhiskConfig::from_env();

    log::info!("Creating Whisk client...");
    let client = match WhiskClient::new(config) {
        Ok(client) => {
            log::info!("Client initialized");
            client
        }
        Err(e) => {
            log::error!("Failed to initialize client: {}", e);
            return Err(e.into());
        }
    };

    match client.is_available().await {
        Ok(true) => log::info!("Service is available"),
        Ok(false) => {
            log::warn!("Service reports unavailable for this account/region, stopping");
            return Ok(());
        }
        Err(e) => {
            log::error!("Availability check failed: {}", e);
            return Err(e.into());
        }
    }

    let prompt_text = env::args()
        .nth(1)
        .unwrap_or_else(|| "A serene landscape with mountains and a lake at sunset".to_string());

    log::info!("Generating image for prompt: {}", prompt_text);

    match client.images().generate(Prompt::new(prompt_text)).await {
        Ok(result) => {
            log::info!("Generation succeeded");

            if let Some(encoded) = result.first_image_base64() {
                let filename = format!("whisk_{}.png", chrono::Utc::now().timestamp());
                match whisk::save_base64_image(encoded, &filename) {
                    Ok(_) => log::info!("Image saved to: {}", filename),
                    Err(e) => log::error!("Failed to save image: {}", e),
                }
            } else {
                log::warn!("Response carried no image payload: {}", result.raw());
            }
        }
        Err(e) => {
            log::error!("Generation failed: {}", e);
        }
    }

    match client.media().history(5).await {
        Ok(items) => {
            log::info!("Last {} generations:", items.len());
            for item in items {
                log::info!(
                    "  {} - {}",
                    item.media_key.as_deref().unwrap_or("<no key>"),
                    item.prompt.as_deref().unwrap_or("<no prompt>")
                );
            }
        }
        Err(e) => log::warn!("History listing failed: {}", e),
    }

    Ok(())
}
