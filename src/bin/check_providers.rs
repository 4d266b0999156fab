//! Send one greeting to every configured provider and report the result.
//!
//! Useful for checking API keys before starting a chat session. Providers
//! without a key are reported as not configured; a failing provider does not
//! stop the others from being tried. Only an invalid setting, such as a
//! non-numeric timeout, ends the run with an error.

use chatterm::prelude::*;
use tracing_subscriber::EnvFilter;

const GREETING: &str = "Hello, what AI model are you?";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(ChatError::MissingCredentials(expected)) => {
            println!("⚠️  No provider API keys configured (set {})", expected);
            return Ok(());
        }
        Err(e) => return Err(anyhow::Error::new(e).context("reading provider settings")),
    };
    let configured = settings.credentials.available();
    let factory = GatewayBrokerFactory::new(settings);

    println!("🧪 Testing providers...");
    println!("{}", "=".repeat(50));

    for provider in Provider::ALL {
        println!();
        if !configured.contains(&provider) {
            println!("⚠️  {} API key not configured", provider);
            continue;
        }

        println!("Testing {}...", provider);
        let broker = match factory.build(provider) {
            Ok(broker) => broker,
            Err(e) => {
                println!("❌ {} Error: {}", provider, e);
                continue;
            }
        };

        match broker.generate(SYSTEM_PROMPT, GREETING).await {
            Ok(reply) => println!("✅ {} Response: {}", provider, reply),
            Err(e) => println!("❌ {} Error: {}", provider, e),
        }
    }

    println!("\n🎉 Provider testing complete!");
    Ok(())
}
