use chatterm::prelude::*;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let code = chat().await;

    // The stdin reader runs on a blocking thread that cannot be cancelled, so
    // leave without waiting for the runtime to shut it down.
    std::process::exit(code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn chat() -> i32 {
    let session = Settings::from_env().and_then(Session::from_settings);
    let mut session = match session {
        Ok(session) => session,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            if let Some(hint) = e.hint() {
                eprintln!("{}", hint);
            }
            return 1;
        }
    };

    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Unable to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    match run(&mut session, input, &mut output, interrupt).await {
        Ok(exit) => {
            info!(?exit, "Session ended");
            0
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            1
        }
    }
}
