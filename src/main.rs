use grade_panel::cli::{Command, HELP, Reply, execute};
use grade_panel::config::log_filter;
use grade_panel::{PanelConfig, controller};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::fmt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let config = PanelConfig::from_env()?;
    let controller = controller(&config)?;
    info!("grade panel talking to {}", config.api_url);
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match execute(&controller, command).await {
            Ok(Reply::Print(text)) => println!("{text}"),
            Ok(Reply::Quit) => break,
            Err(err) => {
                error!("{err}");
                println!("{err}");
            }
        }
    }

    Ok(())
}
