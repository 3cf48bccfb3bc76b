//! Terminal front end for the todo list.
//!
//! Reads commands from stdin, dispatches them to the store, and re-renders
//! the list on stdout after every change. Logs go to stderr.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use todo::{render, Command, CommandError, TodoApp, TodoConfig, HELP};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TodoConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let app = TodoApp::new(&config);
    app.on_change(|items| print!("{}", render(items)));

    println!("{HELP}");
    print!("{}", render(&app.read().await));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::List) => print!("{}", render(&app.read().await)),
            Ok(command) => {
                if let Some(action) = command.into_action() {
                    if let Err(error) = app.dispatch(action).await {
                        tracing::warn!(%error, "Dispatch did not fully apply");
                    }
                }
            },
            Err(CommandError::Empty) => {},
            Err(error) => eprintln!("{error}"),
        }
    }

    tracing::info!(remaining = app.read().await.len(), "Exiting");
    Ok(())
}
