//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `pocketshelf_core` linkage and print its version.
//! - Given a data directory, open both stores and print their rendered screens.

use anyhow::Context;
use pocketshelf_core::{
    core_version, default_log_level, init_logging, AppConfig, AppKind, InventoryScreen,
    InventoryViewModel, TodoScreen, TodoViewModel,
};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    println!("pocketshelf_core version={}", core_version());

    let Some(data_dir) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match render_screens(&AppConfig::new(data_dir)).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn render_screens(config: &AppConfig) -> anyhow::Result<String> {
    std::fs::create_dir_all(&config.data_dir).context("creating data directory")?;
    let log_dir = std::fs::canonicalize(&config.data_dir)?.join("logs");
    let level = config.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, &log_dir).context("starting logging")?;

    let todo_db = config
        .open_database(AppKind::Todo)
        .context("opening todo store")?;
    let todos = Arc::new(TodoViewModel::new(todo_db));
    todos.initialize().await.context("loading todo store")?;

    let inventory_db = config
        .open_database(AppKind::Inventory)
        .context("opening inventory store")?;
    let inventory = Arc::new(InventoryViewModel::new(inventory_db));
    inventory
        .initialize()
        .await
        .context("loading inventory store")?;

    let mut output = TodoScreen::new(todos).render();
    output.push('\n');
    output.push_str(&InventoryScreen::new(inventory).render());
    Ok(output)
}
