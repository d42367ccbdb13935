//! scrollkit demo entry point.
//!
//! Replays a gesture script against a scroll view on a simulated 60 fps
//! clock and logs the delegate traffic.
//!
//! Usage: `scrollkit-demo [SCRIPT.toml] [CONFIG.toml]`. Both arguments fall
//! back to the files compiled into the binary. Set `RUST_LOG=debug` to see
//! phase transitions, `RUST_LOG=trace` for every frame.

mod script;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};

use scrollkit_types::ScrollConfig;
use script::{DEFAULT_CONFIG, DEFAULT_SCRIPT, Script};
use session::Session;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let script = match args.next() {
        Some(path) => Script::load(&path)
            .with_context(|| format!("loading script {}", path.display()))?,
        None => Script::from_toml(DEFAULT_SCRIPT).context("parsing built-in script")?,
    };
    let config = match args.next() {
        Some(path) => ScrollConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ScrollConfig::from_toml(DEFAULT_CONFIG).context("parsing built-in config")?,
    };

    log::info!(
        "Starting session: content {}x{}, viewport {}x{}, {} steps",
        script.view.content.width,
        script.view.content.height,
        script.view.viewport.width,
        script.view.viewport.height,
        script.steps.len(),
    );

    let mut session = Session::new(&script, config)?;
    session.run(&script);

    let view = session.view();
    let position = view.scroll_position();
    log::info!(
        "Finished after {:.2}s: position ({:.1}, {:.1}), page {}/{} x {}/{}, {} drags, {} decelerations, {} scroll events",
        session.elapsed(),
        position.x,
        position.y,
        view.horizontal_page() + 1,
        view.num_horizontal_pages(),
        view.vertical_page() + 1,
        view.num_vertical_pages(),
        session.delegate().drags(),
        session.delegate().decelerations(),
        session.delegate().scrolls(),
    );
    Ok(())
}
