//! Flappy Walls entry point
//!
//! Native: runs a headless autopilot session and prints the final labels.
//! The browser build starts from `platform::web` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use directories::ProjectDirs;
    use flappy_walls::persistence::JsonFileStore;
    use flappy_walls::{Game, HudText, Settings, autopilot, platform};

    env_logger::init();
    log::info!("Flappy Walls (native) starting...");

    let seconds = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<f32>()
            .with_context(|| format!("invalid duration {arg:?}, expected seconds"))?,
        None => 60.0,
    };

    let dirs = ProjectDirs::from("", "", "flappy-walls")
        .context("could not determine config directory")?;
    let config_dir = dirs.config_dir();
    std::fs::create_dir_all(config_dir)
        .with_context(|| format!("creating {}", config_dir.display()))?;

    let settings = Settings::load_from(&config_dir.join("settings.json"));
    let seed = platform::session_seed(settings.seed);
    let store = JsonFileStore::new(config_dir.join("scores.json"));

    let mut game = Game::new(settings.tuning, seed, store, HudText::new());
    let stats = autopilot::play(&mut game, seconds);

    println!(
        "{} runs in {:.0}s (seed {seed}), top score {}, top item score {}",
        stats.runs, seconds, stats.top_score, stats.top_item_score
    );
    for line in game.presenter().lines() {
        println!("{line}");
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
