//! Sky Hopper entry point
//!
//! The browser build is driven from JavaScript through `platform::web::WebGame`.
//! Natively this runs a headless autopilot session against the on-disk records.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sky_hopper::RunController;
    use sky_hopper::audio::NullAudio;
    use sky_hopper::persistence::{KeyValueStore, MemoryStore};
    use sky_hopper::platform::clock_seed;
    use sky_hopper::platform::native::FileStore;
    use sky_hopper::tuning::Tuning;

    /// Upper bound on a demo run (about ten minutes at 60 fps)
    const MAX_TICKS: u64 = 36_000;

    fn play<S: KeyValueStore>(store: S) {
        let seed = clock_seed();
        let mut game = match RunController::new(store, NullAudio, Tuning::default(), seed) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Cannot start: {e}");
                return;
            }
        };
        game.set_autopilot(true);

        for _ in 0..MAX_TICKS {
            game.frame();
            if game.last_result().is_some() {
                break;
            }
        }

        let Some(result) = game.last_result() else {
            log::info!(
                "Autopilot still flying after {} ticks at score {}",
                MAX_TICKS,
                game.world().score
            );
            return;
        };

        println!(
            "Run over: score {} ({:?}){}",
            result.score,
            result.cause,
            if result.new_best { " - new best!" } else { "" }
        );
        if game.qualifies(result.score) {
            if let Err(e) = game.submit_last_run("autopilot") {
                log::warn!("Ranking submission failed: {e}");
            }
        }
        println!("Best: {}", game.best_score());
        for (i, entry) in game.list_ranking().iter().enumerate() {
            println!("{:>2}. {:<12} {}", i + 1, entry.name, entry.score);
        }
    }

    env_logger::init();
    log::info!("Sky Hopper (native) starting...");

    match FileStore::open(".sky-hopper") {
        Ok(store) => {
            println!("Records in {}", store.dir().display());
            play(store)
        }
        Err(e) => {
            log::warn!("{e} - records will not persist");
            play(MemoryStore::new());
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WebGame, this is just to satisfy the compiler
}
