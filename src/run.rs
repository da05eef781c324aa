//! Run controller
//!
//! Sits between the per-frame driver and the simulation: queues logical
//! inputs, runs one tick per frame, turns events into audio cues, and keeps
//! the best score and ranking records up to date.

use crate::audio::{AudioSink, SoundCue};
use crate::error::{HopperError, Result};
use crate::highscores::{BestScore, Ranking, RankingEntry};
use crate::persistence::KeyValueStore;
use crate::persistence::records;
use crate::platform::preload::Preloader;
use crate::settings::Settings;
use crate::sim::{CrashCause, GameEvent, GamePhase, Snapshot, TickInput, World, tick};
use crate::tuning::Tuning;

/// Outcome of the most recent finished run, for the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub score: u32,
    pub cause: CrashCause,
    pub new_best: bool,
}

pub struct RunController<S: KeyValueStore, A: AudioSink> {
    world: World,
    store: S,
    audio: A,
    settings: Settings,
    best: BestScore,
    ranking: Ranking,
    preload: Preloader,
    pending: TickInput,
    last_result: Option<RunResult>,
    /// The last finished run is already on the ranking
    submitted: bool,
}

impl<S: KeyValueStore, A: AudioSink> RunController<S, A> {
    /// Build a controller, reading settings and records from `store`.
    /// Fails if `tuning` does not validate.
    pub fn new(store: S, audio: A, tuning: Tuning, seed: u64) -> Result<Self> {
        let settings = Settings::load(&store);
        Self::with_settings(store, audio, settings, tuning, seed)
    }

    /// Build a controller with explicit settings (records still come from `store`)
    pub fn with_settings(
        store: S,
        mut audio: A,
        settings: Settings,
        tuning: Tuning,
        seed: u64,
    ) -> Result<Self> {
        let world = World::new(tuning, seed)?;
        let best = records::load_best(&store);
        let ranking = records::load_ranking(&store, settings.ranking_capacity);
        audio.apply_settings(&settings);
        log::info!("Run controller ready (best score {}, seed {})", best.0, seed);

        Ok(Self {
            world,
            store,
            audio,
            settings,
            best,
            ranking,
            preload: Preloader::ready(),
            pending: TickInput::default(),
            last_result: None,
            submitted: false,
        })
    }

    // === Inputs ===

    /// The one button. While idle this starts a run (once preloading is done).
    pub fn impulse(&mut self) {
        self.pending.impulse = true;
    }

    pub fn toggle_pause(&mut self) {
        self.pending.toggle_pause = true;
    }

    /// Demo mode: the built-in pilot flies (and starts the run when idle)
    pub fn set_autopilot(&mut self, on: bool) {
        self.pending.autopilot = on;
    }

    /// Drop back to Idle after a finished run
    pub fn reset(&mut self) {
        self.world.reset();
        self.last_result = None;
    }

    // === Frame ===

    /// Run one tick with the inputs queued since the last frame
    pub fn frame(&mut self) -> Vec<GameEvent> {
        let mut input = self.pending.clone();
        self.pending.impulse = false;
        self.pending.toggle_pause = false;

        let can_start = self.preload.is_settled();
        if !can_start && matches!(self.world.phase, GamePhase::Idle | GamePhase::Ended) {
            if input.impulse {
                log::debug!("Ignoring start input while assets are loading");
            }
            input.impulse = false;
            input.autopilot = false;
        }

        let events = tick(&mut self.world, &input);
        for event in &events {
            self.dispatch(event);
        }
        events
    }

    fn dispatch(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Started => {
                self.last_result = None;
                self.submitted = false;
            }
            GameEvent::Flapped => self.audio.play(SoundCue::Wing),
            GameEvent::Scored { .. } => self.audio.play(SoundCue::Point),
            GameEvent::Crashed { cause, score } => {
                self.audio.play(SoundCue::Hit);
                self.audio
                    .play_after(SoundCue::Die, self.settings.death_cue_delay_ms);
                let new_best = self.record_run(score);
                self.last_result = Some(RunResult {
                    score,
                    cause,
                    new_best,
                });
                self.submitted = false;
            }
            GameEvent::Paused | GameEvent::Resumed => {}
        }
    }

    // === Records ===

    /// Raise the best score if `final_score` beats it. Returns true if it did.
    pub fn record_run(&mut self, final_score: u32) -> bool {
        if !self.best.update(final_score) {
            return false;
        }
        log::info!("New best score: {}", final_score);
        if let Err(e) = records::save_best(&mut self.store, self.best) {
            log::warn!("Could not save best score: {e}");
        }
        true
    }

    /// Add a ranking entry. Blank names follow the configured policy; a
    /// rejected name leaves the ranking untouched.
    /// Returns the 1-indexed rank, or None if the score fell off the board.
    pub fn submit_ranking(&mut self, name: &str, score: u32) -> Result<Option<usize>> {
        let rank = self
            .ranking
            .submit(name, score, &self.settings.blank_name_policy)?;
        if let Err(e) = records::save_ranking(&mut self.store, &self.ranking) {
            log::warn!("Could not save ranking: {e}");
        }
        match rank {
            Some(r) => log::info!("Ranking entry saved at #{r} (score {score})"),
            None => log::info!("Score {score} did not make the ranking"),
        }
        Ok(rank)
    }

    /// Put the last finished run on the ranking. Each run can be submitted
    /// once; a rejected name does not count as a submission.
    pub fn submit_last_run(&mut self, name: &str) -> Result<Option<usize>> {
        let result = self.last_result.ok_or(HopperError::NoFinishedRun)?;
        if self.submitted {
            return Err(HopperError::AlreadySubmitted);
        }
        let rank = self.submit_ranking(name, result.score)?;
        self.submitted = true;
        Ok(rank)
    }

    /// Current top-N, best first
    pub fn list_ranking(&self) -> &[RankingEntry] {
        self.ranking.entries()
    }

    pub fn qualifies(&self, score: u32) -> bool {
        self.ranking.qualifies(score)
    }

    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        self.ranking.potential_rank(score)
    }

    pub fn best_score(&self) -> u32 {
        self.best.0
    }

    pub fn last_result(&self) -> Option<RunResult> {
        self.last_result
    }

    /// The last finished run has not been put on the ranking yet
    pub fn can_submit(&self) -> bool {
        self.last_result.is_some() && !self.submitted
    }

    // === Settings ===

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply and persist new settings
    pub fn update_settings(&mut self, settings: Settings) -> Result<()> {
        if settings.ranking_capacity != self.ranking.capacity() {
            let entries = self.ranking.entries().to_vec();
            self.ranking = Ranking::from_entries(entries, settings.ranking_capacity);
            records::save_ranking(&mut self.store, &self.ranking)?;
        }
        self.audio.apply_settings(&settings);
        settings.save(&mut self.store)?;
        self.settings = settings;
        Ok(())
    }

    // === Accessors ===

    pub fn preloader(&self) -> &Preloader {
        &self.preload
    }

    pub fn preloader_mut(&mut self) -> &mut Preloader {
        &mut self.preload
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn snapshot(&self) -> Snapshot {
        self.world.snapshot()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
