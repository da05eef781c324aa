//! Counted-completion gate for asset preloading
//!
//! The host reports each asset as loaded or failed; the gate opens once every
//! expected asset has settled either way. A missing sprite just means the
//! renderer draws its fallback rectangle, so failures never block the game.

#[derive(Debug, Clone, Default)]
pub struct Preloader {
    expected: usize,
    loaded: usize,
    failed: usize,
}

impl Preloader {
    /// Gate with nothing to wait for
    pub fn ready() -> Self {
        Self::default()
    }

    /// Gate waiting for `expected` assets
    pub fn expecting(expected: usize) -> Self {
        Self {
            expected,
            ..Default::default()
        }
    }

    /// Register more assets to wait for
    pub fn expect(&mut self, count: usize) {
        self.expected += count;
    }

    pub fn mark_loaded(&mut self) {
        if !self.is_settled() {
            self.loaded += 1;
            self.log_if_settled();
        }
    }

    pub fn mark_failed(&mut self) {
        if !self.is_settled() {
            self.failed += 1;
            log::warn!("Asset failed to load ({} so far)", self.failed);
            self.log_if_settled();
        }
    }

    fn log_if_settled(&self) {
        if self.is_settled() {
            log::info!(
                "Preload complete: {} loaded, {} failed",
                self.loaded,
                self.failed
            );
        }
    }

    /// Every expected asset has loaded or failed
    pub fn is_settled(&self) -> bool {
        self.loaded + self.failed >= self.expected
    }

    /// Settled fraction in [0, 1] for a loading bar
    pub fn progress(&self) -> f32 {
        if self.expected == 0 {
            1.0
        } else {
            ((self.loaded + self.failed) as f32 / self.expected as f32).min(1.0)
        }
    }

    pub fn failed(&self) -> usize {
        self.failed
    }
}
