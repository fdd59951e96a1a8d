//! Accuracy of the local player's shots.

use std::fmt;

use crate::warships::ShotResult;

/// Running tally of hits and misses for one game.
///
/// Sunk ships count as hits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccuracyCounter {
    hits: u32,
    misses: u32,
}

impl AccuracyCounter {
    /// Counts one more shot.
    pub fn record(&mut self, result: ShotResult) {
        if result.is_hit() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn shots(&self) -> u32 {
        self.hits + self.misses
    }

    /// Share of shots that hit, in percent. Zero before the first shot.
    pub fn percentage(&self) -> f64 {
        match self.shots() {
            0 => 0.0,
            shots => f64::from(self.hits) * 100.0 / f64::from(shots),
        }
    }
}

impl fmt::Display for AccuracyCounter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Accuracy: {}/{} = {:.2}%",
            self.hits,
            self.shots(),
            self.percentage()
        )
    }
}
