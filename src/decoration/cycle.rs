/// Position within a repeating animation cycle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CyclePhase {
    /// Cycle length in milliseconds.
    pub cycle_ms: f64,
    /// Milliseconds since the cycle origin.
    pub local_ms: f64,
    /// Fraction of the current cycle in `[0, 1)`.
    pub phase: f64,
    /// Completed cycles since the origin.
    pub iteration: u64,
}

impl CyclePhase {
    /// Phase `local_ms` after the origin of a cycle of `cycle_ms`.
    ///
    /// Negative times read as the origin. A non-positive cycle never advances.
    pub fn at(local_ms: f64, cycle_ms: f64) -> Self {
        let local_ms = if local_ms.is_finite() { local_ms.max(0.0) } else { 0.0 };
        if !(cycle_ms.is_finite() && cycle_ms > 0.0) {
            return Self {
                cycle_ms,
                local_ms,
                phase: 0.0,
                iteration: 0,
            };
        }
        let iteration = (local_ms / cycle_ms).floor();
        Self {
            cycle_ms,
            local_ms,
            phase: (local_ms - iteration * cycle_ms) / cycle_ms,
            iteration: iteration as u64,
        }
    }
}

/// Repeating animation that restarts whenever its key changes.
///
/// The origin and cycle length are captured when a new key is first seen and held until the key
/// changes again, so a session id key restarts the cycle at every play start instead of
/// continuing mid-cycle from an earlier session.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyedCycle<K> {
    key: Option<K>,
    origin_ms: f64,
    cycle_ms: f64,
}

impl<K> Default for KeyedCycle<K> {
    fn default() -> Self {
        Self {
            key: None,
            origin_ms: 0.0,
            cycle_ms: 0.0,
        }
    }
}

impl<K: Copy + PartialEq> KeyedCycle<K> {
    /// Key the cycle currently runs under.
    pub fn key(&self) -> Option<K> {
        self.key
    }

    /// Captured cycle length.
    pub fn cycle_ms(&self) -> f64 {
        self.cycle_ms
    }

    /// Phase at `now_ms` under `key`. On a key change, `restart` supplies the new
    /// `(origin_ms, cycle_ms)` pair; it is not called otherwise.
    pub fn sync(
        &mut self,
        key: K,
        now_ms: f64,
        restart: impl FnOnce() -> (f64, f64),
    ) -> CyclePhase {
        if self.key != Some(key) {
            let (origin_ms, cycle_ms) = restart();
            self.key = Some(key);
            self.origin_ms = origin_ms;
            self.cycle_ms = cycle_ms;
        }
        CyclePhase::at(now_ms - self.origin_ms, self.cycle_ms)
    }

    /// Forget the key so the next `sync` restarts.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decoration/cycle.rs"]
mod tests;
