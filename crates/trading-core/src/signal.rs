//! Trading signals derived from indicator results.

use serde::{Deserialize, Serialize};

use crate::history::Rollback;

/// Direction suggested by a trend or momentum indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendState {
    Bullish,
    Bearish,
    Sideways,
    #[default]
    Unknown,
}

/// Overbought/oversold reading of a bounded oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MomentumState {
    Overbought,
    Oversold,
    Neutral,
    #[default]
    Unknown,
}

/// Current signal state and whether it differs from the previous result's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal<S> {
    pub state: S,
    pub has_changed: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct SignalState<S> {
    current: S,
    previous: Option<S>,
}

/// Signal state per accepted result, rolled back one level on replace.
///
/// Only steps that produce a result move the signal. Before the first result
/// the state is the default (unknown) and nothing has changed.
#[derive(Debug, Clone, Default)]
pub struct SignalTracker<S> {
    state: Rollback<SignalState<S>>,
}

impl<S: Copy + PartialEq + Default> SignalTracker<S> {
    pub fn new() -> Self {
        Self {
            state: Rollback::new(SignalState {
                current: S::default(),
                previous: None,
            }),
        }
    }

    /// Record the state for this time step. `None` keeps the signal as it was
    /// before the step.
    pub fn record(&mut self, state: Option<S>, replace: bool) {
        let tracked = self.state.begin(replace);
        if let Some(state) = state {
            tracked.previous = Some(tracked.current);
            tracked.current = state;
        }
    }

    pub fn signal(&self) -> Signal<S> {
        let tracked = self.state.current();
        Signal {
            state: tracked.current,
            has_changed: tracked
                .previous
                .is_some_and(|previous| previous != tracked.current),
        }
    }
}
