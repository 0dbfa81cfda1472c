//! Tom DeMark's Sequential setup phase (TDS).
//!
//! A bullish setup is nine consecutive closes above the close four bars
//! earlier and emits +1, a warning that the advance may be exhausted. The
//! mirrored bearish setup emits -1. The trend signal follows the latest
//! completed setup.

use std::cmp::Ordering;

use tracing::debug;
use trading_core::{
    Indicator, IndicatorResult, IndicatorSeries, Numeric, RollingWindow, Rollback, Series, Signal,
    SignalIndicator, SignalTracker, TrendState,
};

/// Bars between the compared closes.
const LOOKBACK: usize = 4;
/// Consecutive comparisons that complete a setup.
const SETUP_LENGTH: usize = 9;
/// Closes retained, enough for one full setup plus its lookback.
const MAX_CLOSES: usize = SETUP_LENGTH + LOOKBACK;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupDirection {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy, Default)]
struct SetupState {
    count: usize,
    direction: Option<SetupDirection>,
}

/// TD Sequential setup counter.
///
/// `update` yields a value only on the bar that completes a setup; `result`
/// keeps reporting the most recent completed setup.
#[derive(Debug, Clone)]
pub struct Tds<T> {
    closes: RollingWindow<T>,
    setup: Rollback<SetupState>,
    series: Series<T>,
    trend: SignalTracker<TrendState>,
}

impl<T: Numeric> Default for Tds<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> Tds<T> {
    pub fn new() -> Self {
        Self {
            closes: RollingWindow::new(MAX_CLOSES),
            setup: Rollback::new(SetupState::default()),
            series: Series::new(),
            trend: SignalTracker::new(),
        }
    }

    /// Length of the streak in progress.
    pub fn setup_count(&self) -> usize {
        self.setup.current().count
    }
}

impl<T: Numeric> Indicator for Tds<T> {
    type Input = T;
    type Output = T;

    fn update(&mut self, close: T, replace: bool) -> Option<T> {
        self.closes.update(close, replace);
        let setup = self.setup.begin(replace);

        let Some(earlier) = self.closes.iter().rev().nth(LOOKBACK) else {
            self.trend.record(None, replace);
            return self.series.record(None, replace);
        };

        let direction = match close.partial_cmp(&earlier) {
            Some(Ordering::Greater) => Some(SetupDirection::Bullish),
            Some(Ordering::Less) => Some(SetupDirection::Bearish),
            _ => None,
        };
        if let Some(direction) = direction {
            if setup.direction == Some(direction) || setup.direction.is_none() {
                setup.count += 1;
            } else {
                setup.count = 1;
            }
            setup.direction = Some(direction);
        }

        let completed = match setup.direction {
            Some(direction) if setup.count >= SETUP_LENGTH => {
                debug!("TDS {:?} setup completed", direction);
                *setup = SetupState::default();
                Some(direction)
            }
            _ => None,
        };
        self.trend.record(
            completed.map(|direction| match direction {
                SetupDirection::Bullish => TrendState::Bullish,
                SetupDirection::Bearish => TrendState::Bearish,
            }),
            replace,
        );
        let result = completed.map(|direction| match direction {
            SetupDirection::Bullish => T::one(),
            SetupDirection::Bearish => -T::one(),
        });
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.series.get().is_some()
    }

    fn required_inputs(&self) -> usize {
        MAX_CLOSES
    }

    fn name(&self) -> &str {
        "TDS"
    }
}

impl<T: Numeric> SignalIndicator for Tds<T> {
    type State = TrendState;

    fn signal(&self) -> Signal<TrendState> {
        self.trend.signal()
    }
}

impl<T: Numeric> IndicatorSeries for Tds<T> {
    fn highest(&self) -> Option<T> {
        self.series.highest()
    }

    fn lowest(&self) -> Option<T> {
        self.series.lowest()
    }
}
