//! Cached indicator results.

use crate::error::{IndicatorError, IndicatorResult};
use crate::history::Rollback;
use crate::numeric::{partial_max, partial_min};

#[derive(Debug, Clone, Copy, Default)]
struct SeriesState<T> {
    result: Option<T>,
    highest: Option<T>,
    lowest: Option<T>,
}

/// Latest scalar result plus lifetime highest and lowest values.
///
/// The extremes are not windowed: they cover every accepted result. Both the
/// result and the extremes roll back one level on replace.
#[derive(Debug, Clone, Default)]
pub struct Series<T> {
    state: Rollback<SeriesState<T>>,
}

impl<T: Copy + PartialOrd> Series<T> {
    pub fn new() -> Self {
        Self {
            state: Rollback::new(SeriesState {
                result: None,
                highest: None,
                lowest: None,
            }),
        }
    }

    /// Record the outcome of an update. `None` leaves the cached values as
    /// they were before this time step.
    pub fn record(&mut self, value: Option<T>, replace: bool) -> Option<T> {
        let state = self.state.begin(replace);
        if let Some(value) = value {
            state.result = Some(value);
            state.highest = Some(state.highest.map_or(value, |h| partial_max(h, value)));
            state.lowest = Some(state.lowest.map_or(value, |l| partial_min(l, value)));
        }
        value
    }

    #[inline]
    pub fn get(&self) -> Option<T> {
        self.state.current().result
    }

    /// Result, or the not-enough-data error carrying `required`.
    pub fn result(&self, required: usize) -> IndicatorResult<T> {
        self.get()
            .ok_or(IndicatorError::NotEnoughData { required })
    }

    /// Result in place before the latest time step.
    #[inline]
    pub fn previous(&self) -> Option<T> {
        self.state.saved().result
    }

    #[inline]
    pub fn highest(&self) -> Option<T> {
        self.state.current().highest
    }

    #[inline]
    pub fn lowest(&self) -> Option<T> {
        self.state.current().lowest
    }
}

/// Latest structured result, rolled back one level on replace.
#[derive(Debug, Clone)]
pub struct Latest<O> {
    state: Rollback<Option<O>>,
}

impl<O: Clone> Default for Latest<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Clone> Latest<O> {
    pub fn new() -> Self {
        Self {
            state: Rollback::new(None),
        }
    }

    pub fn record(&mut self, value: Option<O>, replace: bool) -> Option<O> {
        let state = self.state.begin(replace);
        if let Some(value) = &value {
            *state = Some(value.clone());
        }
        value
    }

    #[inline]
    pub fn get(&self) -> Option<&O> {
        self.state.current().as_ref()
    }

    pub fn result(&self, required: usize) -> IndicatorResult<O> {
        self.get()
            .cloned()
            .ok_or(IndicatorError::NotEnoughData { required })
    }
}
