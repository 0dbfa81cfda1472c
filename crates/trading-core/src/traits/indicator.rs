//! Indicator trait definitions.

use crate::error::IndicatorResult;
use crate::signal::Signal;

/// Streaming technical indicator.
///
/// Indicators consume one input per time step and keep only the state they
/// need. The most recent input may be amended with a replacing update, which
/// recomputes the current step from the state captured before it.
pub trait Indicator: Send + Sync {
    /// Input accepted per time step (a price or a candle).
    type Input;

    /// The output type of the indicator.
    type Output;

    /// Feed one input.
    ///
    /// # Arguments
    /// * `input` - New data point
    /// * `replace` - Amend the most recent data point instead of advancing
    ///
    /// # Returns
    /// The current value, or None while the indicator is not stable
    fn update(&mut self, input: Self::Input, replace: bool) -> Option<Self::Output>;

    /// Feed a new input.
    fn add(&mut self, input: Self::Input) -> Option<Self::Output> {
        self.update(input, false)
    }

    /// Amend the most recent input.
    fn replace(&mut self, input: Self::Input) -> Option<Self::Output> {
        self.update(input, true)
    }

    /// Feed a sequence of inputs and collect the per-step outputs.
    fn update_all<I>(&mut self, inputs: I) -> Vec<Option<Self::Output>>
    where
        I: IntoIterator<Item = Self::Input>,
        Self: Sized,
    {
        inputs.into_iter().map(|input| self.add(input)).collect()
    }

    /// Latest result, failing with `NotEnoughData` before stability.
    fn result(&self) -> IndicatorResult<Self::Output>;

    /// Whether enough input has been consumed to produce meaningful values.
    fn is_stable(&self) -> bool;

    /// Minimum number of inputs before the indicator can become stable.
    fn required_inputs(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

/// Scalar indicator that tracks the lifetime extremes of its results.
pub trait IndicatorSeries: Indicator {
    /// Highest result seen so far.
    fn highest(&self) -> Option<Self::Output>;

    /// Lowest result seen so far.
    fn lowest(&self) -> Option<Self::Output>;
}

/// Indicator whose results translate into a trading signal.
pub trait SignalIndicator: Indicator {
    /// Signal vocabulary, trend or momentum.
    type State: Copy + PartialEq;

    /// Signal of the latest result and whether it changed with that result.
    fn signal(&self) -> Signal<Self::State>;
}
