//! A named set of indicators driven by one candle stream.

use std::collections::HashSet;

use tracing::{debug, info};
use trading_core::{Candle, Numeric};

use crate::error::{ConfigError, ConfigResult};
use crate::indicator::{AnyIndicator, IndicatorValue};
use crate::settings::NamedIndicator;

/// Indicators in configuration order, each under a unique name.
#[derive(Debug, Clone)]
pub struct IndicatorSet<T> {
    entries: Vec<(String, AnyIndicator<T>)>,
}

impl<T: Numeric> IndicatorSet<T> {
    pub fn from_config(indicators: &[NamedIndicator]) -> ConfigResult<Self> {
        let mut names = HashSet::new();
        let mut entries = Vec::with_capacity(indicators.len());

        for named in indicators {
            if !names.insert(named.name.as_str()) {
                return Err(ConfigError::DuplicateName(named.name.clone()));
            }
            let indicator = named.spec.build().map_err(|source| ConfigError::Indicator {
                name: named.name.clone(),
                source,
            })?;
            debug!(
                "Configured indicator {} as {} (needs {} inputs)",
                named.name,
                indicator.name(),
                indicator.required_inputs()
            );
            entries.push((named.name.clone(), indicator));
        }

        info!("Indicator set ready with {} indicators", entries.len());
        Ok(Self { entries })
    }

    /// Feed one candle to every indicator.
    pub fn update(&mut self, candle: &Candle<T>, replace: bool) -> Vec<(&str, Option<IndicatorValue<T>>)> {
        self.entries
            .iter_mut()
            .map(|(name, indicator)| (name.as_str(), indicator.update_candle(candle, replace)))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&AnyIndicator<T>> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, indicator)| indicator)
    }

    /// Whether every indicator has warmed up.
    pub fn is_stable(&self) -> bool {
        self.entries.iter().all(|(_, indicator)| indicator.is_stable())
    }

    /// Inputs needed before every indicator can be stable.
    pub fn required_inputs(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, indicator)| indicator.required_inputs())
            .max()
            .unwrap_or(0)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::IndicatorSpec;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn named(name: &str, spec: IndicatorSpec) -> NamedIndicator {
        NamedIndicator {
            name: name.to_string(),
            spec,
        }
    }

    #[test]
    fn test_update_feeds_every_indicator() {
        let config = [
            named("sma", IndicatorSpec::Sma { interval: 2 }),
            named("obv", IndicatorSpec::Obv),
        ];
        let mut set = IndicatorSet::<Decimal>::from_config(&config).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.required_inputs(), 2);

        set.update(&Candle::hlc(dec!(10), dec!(9), dec!(9.5)).with_volume(dec!(100)), false);
        let results = set.update(&Candle::hlc(dec!(11), dec!(10), dec!(10.5)).with_volume(dec!(50)), false);

        assert_eq!(results[0], ("sma", Some(IndicatorValue::Scalar { value: dec!(10) })));
        assert_eq!(results[1], ("obv", Some(IndicatorValue::Scalar { value: dec!(50) })));
        assert!(set.is_stable());
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["sma", "obv"]);
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let config = [
            named("trend", IndicatorSpec::Ema { interval: 5 }),
            named("trend", IndicatorSpec::Sma { interval: 5 }),
        ];
        let result = IndicatorSet::<f64>::from_config(&config);
        assert!(matches!(result, Err(ConfigError::DuplicateName(name)) if name == "trend"));
    }

    #[test]
    fn test_reports_invalid_indicator_by_name() {
        let config = [named("broken", IndicatorSpec::Mom { interval: 0 })];
        let error = IndicatorSet::<f64>::from_config(&config).unwrap_err();

        assert!(matches!(&error, ConfigError::Indicator { name, .. } if name == "broken"));
        assert_eq!(
            error.to_string(),
            "Invalid indicator 'broken': Invalid parameter: MOM interval must be greater than 0"
        );
    }
}
