use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::contract::{self, ContractReport};
use crate::generator::{self, TrendParams, DEFAULT_FETCH_DELAY};
use crate::noise::{FixedNoise, NOISE_BOUND};

/// Year fields must fall inside this window.
pub const YEAR_WINDOW: (i32, i32) = (1900, 2200);
pub const MAX_TREND_YEARS: usize = 200;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("end_year {end} is before start_year {start}")]
    YearRange { start: i32, end: i32 },
    #[error("{field} {year} is outside {}-{}", YEAR_WINDOW.0, YEAR_WINDOW.1)]
    YearBounds { field: &'static str, year: i32 },
    #[error("trend range covers {years} years, at most {} allowed", MAX_TREND_YEARS)]
    YearSpan { years: usize },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("trend settings produce an invalid bundle: {0}")]
    Contract(ContractReport),
}

/// Generator settings. Defaults reproduce the published charts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub trends: TrendParams,
    pub delay_ms: u64,
    /// Fixed noise seed; unset means fresh jitter on every run.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trends: TrendParams::default(),
            delay_ms: DEFAULT_FETCH_DELAY.as_millis() as u64,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(raw)?;
        settings.check()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    fn check(&self) -> Result<(), ConfigError> {
        let trends = &self.trends;
        let years = [
            ("start_year", trends.start_year),
            ("end_year", trends.end_year),
            ("forecast_cutoff", trends.forecast_cutoff),
            ("recovery_start", trends.recovery_start),
        ]
        .into_iter()
        .chain(trends.shock_years.iter().map(|&year| ("shock_years", year)));
        for (field, year) in years {
            if !(YEAR_WINDOW.0..=YEAR_WINDOW.1).contains(&year) {
                return Err(ConfigError::YearBounds { field, year });
            }
        }

        if trends.end_year < trends.start_year {
            return Err(ConfigError::YearRange {
                start: trends.start_year,
                end: trends.end_year,
            });
        }
        let span = trends.year_count();
        if span > MAX_TREND_YEARS {
            return Err(ConfigError::YearSpan { years: span });
        }

        for (field, value) in [
            ("shock", trends.shock),
            ("recovery_rate", trends.recovery_rate),
            ("forecast_bonus", trends.forecast_bonus),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        // Series are linear in noise, so the two extremes bound every draw.
        for jitter in [-NOISE_BOUND, NOISE_BOUND] {
            let bundle = generator::generate_deep_dive_bundle(trends, &mut FixedNoise(jitter));
            contract::validate_bundle(&bundle, trends).map_err(ConfigError::Contract)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::contract::ContractViolation;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_toml("").expect("parse");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.delay(), Duration::from_millis(800));
        assert_eq!(settings.trends.forecast_cutoff, 2023);
    }

    #[test]
    fn overrides_merge_with_defaults() {
        let settings = Settings::from_toml(
            r#"
            seed = 7
            delay_ms = 0

            [trends]
            end_year = 2030
            "#,
        )
        .expect("parse");
        assert_eq!(settings.seed, Some(7));
        assert!(settings.delay().is_zero());
        assert_eq!(settings.trends.end_year, 2030);
        assert_eq!(settings.trends.start_year, 2015);
        assert_eq!(settings.trends.shock_years, vec![2020, 2021]);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_ranges() {
        assert!(matches!(
            Settings::from_toml("colour = \"red\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_toml("[trends]\nstart_year = 2030\nend_year = 2020"),
            Err(ConfigError::YearRange { start: 2030, end: 2020 })
        ));
    }

    #[test]
    fn rejects_years_outside_the_window() {
        let err = Settings::from_toml("[trends]\nstart_year = -2147483648\nend_year = 2147483647");
        assert!(matches!(
            err,
            Err(ConfigError::YearBounds {
                field: "start_year",
                year: i32::MIN
            })
        ));
        assert!(matches!(
            Settings::from_toml("[trends]\nshock_years = [2020, 3000]"),
            Err(ConfigError::YearBounds {
                field: "shock_years",
                year: 3000
            })
        ));
    }

    #[test]
    fn rejects_overlong_ranges() {
        assert!(matches!(
            Settings::from_toml("[trends]\nstart_year = 1900\nend_year = 2200\nforecast_cutoff = 2200"),
            Err(ConfigError::YearSpan { years: 301 })
        ));
    }

    #[test]
    fn rejects_shock_that_drives_values_negative() {
        let Err(ConfigError::Contract(report)) = Settings::from_toml("[trends]\nshock = -100.0")
        else {
            panic!("expected a contract failure");
        };
        assert!(report.violations.iter().any(|v| matches!(
            v,
            ContractViolation::TrendValue {
                year: 2020,
                series: "upperSecondary",
                ..
            }
        )));
    }

    #[test]
    fn rejects_non_finite_rates() {
        assert!(matches!(
            Settings::from_toml("[trends]\nrecovery_rate = nan"),
            Err(ConfigError::NonFinite {
                field: "recovery_rate"
            })
        ));
        assert!(matches!(
            Settings::from_toml("[trends]\nshock = -inf"),
            Err(ConfigError::NonFinite { field: "shock" })
        ));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "seed = 11").expect("write");
        let settings = Settings::load(file.path()).expect("load");
        assert_eq!(settings.seed, Some(11));

        let missing = Settings::load(Path::new("/nonexistent/sdg4.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
