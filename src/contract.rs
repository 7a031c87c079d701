//! Shape checks for a [`DeepDiveBundle`] before it reaches the chart views.
//!
//! The views read the bundle as-is, so every range and ordering rule they
//! rely on is verified here. Violations are collected rather than
//! short-circuited so one run lists everything wrong with a file.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;
use url::Url;

use crate::generator::TrendParams;
use crate::models::{AnalysisRecord, DeepDiveBundle, Section};

const EXPECTED_HIGHLIGHTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    #[error("expected {expected} trend points, found {found}")]
    TrendLength { expected: usize, found: usize },
    #[error("trend point {index} has year {found}, expected {expected}")]
    TrendYear {
        index: usize,
        expected: i64,
        found: i32,
    },
    #[error("{series} for {year} is {value}, outside 0-100")]
    TrendValue {
        year: i32,
        series: &'static str,
        value: f64,
    },
    #[error("year {year} has isForecast={found}")]
    ForecastFlag { year: i32, found: bool },
    #[error("teacher split must have Trained and Untrained, found {found:?}")]
    TeacherCategories { found: Vec<String> },
    #[error("teacher split sums to {total}, expected 100")]
    TeacherTotal { total: f64 },
    #[error("regional comparison is empty")]
    RegionalEmpty,
    #[error("country {country} appears more than once")]
    DuplicateCountry { country: String },
    #[error("{country} value {value} is outside 0-100")]
    RegionalValue { country: String, value: f64 },
    #[error("{country} has invalid region code {code:?}")]
    RegionalCode { country: String, code: String },
    #[error("expected {expected} highlighted countries, found {found}")]
    HighlightCount { expected: usize, found: usize },
    #[error("{section} analysis has an empty {field}")]
    EmptyAnalysisField {
        section: &'static str,
        field: &'static str,
    },
    #[error("{section} analysis lists no sources")]
    MissingSources { section: &'static str },
    #[error("{section} source {name:?} has invalid url {url:?}: {reason}")]
    SourceUrl {
        section: &'static str,
        name: String,
        url: String,
        reason: String,
    },
}

/// Every violation found in one bundle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContractReport {
    pub violations: Vec<ContractViolation>,
}

impl ContractReport {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    fn push(&mut self, violation: ContractViolation) {
        tracing::warn!(violation = %violation, "bundle contract violation");
        self.violations.push(violation);
    }
}

impl fmt::Display for ContractReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} contract violation(s)", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n- {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ContractReport {}

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("bundle is not valid JSON for the deep dive schema: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Violations(#[from] ContractReport),
}

pub fn parse_bundle(json: &str) -> Result<DeepDiveBundle, ContractError> {
    Ok(serde_json::from_str(json)?)
}

/// Parses and validates in one step.
pub fn load_bundle(json: &str, params: &TrendParams) -> Result<DeepDiveBundle, ContractError> {
    let bundle = parse_bundle(json)?;
    validate_bundle(&bundle, params)?;
    Ok(bundle)
}

pub fn validate_bundle(bundle: &DeepDiveBundle, params: &TrendParams) -> Result<(), ContractReport> {
    let mut report = ContractReport::default();

    check_trends(bundle, params, &mut report);
    check_teacher_split(bundle, &mut report);
    check_regional(bundle, &mut report);
    for (section, analysis) in bundle.analyses() {
        check_analysis(section, analysis, &mut report);
    }

    if report.is_empty() {
        Ok(())
    } else {
        Err(report)
    }
}

fn in_percent_range(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

fn check_trends(bundle: &DeepDiveBundle, params: &TrendParams, report: &mut ContractReport) {
    let trends = &bundle.education_trends;
    let expected = params.year_count();
    if trends.len() != expected {
        report.push(ContractViolation::TrendLength {
            expected,
            found: trends.len(),
        });
    }

    for (index, point) in trends.iter().enumerate() {
        let expected_year = i64::from(params.start_year) + index as i64;
        if i64::from(point.year) != expected_year {
            report.push(ContractViolation::TrendYear {
                index,
                expected: expected_year,
                found: point.year,
            });
        }

        for (series, value) in [
            ("primary", point.primary),
            ("lowerSecondary", point.lower_secondary),
            ("upperSecondary", point.upper_secondary),
        ] {
            if !in_percent_range(value) {
                report.push(ContractViolation::TrendValue {
                    year: point.year,
                    series,
                    value,
                });
            }
        }

        if point.is_forecast != params.is_forecast(point.year) {
            report.push(ContractViolation::ForecastFlag {
                year: point.year,
                found: point.is_forecast,
            });
        }
    }
}

fn check_teacher_split(bundle: &DeepDiveBundle, report: &mut ContractReport) {
    let names: Vec<String> = bundle.teacher_stats.iter().map(|s| s.name.clone()).collect();
    let has_both = bundle.teacher_stats.len() == 2
        && bundle.teacher_stat("Trained").is_some()
        && bundle.teacher_stat("Untrained").is_some();
    if !has_both {
        report.push(ContractViolation::TeacherCategories { found: names });
    }

    let total: f64 = bundle.teacher_stats.iter().map(|s| s.value).sum();
    if (total - 100.0).abs() > f64::EPSILON * 100.0 {
        report.push(ContractViolation::TeacherTotal { total });
    }
}

fn check_regional(bundle: &DeepDiveBundle, report: &mut ContractReport) {
    let entries = &bundle.regional_comparison;
    if entries.is_empty() {
        report.push(ContractViolation::RegionalEmpty);
        return;
    }

    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.country.as_str()) {
            report.push(ContractViolation::DuplicateCountry {
                country: entry.country.clone(),
            });
        }
        if !in_percent_range(entry.value) {
            report.push(ContractViolation::RegionalValue {
                country: entry.country.clone(),
                value: entry.value,
            });
        }
        let code_ok =
            entry.code.len() == 2 && entry.code.chars().all(|c| c.is_ascii_lowercase());
        if !code_ok {
            report.push(ContractViolation::RegionalCode {
                country: entry.country.clone(),
                code: entry.code.clone(),
            });
        }
    }

    let highlights = entries.iter().filter(|e| e.is_highlight).count();
    if highlights != EXPECTED_HIGHLIGHTS {
        report.push(ContractViolation::HighlightCount {
            expected: EXPECTED_HIGHLIGHTS,
            found: highlights,
        });
    }
}

fn check_analysis(section: Section, analysis: &AnalysisRecord, report: &mut ContractReport) {
    let label = section.label();
    for (field, value) in [
        ("title", &analysis.title),
        ("summary", &analysis.summary),
        ("fullText", &analysis.full_text),
    ] {
        if value.trim().is_empty() {
            report.push(ContractViolation::EmptyAnalysisField {
                section: label,
                field,
            });
        }
    }

    if analysis.sources.is_empty() {
        report.push(ContractViolation::MissingSources { section: label });
    }

    for source in &analysis.sources {
        if let Err(reason) = check_source_url(&source.url) {
            report.push(ContractViolation::SourceUrl {
                section: label,
                name: source.name.clone(),
                url: source.url.clone(),
                reason,
            });
        }
    }
}

fn check_source_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|err| err.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme {other}")),
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_deep_dive_bundle;
    use crate::models::SourceRef;
    use crate::noise::{UniformNoise, ZeroNoise};

    fn bundle() -> DeepDiveBundle {
        generate_deep_dive_bundle(&TrendParams::default(), &mut ZeroNoise)
    }

    #[test]
    fn generated_bundles_pass() {
        let params = TrendParams::default();
        for seed in 0..25 {
            let bundle = generate_deep_dive_bundle(&params, &mut UniformNoise::seeded(seed));
            assert_eq!(validate_bundle(&bundle, &params), Ok(()));
        }
    }

    #[test]
    fn every_source_url_is_absolute() {
        let bundle = bundle();
        for (_, analysis) in bundle.analyses() {
            assert!(!analysis.sources.is_empty());
            for source in &analysis.sources {
                assert!(check_source_url(&source.url).is_ok(), "{}", source.url);
            }
        }
    }

    #[test]
    fn reports_missing_year_and_wrong_flag() {
        let mut bundle = bundle();
        bundle.education_trends.remove(3);
        bundle.education_trends[0].is_forecast = true;

        let report = validate_bundle(&bundle, &TrendParams::default()).unwrap_err();
        assert!(report.violations.contains(&ContractViolation::TrendLength {
            expected: 11,
            found: 10
        }));
        assert!(report.violations.contains(&ContractViolation::TrendYear {
            index: 3,
            expected: 2018,
            found: 2019
        }));
        assert!(report.violations.contains(&ContractViolation::ForecastFlag {
            year: 2015,
            found: true
        }));
    }

    #[test]
    fn reports_values_above_one_hundred() {
        let mut bundle = bundle();
        bundle.education_trends[2].upper_secondary = 100.5;
        let report = validate_bundle(&bundle, &TrendParams::default()).unwrap_err();
        assert_eq!(
            report.violations,
            vec![ContractViolation::TrendValue {
                year: 2017,
                series: "upperSecondary",
                value: 100.5
            }]
        );
    }

    #[test]
    fn reports_teacher_split_that_does_not_sum() {
        let mut bundle = bundle();
        bundle.teacher_stats[1].value = 20.0;
        let report = validate_bundle(&bundle, &TrendParams::default()).unwrap_err();
        assert_eq!(
            report.violations,
            vec![ContractViolation::TeacherTotal { total: 108.0 }]
        );
    }

    #[test]
    fn reports_renamed_teacher_category() {
        let mut bundle = bundle();
        bundle.teacher_stats[1].name = "Volunteer".to_string();
        let report = validate_bundle(&bundle, &TrendParams::default()).unwrap_err();
        assert_eq!(
            report.violations,
            vec![ContractViolation::TeacherCategories {
                found: vec!["Trained".to_string(), "Volunteer".to_string()]
            }]
        );
    }

    #[test]
    fn reports_empty_regional_comparison() {
        let mut bundle = bundle();
        bundle.regional_comparison.clear();
        let report = validate_bundle(&bundle, &TrendParams::default()).unwrap_err();
        assert_eq!(report.violations, vec![ContractViolation::RegionalEmpty]);
    }

    #[test]
    fn reports_regional_value_out_of_range() {
        let mut bundle = bundle();
        bundle.regional_comparison[1].value = 101.0;
        let report = validate_bundle(&bundle, &TrendParams::default()).unwrap_err();
        assert_eq!(
            report.violations,
            vec![ContractViolation::RegionalValue {
                country: "Japan".to_string(),
                value: 101.0
            }]
        );
    }

    #[test]
    fn reports_malformed_region_codes() {
        let mut bundle = bundle();
        bundle.regional_comparison[4].code = "LK".to_string();
        bundle.regional_comparison[3].code = "vnm".to_string();
        let report = validate_bundle(&bundle, &TrendParams::default()).unwrap_err();
        assert_eq!(
            report.violations,
            vec![
                ContractViolation::RegionalCode {
                    country: "Vietnam".to_string(),
                    code: "vnm".to_string()
                },
                ContractViolation::RegionalCode {
                    country: "Sri Lanka".to_string(),
                    code: "LK".to_string()
                },
            ]
        );
    }

    #[test]
    fn reports_blank_analysis_title() {
        let mut bundle = bundle();
        bundle.completion_analysis.title = "  ".to_string();
        let report = validate_bundle(&bundle, &TrendParams::default()).unwrap_err();
        assert_eq!(
            report.violations,
            vec![ContractViolation::EmptyAnalysisField {
                section: "completion",
                field: "title"
            }]
        );
    }

    #[test]
    fn reports_duplicate_country_and_highlights() {
        let mut bundle = bundle();
        let extra = bundle.regional_comparison[0].clone();
        bundle.regional_comparison.push(extra);
        let report = validate_bundle(&bundle, &TrendParams::default()).unwrap_err();
        assert!(report
            .violations
            .contains(&ContractViolation::DuplicateCountry {
                country: "Singapore".to_string()
            }));
        assert!(report.violations.contains(&ContractViolation::HighlightCount {
            expected: 2,
            found: 3
        }));
    }

    #[test]
    fn reports_bad_source_urls() {
        let mut bundle = bundle();
        bundle.teacher_analysis.sources = vec![SourceRef {
            name: "Relative".to_string(),
            url: "/reports/4c1".to_string(),
        }];
        bundle.regional_analysis.sources.clear();

        let report = validate_bundle(&bundle, &TrendParams::default()).unwrap_err();
        assert_eq!(report.violations.len(), 2);
        assert!(matches!(
            &report.violations[0],
            ContractViolation::SourceUrl { section: "teacher", .. }
        ));
        assert_eq!(
            report.violations[1],
            ContractViolation::MissingSources { section: "regional" }
        );
    }

    #[test]
    fn rejects_non_web_schemes() {
        assert!(check_source_url("mailto:stats@example.org").is_err());
        assert!(check_source_url("ftp://uis.unesco.org/").is_err());
        assert!(check_source_url("https://uis.unesco.org/").is_ok());
    }

    #[test]
    fn load_round_trips_generated_json() {
        let params = TrendParams::default();
        let json = serde_json::to_string(&bundle()).expect("serialize");
        let loaded = load_bundle(&json, &params).expect("valid bundle");
        assert_eq!(loaded.education_trends.len(), 11);
        assert_eq!(loaded.completion_analysis, bundle().completion_analysis);
        assert_eq!(loaded.regional_comparison[4].code, "lk");
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = parse_bundle("{\"educationTrends\": 3}").unwrap_err();
        assert!(matches!(err, ContractError::Malformed(_)));
    }
}
