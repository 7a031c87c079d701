use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{
    AnalysisRecord, DeepDiveBundle, EducationTrendPoint, IndicatorData, RegionalComparisonEntry,
    SourceRef, TeacherStat,
};
use crate::noise::NoiseSource;

pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(800);

/// Shape of the completion-rate series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrendParams {
    pub start_year: i32,
    pub end_year: i32,
    /// Years strictly after this one are forecasts.
    pub forecast_cutoff: i32,
    pub shock_years: Vec<i32>,
    pub shock: f64,
    pub recovery_start: i32,
    pub recovery_rate: f64,
    pub forecast_bonus: f64,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self {
            start_year: 2015,
            end_year: 2025,
            forecast_cutoff: 2023,
            shock_years: vec![2020, 2021],
            shock: -1.5,
            recovery_start: 2021,
            recovery_rate: 0.4,
            forecast_bonus: 0.5,
        }
    }
}

impl TrendParams {
    pub fn year_count(&self) -> usize {
        let span = i64::from(self.end_year) - i64::from(self.start_year) + 1;
        usize::try_from(span).unwrap_or(0)
    }

    pub fn is_forecast(&self, year: i32) -> bool {
        year > self.forecast_cutoff
    }

    fn shock_for(&self, year: i32) -> f64 {
        if self.shock_years.contains(&year) {
            self.shock
        } else {
            0.0
        }
    }

    fn recovery_for(&self, year: i32) -> f64 {
        let since = (i64::from(year) - i64::from(self.recovery_start)).max(0);
        let base = since as f64 * self.recovery_rate;
        if self.is_forecast(year) {
            base + self.forecast_bonus
        } else {
            base
        }
    }
}

/// Computes a single year. `noise` is ignored for forecast years.
pub fn trend_point(params: &TrendParams, year: i32, noise: f64) -> EducationTrendPoint {
    let is_forecast = params.is_forecast(year);
    let noise = if is_forecast { 0.0 } else { noise };
    let elapsed = (i64::from(year) - i64::from(params.start_year)) as f64;
    let covid = params.shock_for(year);
    let recovery = params.recovery_for(year);

    EducationTrendPoint {
        year,
        primary: (98.5 + elapsed * 0.1 + covid * 0.2 + noise).min(100.0),
        lower_secondary: (94.0 + elapsed * 0.25 + covid * 0.8 + recovery + noise).min(100.0),
        upper_secondary: (84.5 + elapsed * 0.4 + covid * 1.2 + recovery + noise).min(100.0),
        is_forecast,
    }
}

pub fn education_trends<N: NoiseSource>(
    params: &TrendParams,
    noise: &mut N,
) -> Vec<EducationTrendPoint> {
    (params.start_year..=params.end_year)
        .map(|year| {
            let jitter = if params.is_forecast(year) {
                0.0
            } else {
                noise.sample()
            };
            trend_point(params, year, jitter)
        })
        .collect()
}

pub fn teacher_stats() -> Vec<TeacherStat> {
    vec![
        TeacherStat {
            name: "Trained".to_string(),
            value: 88.0,
            color: "#C5192D".to_string(),
        },
        TeacherStat {
            name: "Untrained".to_string(),
            value: 12.0,
            color: "#2e2e32".to_string(),
        },
    ]
}

/// Top regional performers plus the two focus countries, in chart order.
pub fn regional_comparison() -> Vec<RegionalComparisonEntry> {
    [
        ("Singapore", "sg", 89.2, true),
        ("Japan", "jp", 85.4, false),
        ("South Korea", "kr", 83.1, false),
        ("Vietnam", "vn", 78.5, false),
        ("Sri Lanka", "lk", 52.8, true),
    ]
    .into_iter()
    .map(|(country, code, value, is_highlight)| RegionalComparisonEntry {
        country: country.to_string(),
        code: code.to_string(),
        value,
        is_highlight,
    })
    .collect()
}

fn sources(pairs: &[(&str, &str)]) -> Vec<SourceRef> {
    pairs
        .iter()
        .map(|(name, url)| SourceRef {
            name: name.to_string(),
            url: url.to_string(),
        })
        .collect()
}

pub fn completion_analysis() -> AnalysisRecord {
    AnalysisRecord {
        title: "The Completion Rate Gap".to_string(),
        summary: "While Sri Lanka achieves near-universal primary education, specific challenges remain in retaining students through Upper Secondary levels.".to_string(),
        full_text: "Data indicates a strong foundation in Primary Education (Grades 1-5) with completion rates consistently above 98%. However, a distinct 'scissor effect' appears as students progress. Lower Secondary (Grades 6-9) maintains strong resilience, but Upper Secondary (Grades 10-11) shows a historical drop-off. \n\nThe 2020-2021 dip reflects pandemic-related school closures, most severely impacting the examination years (Upper Secondary). The forecast for 2024-2025 suggests a robust recovery, driven by digital adoption and remedial programs. The target for 2030 is 100% across all levels, requiring focused intervention on the 10-15% attrition rate at the O-Level stage.".to_string(),
        sources: sources(&[
            ("Sustainable Development Council", "https://www.sdc.gov.lk/"),
            ("UNESCO Institute for Statistics", "http://uis.unesco.org/"),
            ("Dept. of Census and Statistics", "http://www.statistics.gov.lk/"),
        ]),
    }
}

pub fn teacher_analysis() -> AnalysisRecord {
    AnalysisRecord {
        title: "Teacher Qualifications (SDG 4.c.1)".to_string(),
        summary: "A robust 88% of the teaching workforce in Sri Lanka meets the minimum qualification standards, a key driver for educational quality.".to_string(),
        full_text: "SDG Indicator 4.c.1 measures the proportion of teachers who have received at least the minimum organized teacher training (e.g. pedagogical training) pre-service or in-service required for teaching at the relevant level.\n\nSri Lanka maintains a relatively high standard in the region compared to peers. However, the 12% 'Untrained' segment often represents volunteer teachers or those in remote rural schools where resource allocation is scarce. \n\nClosing this 12% gap is essential not just for hitting the SDG target, but for ensuring that the *quality* of education (Goal 4) is equitable across all provinces, regardless of socio-economic status.".to_string(),
        sources: sources(&[
            (
                "UN SDG Data Repository",
                "https://unstats.un.org/SDGAPI/v1/sdg/Indicator/Data?indicator=4.c.1&areaCode=144",
            ),
            (
                "UNESCO Global Education Monitoring",
                "https://www.unesco.org/gem-report/",
            ),
        ]),
    }
}

pub fn regional_analysis() -> AnalysisRecord {
    AnalysisRecord {
        title: "Asia-Pacific Region".to_string(),
        summary: "Sri Lanka performs strongly in enrollment, but 'Learning Proficiency' (SDG 4.1.1) reveals the gap between attendance and actual skill acquisition compared to regional leaders.".to_string(),
        full_text: "This column chart utilizes official UN SDG API data for Indicator 4.1.1: 'Minimum Proficiency in Reading' at the end of Lower Secondary education. \n\nWhile Singapore, Japan, and South Korea set the global benchmark with proficiency rates exceeding 80%, Sri Lanka sits at approximately 52.8%. This metric is crucial because it highlights the difference between *schooling* (going to class) and *learning* (gaining skills).\n\nThe comparison shows that while Sri Lanka has successfully solved the 'access' problem (shown in the first chart), the current national challenge is 'quality'. Bridging this 30-point gap requires modernizing curricula, improving assessment methods, and investing in teacher training (Chart 2) to match the pedagogical standards of high-performing Asian economies.".to_string(),
        sources: sources(&[
            (
                "UN SDG API (Indicator 4.1.1)",
                "https://unstats.un.org/sdgs/dataportal",
            ),
            (
                "PISA for Development Results",
                "https://www.oecd.org/pisa/pisa-for-development/",
            ),
        ]),
    }
}

pub fn generate_deep_dive_bundle<N: NoiseSource>(
    params: &TrendParams,
    noise: &mut N,
) -> DeepDiveBundle {
    let education_trends = education_trends(params, noise);
    tracing::debug!(
        points = education_trends.len(),
        start = params.start_year,
        end = params.end_year,
        "generated education trends"
    );

    DeepDiveBundle {
        education_trends,
        completion_analysis: completion_analysis(),
        teacher_stats: teacher_stats(),
        teacher_analysis: teacher_analysis(),
        regional_comparison: regional_comparison(),
        regional_analysis: regional_analysis(),
    }
}

/// Generates a bundle after a simulated network round trip.
pub async fn fetch_deep_dive_bundle<N: NoiseSource>(
    params: &TrendParams,
    noise: &mut N,
    delay: Duration,
) -> DeepDiveBundle {
    if !delay.is_zero() {
        tracing::debug!(delay_ms = delay.as_millis() as u64, "simulating fetch latency");
        tokio::time::sleep(delay).await;
    }
    generate_deep_dive_bundle(params, noise)
}

/// Live indicator lookups are not wired up; always returns an empty snapshot.
pub async fn fetch_indicator_data(indicator_id: &str) -> IndicatorData {
    tracing::debug!(indicator_id, "indicator fetch is stubbed");
    IndicatorData {
        id: "stub".to_string(),
        name: "stub".to_string(),
        data: Vec::new(),
        trends: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{FixedNoise, UniformNoise, ZeroNoise, NOISE_BOUND};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn eleven_consecutive_years() {
        let trends = education_trends(&TrendParams::default(), &mut UniformNoise::seeded(1));
        assert_eq!(trends.len(), 11);
        let years: Vec<i32> = trends.iter().map(|p| p.year).collect();
        assert_eq!(years, (2015..=2025).collect::<Vec<_>>());
    }

    #[test]
    fn values_never_exceed_one_hundred() {
        for seed in 0..200 {
            let trends =
                education_trends(&TrendParams::default(), &mut UniformNoise::seeded(seed));
            for point in &trends {
                assert!(point.primary <= 100.0);
                assert!(point.lower_secondary <= 100.0);
                assert!(point.upper_secondary <= 100.0);
            }
        }
    }

    #[test]
    fn forecast_flag_follows_cutoff() {
        let trends = education_trends(&TrendParams::default(), &mut ZeroNoise);
        for point in &trends {
            assert_eq!(point.is_forecast, point.year > 2023, "year {}", point.year);
        }
        let forecast: Vec<i32> = trends
            .iter()
            .filter(|p| p.is_forecast)
            .map(|p| p.year)
            .collect();
        assert_eq!(forecast, vec![2024, 2025]);
    }

    #[test]
    fn forecast_years_ignore_noise() {
        let params = TrendParams::default();
        let calm = education_trends(&params, &mut ZeroNoise);
        let noisy = education_trends(&params, &mut FixedNoise(NOISE_BOUND));
        let random = education_trends(&params, &mut UniformNoise::seeded(99));

        for ((a, b), c) in calm.iter().zip(&noisy).zip(&random) {
            if a.is_forecast {
                assert_eq!(a, b);
                assert_eq!(a, c);
            } else {
                assert!(close(b.primary - a.primary, NOISE_BOUND));
            }
        }

        let y2024 = &calm[9];
        assert!(close(y2024.primary, 99.4));
        assert!(close(y2024.lower_secondary, 97.95));
        assert!(close(y2024.upper_secondary, 89.8));
        let y2025 = &calm[10];
        assert!(close(y2025.primary, 99.5));
        assert!(close(y2025.lower_secondary, 98.6));
        assert!(close(y2025.upper_secondary, 90.6));
    }

    #[test]
    fn shock_years_dip_below_linear_drift() {
        for seed in 0..50 {
            let trends =
                education_trends(&TrendParams::default(), &mut UniformNoise::seeded(seed));
            let y2020 = &trends[5];
            assert_eq!(y2020.year, 2020);
            // 98.5 + 5 * 0.1, the drift without the shock
            assert!(y2020.primary < 99.0 - 0.05);
            assert!(y2020.lower_secondary < 95.25 - 0.5);
            assert!(y2020.upper_secondary < 86.5 - 1.0);
        }
    }

    #[test]
    fn upper_secondary_takes_the_largest_hit() {
        let params = TrendParams::default();
        let shocked = trend_point(&params, 2020, 0.0);
        let unshocked = TrendParams {
            shock_years: Vec::new(),
            ..TrendParams::default()
        };
        let baseline = trend_point(&unshocked, 2020, 0.0);

        let primary_drop = baseline.primary - shocked.primary;
        let lower_drop = baseline.lower_secondary - shocked.lower_secondary;
        let upper_drop = baseline.upper_secondary - shocked.upper_secondary;
        assert!(upper_drop > lower_drop && lower_drop > primary_drop);
        assert!(close(upper_drop, 1.8));
    }

    #[test]
    fn recovery_ramps_after_shock() {
        let params = TrendParams::default();
        assert_eq!(params.recovery_for(2021), 0.0);
        assert!(close(params.recovery_for(2022), 0.4));
        assert!(close(params.recovery_for(2023), 0.8));
        assert!(close(params.recovery_for(2024), 1.7));
    }

    #[test]
    fn extreme_year_fields_do_not_overflow() {
        let params = TrendParams {
            start_year: i32::MIN,
            end_year: i32::MAX,
            recovery_start: i32::MIN,
            ..TrendParams::default()
        };
        assert_eq!(params.year_count() as u64, 1 << 32);
        assert!(params.recovery_for(i32::MAX) > 0.0);

        let reversed = TrendParams {
            start_year: i32::MAX,
            end_year: i32::MIN,
            ..TrendParams::default()
        };
        assert_eq!(reversed.year_count(), 0);
    }

    #[test]
    fn zero_noise_matches_formula() {
        let trends = education_trends(&TrendParams::default(), &mut ZeroNoise);
        let first = &trends[0];
        assert_eq!(first.year, 2015);
        assert!(!first.is_forecast);
        assert!(close(first.primary, 98.5));
        assert!(close(first.lower_secondary, 94.0));
        assert!(close(first.upper_secondary, 84.5));
    }

    #[test]
    fn primary_is_capped_for_long_ranges() {
        let params = TrendParams {
            end_year: 2050,
            forecast_cutoff: 2050,
            ..TrendParams::default()
        };
        let trends = education_trends(&params, &mut FixedNoise(NOISE_BOUND));
        assert!(trends.iter().any(|p| p.primary == 100.0));
        assert!(trends.iter().all(|p| p.primary <= 100.0));
    }

    #[test]
    fn fixtures_match_published_figures() {
        let bundle = generate_deep_dive_bundle(&TrendParams::default(), &mut ZeroNoise);
        let trained = bundle.teacher_stat("Trained").map(|s| s.value);
        let untrained = bundle.teacher_stat("Untrained").map(|s| s.value);
        assert_eq!(trained, Some(88.0));
        assert_eq!(untrained, Some(12.0));

        let countries: Vec<&str> = bundle
            .regional_comparison
            .iter()
            .map(|c| c.country.as_str())
            .collect();
        assert_eq!(
            countries,
            vec!["Singapore", "Japan", "South Korea", "Vietnam", "Sri Lanka"]
        );
        assert_eq!(bundle.country("Sri Lanka").map(|c| c.value), Some(52.8));
        let highlighted: Vec<&str> = bundle
            .regional_comparison
            .iter()
            .filter(|c| c.is_highlight)
            .map(|c| c.country.as_str())
            .collect();
        assert_eq!(highlighted, vec!["Singapore", "Sri Lanka"]);
    }

    #[test]
    fn seeded_bundles_are_reproducible() {
        let params = TrendParams::default();
        let a = generate_deep_dive_bundle(&params, &mut UniformNoise::seeded(2024));
        let b = generate_deep_dive_bundle(&params, &mut UniformNoise::seeded(2024));
        assert_eq!(a, b);
    }

    #[test]
    fn bundle_serializes_with_view_field_names() {
        let bundle = generate_deep_dive_bundle(&TrendParams::default(), &mut ZeroNoise);
        let json = serde_json::to_value(&bundle).expect("serialize");
        for key in [
            "educationTrends",
            "completionAnalysis",
            "teacherStats",
            "teacherAnalysis",
            "regionalComparison",
            "regionalAnalysis",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        let point = &json["educationTrends"][0];
        assert!(point.get("lowerSecondary").is_some());
        assert!(point.get("upperSecondary").is_some());
        assert_eq!(point["isForecast"], serde_json::Value::Bool(false));
        assert!(json["regionalComparison"][0].get("isHighlight").is_some());
        assert!(json["completionAnalysis"].get("fullText").is_some());
    }

    #[tokio::test]
    async fn fetch_resolves_with_full_bundle() {
        let bundle = fetch_deep_dive_bundle(
            &TrendParams::default(),
            &mut ZeroNoise,
            Duration::from_millis(5),
        )
        .await;
        assert_eq!(bundle.education_trends.len(), 11);
    }

    #[tokio::test]
    async fn indicator_fetch_is_empty() {
        let data = fetch_indicator_data("4.1.1").await;
        assert_eq!(data.id, "stub");
        assert!(data.data.is_empty());
        assert!(data.trends.is_empty());
    }
}
