use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::chart::{self, TREND_SERIES};
use crate::models::{AnalysisRecord, DeepDiveBundle, EducationTrendPoint};

#[derive(Debug, Clone, PartialEq)]
pub struct LevelSummary {
    pub name: &'static str,
    pub first: f64,
    pub last_observed: f64,
    pub lowest: f64,
    pub lowest_year: i32,
}

/// Start, trough and latest observed value for each education level.
pub fn summarize_levels(trends: &[EducationTrendPoint]) -> Vec<LevelSummary> {
    let observed: Vec<&EducationTrendPoint> = trends.iter().filter(|p| !p.is_forecast).collect();
    let (Some(&first), Some(&last)) = (observed.first(), observed.last()) else {
        return Vec::new();
    };

    TREND_SERIES
        .iter()
        .map(|series| {
            let lowest = observed
                .iter()
                .min_by(|a, b| {
                    series
                        .value(a)
                        .partial_cmp(&series.value(b))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .copied()
                .unwrap_or(first);
            LevelSummary {
                name: series.name,
                first: series.value(first),
                last_observed: series.value(last),
                lowest: series.value(lowest),
                lowest_year: lowest.year,
            }
        })
        .collect()
}

fn write_analysis(output: &mut String, analysis: &AnalysisRecord) {
    let _ = writeln!(output, "**{}**", analysis.title);
    let _ = writeln!(output);
    let _ = writeln!(output, "> {}", analysis.summary);
    for paragraph in analysis.paragraphs() {
        let _ = writeln!(output);
        let _ = writeln!(output, "{paragraph}");
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "Sources:");
    for source in &analysis.sources {
        let _ = writeln!(output, "- [{}]({})", source.name, source.url);
    }
}

pub fn build_report(bundle: &DeepDiveBundle, generated_at: DateTime<Utc>) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# SDG 4 Deep Dive");
    let _ = writeln!(
        output,
        "Generated {}",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output);

    let _ = writeln!(output, "## Completion Rate Trends");
    if bundle.education_trends.is_empty() {
        let _ = writeln!(output, "No trend data in this bundle.");
    } else {
        let _ = writeln!(output, "| Year | Primary | Lower Secondary | Upper Secondary | |");
        let _ = writeln!(output, "|---|---|---|---|---|");
        for point in &bundle.education_trends {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} |",
                point.year,
                chart::to_percent(point.primary),
                chart::to_percent(point.lower_secondary),
                chart::to_percent(point.upper_secondary),
                if point.is_forecast { "forecast" } else { "" }
            );
        }
        let _ = writeln!(output);
        for level in summarize_levels(&bundle.education_trends) {
            let _ = writeln!(
                output,
                "- {}: {} to {} (low of {} in {})",
                level.name,
                chart::to_percent(level.first),
                chart::to_percent(level.last_observed),
                chart::to_percent(level.lowest),
                level.lowest_year
            );
        }
    }
    let _ = writeln!(output);
    write_analysis(&mut output, &bundle.completion_analysis);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Teacher Qualifications");
    for stat in &bundle.teacher_stats {
        let _ = writeln!(output, "- {}", chart::pie_tooltip(stat));
    }
    let _ = writeln!(output);
    write_analysis(&mut output, &bundle.teacher_analysis);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Asia-Pacific Reading Proficiency");
    for entry in &bundle.regional_comparison {
        let marker = if entry.is_highlight { " *" } else { "" };
        let _ = writeln!(
            output,
            "- {} ({}): {}{}",
            entry.country,
            entry.code.to_uppercase(),
            chart::plain_percent(entry.value),
            marker
        );
    }
    let _ = writeln!(output);
    write_analysis(&mut output, &bundle.regional_analysis);

    output
}
