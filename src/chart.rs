use serde::Serialize;

use crate::models::{
    AnalysisRecord, DeepDiveBundle, EducationTrendPoint, RegionalComparisonEntry, Section,
    SourceRef, TeacherStat,
};

pub const COMPLETION_Y_DOMAIN: (f64, f64) = (75.0, 100.0);
pub const REGIONAL_Y_DOMAIN: (f64, f64) = (0.0, 100.0);
pub const FORECAST_LABEL: &str = "FORECAST";
pub const DEFAULT_BAR_FILL: &str = "#475569";
/// Number of sources listed on the info card before "read more".
pub const CARD_SOURCE_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Series {
    pub key: &'static str,
    pub name: &'static str,
    pub color: &'static str,
}

pub const TREND_SERIES: [Series; 3] = [
    Series {
        key: "primary",
        name: "Primary",
        color: "#4ade80",
    },
    Series {
        key: "lowerSecondary",
        name: "Lower Secondary",
        color: "#60a5fa",
    },
    Series {
        key: "upperSecondary",
        name: "Upper Secondary",
        color: "#ef4444",
    },
];

impl Series {
    pub fn value(&self, point: &EducationTrendPoint) -> f64 {
        match self.key {
            "primary" => point.primary,
            "lowerSecondary" => point.lower_secondary,
            _ => point.upper_secondary,
        }
    }
}

pub fn to_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Pie and bar labels print the raw value, `88%` or `52.8%`.
pub fn plain_percent(value: f64) -> String {
    format!("{value}%")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipRow {
    pub name: &'static str,
    pub color: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendTooltip {
    pub label: String,
    pub rows: Vec<TooltipRow>,
}

pub fn trend_tooltip(point: &EducationTrendPoint) -> TrendTooltip {
    let label = if point.is_forecast {
        format!("{} (forecast)", point.year)
    } else {
        point.year.to_string()
    };
    TrendTooltip {
        label,
        rows: TREND_SERIES
            .iter()
            .map(|series| TooltipRow {
                name: series.name,
                color: series.color,
                value: to_percent(series.value(point)),
            })
            .collect(),
    }
}

/// Year at which the dashed forecast marker is drawn: the last observed year.
pub fn forecast_reference_year(trends: &[EducationTrendPoint]) -> Option<i32> {
    trends
        .iter()
        .take_while(|point| !point.is_forecast)
        .last()
        .map(|point| point.year)
}

pub fn pie_tooltip(stat: &TeacherStat) -> String {
    format!("{}: {}", stat.name, plain_percent(stat.value))
}

/// Big number in the middle of the donut.
pub fn teacher_center_label(stats: &[TeacherStat]) -> Option<String> {
    stats
        .iter()
        .find(|stat| stat.name == "Trained")
        .map(|stat| plain_percent(stat.value))
}

pub fn flag_url(code: &str) -> String {
    format!("https://flagcdn.com/w40/{code}.png")
}

pub fn bar_fill(entry: &RegionalComparisonEntry) -> String {
    let gradient = match entry.country.as_str() {
        "Singapore" => "gradSingapore",
        "Sri Lanka" => "gradSriLanka",
        "Japan" => "gradJapan",
        "South Korea" => "gradKorea",
        "Vietnam" => "gradVietnam",
        _ => return DEFAULT_BAR_FILL.to_string(),
    };
    format!("url(#{gradient})")
}

/// Drop-shadow color for highlighted bars, `None` for the rest.
pub fn bar_glow(entry: &RegionalComparisonEntry) -> Option<&'static str> {
    if !entry.is_highlight {
        return None;
    }
    if entry.country == "Singapore" {
        Some("rgba(34, 211, 238, 0.5)")
    } else {
        Some("rgba(251, 191, 36, 0.5)")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagTick {
    pub label: String,
    pub flag: String,
    pub bold: bool,
    pub opacity: f64,
}

pub fn flag_tick(entry: &RegionalComparisonEntry) -> FlagTick {
    FlagTick {
        label: entry.country.clone(),
        flag: flag_url(&entry.code),
        bold: entry.is_highlight,
        opacity: if entry.is_highlight { 1.0 } else { 0.6 },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub x: i32,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionChart {
    pub series: [Series; 3],
    pub y_domain: (f64, f64),
    pub forecast_marker: Option<ReferenceLine>,
    pub tooltips: Vec<TrendTooltip>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonutSlice {
    pub name: String,
    pub color: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherChart {
    pub center_label: Option<String>,
    pub slices: Vec<DonutSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub fill: String,
    pub glow: Option<&'static str>,
    pub tick: FlagTick,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalChart {
    pub y_domain: (f64, f64),
    pub bars: Vec<Bar>,
}

/// Info card beside a chart: the summary and the first few sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoCard {
    pub section: Section,
    pub title: String,
    pub summary: String,
    pub sources: Vec<SourceRef>,
}

impl InfoCard {
    pub fn new(section: Section, analysis: &AnalysisRecord) -> Self {
        Self {
            section,
            title: analysis.title.clone(),
            summary: analysis.summary.clone(),
            sources: analysis
                .sources
                .iter()
                .take(CARD_SOURCE_LIMIT)
                .cloned()
                .collect(),
        }
    }
}

/// Everything the three charts draw, derived from one bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartViewModel {
    pub completion: CompletionChart,
    pub teacher: TeacherChart,
    pub regional: RegionalChart,
    pub cards: Vec<InfoCard>,
}

impl ChartViewModel {
    pub fn from_bundle(bundle: &DeepDiveBundle) -> Self {
        let trends = &bundle.education_trends;
        Self {
            completion: CompletionChart {
                series: TREND_SERIES,
                y_domain: COMPLETION_Y_DOMAIN,
                forecast_marker: forecast_reference_year(trends).map(|x| ReferenceLine {
                    x,
                    label: FORECAST_LABEL,
                }),
                tooltips: trends.iter().map(trend_tooltip).collect(),
            },
            teacher: TeacherChart {
                center_label: teacher_center_label(&bundle.teacher_stats),
                slices: bundle
                    .teacher_stats
                    .iter()
                    .map(|stat| DonutSlice {
                        name: stat.name.clone(),
                        color: stat.color.clone(),
                        tooltip: pie_tooltip(stat),
                    })
                    .collect(),
            },
            regional: RegionalChart {
                y_domain: REGIONAL_Y_DOMAIN,
                bars: bundle
                    .regional_comparison
                    .iter()
                    .map(|entry| Bar {
                        fill: bar_fill(entry),
                        glow: bar_glow(entry),
                        tick: flag_tick(entry),
                        label: plain_percent(entry.value),
                    })
                    .collect(),
            },
            cards: bundle
                .analyses()
                .into_iter()
                .map(|(section, analysis)| InfoCard::new(section, analysis))
                .collect(),
        }
    }
}

/// Replay counters; bumping one remounts that chart so its animation reruns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChartKeys {
    pub completion: u32,
    pub teacher: u32,
    pub regional: u32,
}

impl ChartKeys {
    pub fn bumped(self, section: Section) -> Self {
        let mut next = self;
        match section {
            Section::Completion => next.completion += 1,
            Section::Teacher => next.teacher += 1,
            Section::Regional => next.regional += 1,
        }
        next
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeepDiveEvent {
    Loaded(Box<DeepDiveBundle>),
    Replay(Section),
    OpenAnalysis(Section),
    CloseAnalysis,
}

/// Immutable snapshot of the deep dive section. Each event yields a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeepDiveView {
    pub bundle: Option<DeepDiveBundle>,
    pub chart_keys: ChartKeys,
    pub active_analysis: Option<Section>,
}

impl DeepDiveView {
    pub fn is_loading(&self) -> bool {
        self.bundle.is_none()
    }

    pub fn apply(self, event: DeepDiveEvent) -> Self {
        match event {
            DeepDiveEvent::Loaded(bundle) => Self {
                bundle: Some(*bundle),
                ..self
            },
            DeepDiveEvent::Replay(section) => Self {
                chart_keys: self.chart_keys.bumped(section),
                ..self
            },
            // the modal needs data behind it
            DeepDiveEvent::OpenAnalysis(section) if self.bundle.is_some() => Self {
                active_analysis: Some(section),
                ..self
            },
            DeepDiveEvent::OpenAnalysis(_) => self,
            DeepDiveEvent::CloseAnalysis => Self {
                active_analysis: None,
                ..self
            },
        }
    }

    pub fn active_analysis(&self) -> Option<&AnalysisRecord> {
        let section = self.active_analysis?;
        self.bundle.as_ref().map(|bundle| bundle.analysis(section))
    }
}
