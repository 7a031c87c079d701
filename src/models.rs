use serde::{Deserialize, Serialize};

/// One year of completion rates for the three education levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationTrendPoint {
    pub year: i32,
    pub primary: f64,
    pub lower_secondary: f64,
    pub upper_secondary: f64,
    pub is_forecast: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherStat {
    pub name: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalComparisonEntry {
    pub country: String,
    pub code: String,
    pub value: f64,
    pub is_highlight: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub title: String,
    pub summary: String,
    pub full_text: String,
    pub sources: Vec<SourceRef>,
}

impl AnalysisRecord {
    /// Paragraphs of the long text, trimmed, blank separators dropped.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.full_text
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Everything the deep dive section renders, built once per page load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepDiveBundle {
    pub education_trends: Vec<EducationTrendPoint>,
    pub completion_analysis: AnalysisRecord,
    pub teacher_stats: Vec<TeacherStat>,
    pub teacher_analysis: AnalysisRecord,
    pub regional_comparison: Vec<RegionalComparisonEntry>,
    pub regional_analysis: AnalysisRecord,
}

impl DeepDiveBundle {
    pub fn analysis(&self, section: Section) -> &AnalysisRecord {
        match section {
            Section::Completion => &self.completion_analysis,
            Section::Teacher => &self.teacher_analysis,
            Section::Regional => &self.regional_analysis,
        }
    }

    pub fn analyses(&self) -> [(Section, &AnalysisRecord); 3] {
        [
            (Section::Completion, &self.completion_analysis),
            (Section::Teacher, &self.teacher_analysis),
            (Section::Regional, &self.regional_analysis),
        ]
    }

    pub fn teacher_stat(&self, name: &str) -> Option<&TeacherStat> {
        self.teacher_stats.iter().find(|stat| stat.name == name)
    }

    pub fn country(&self, name: &str) -> Option<&RegionalComparisonEntry> {
        self.regional_comparison
            .iter()
            .find(|entry| entry.country == name)
    }
}

/// The three charts of the deep dive, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Completion,
    Teacher,
    Regional,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Section::Completion => "completion",
            Section::Teacher => "teacher",
            Section::Regional => "regional",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryData {
    pub name: String,
    pub code: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorTrend {
    pub name: String,
    pub series: Vec<YearValue>,
}

/// Snapshot of a single SDG indicator for the map and trend views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorData {
    pub id: String,
    pub name: String,
    pub data: Vec<CountryData>,
    pub trends: Vec<IndicatorTrend>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStory {
    pub problem: &'static str,
    pub solution: &'static str,
    pub impact: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub slug: &'static str,
    pub title: &'static str,
    pub year: i32,
    pub location: &'static str,
    pub thumbnail: &'static str,
    pub description: &'static str,
    pub impact_metrics: &'static [&'static str],
    /// `[latitude, longitude]`
    pub coordinates: [f64; 2],
    pub full_description: ProjectStory,
}

impl Project {
    pub fn latitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalStats {
    pub targets: u32,
    pub events: u32,
    pub publications: u32,
    pub actions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SdgGoal {
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub targets: &'static [&'static str],
    pub image: &'static str,
    /// 2030 projection score, 0-100.
    pub progress: u8,
    pub stats: GoalStats,
}
