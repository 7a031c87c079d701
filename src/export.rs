use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use crate::models::{DeepDiveBundle, EducationTrendPoint, RegionalComparisonEntry, TeacherStat};

pub fn write_rows<W, T>(writer: W, rows: &[T]) -> anyhow::Result<usize>
where
    W: io::Write,
    T: Serialize,
{
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(rows.len())
}

fn write_file<T: Serialize>(path: &Path, rows: &[T]) -> anyhow::Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_rows(file, rows).with_context(|| format!("failed to write {}", path.display()))
}

pub fn export_trends_csv(path: &Path, trends: &[EducationTrendPoint]) -> anyhow::Result<usize> {
    write_file(path, trends)
}

pub fn export_teacher_csv(path: &Path, stats: &[TeacherStat]) -> anyhow::Result<usize> {
    write_file(path, stats)
}

pub fn export_regional_csv(
    path: &Path,
    entries: &[RegionalComparisonEntry],
) -> anyhow::Result<usize> {
    write_file(path, entries)
}

/// Writes the three datasets into `dir`, returning the files written.
pub fn export_bundle(dir: &Path, bundle: &DeepDiveBundle) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let trends = dir.join("education_trends.csv");
    let teachers = dir.join("teacher_stats.csv");
    let regional = dir.join("regional_comparison.csv");

    let rows = export_trends_csv(&trends, &bundle.education_trends)?;
    tracing::info!(rows, path = %trends.display(), "exported trends");
    let rows = export_teacher_csv(&teachers, &bundle.teacher_stats)?;
    tracing::info!(rows, path = %teachers.display(), "exported teacher split");
    let rows = export_regional_csv(&regional, &bundle.regional_comparison)?;
    tracing::info!(rows, path = %regional.display(), "exported regional comparison");

    Ok(vec![trends, teachers, regional])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate_deep_dive_bundle, TrendParams};
    use crate::noise::ZeroNoise;

    fn bundle() -> DeepDiveBundle {
        generate_deep_dive_bundle(&TrendParams::default(), &mut ZeroNoise)
    }

    #[test]
    fn headers_use_view_field_names() {
        let mut buffer = Vec::new();
        let written = write_rows(&mut buffer, &bundle().regional_comparison).expect("csv");
        assert_eq!(written, 5);
        let text = String::from_utf8(buffer).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("country,code,value,isHighlight"));
        assert_eq!(lines.next(), Some("Singapore,sg,89.2,true"));
        assert_eq!(lines.last(), Some("Sri Lanka,lk,52.8,true"));
    }

    #[test]
    fn exports_three_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let files = export_bundle(dir.path(), &bundle()).expect("export");
        assert_eq!(files.len(), 3);

        let trends = std::fs::read_to_string(&files[0]).expect("read trends");
        assert!(trends.starts_with("year,primary,lowerSecondary,upperSecondary,isForecast\n"));
        assert_eq!(trends.lines().count(), 12);

        let teachers = std::fs::read_to_string(&files[1]).expect("read teachers");
        assert!(teachers.contains("Trained,88.0,#C5192D"));
    }

    #[test]
    fn trends_read_back_through_serde() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("trends.csv");
        export_trends_csv(&path, &bundle().education_trends).expect("export");

        let mut reader = csv::Reader::from_path(&path).expect("open");
        let points: Vec<EducationTrendPoint> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("rows");
        assert_eq!(points.len(), 11);
        assert_eq!(points[0].year, 2015);
        assert!(points[10].is_forecast);
    }
}
