use anyhow::{Context, Result};
use chrono::Local;
use csv::Writer;
use serde_json::to_string_pretty;
use std::fs;
use std::path::{Path, PathBuf};

use crate::compatibility::CompatibilityReport;
use crate::fallback::DISTRIBUTION;

/// Supported report formats
#[derive(Debug, Clone, Copy)]
pub enum ReportFormat {
    Text,
    Csv,
    Json,
    All,
}

/// Writes compatibility reports to an output directory
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: &Path) -> Result<Self> {
        if !output_dir.exists() {
            fs::create_dir_all(output_dir).with_context(|| {
                format!("Failed to create output directory: {}", output_dir.display())
            })?;
        }

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Generate the compatibility report in the specified format(s)
    pub fn generate(&self, report: &CompatibilityReport, format: ReportFormat) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        match format {
            ReportFormat::Text => written.push(self.generate_text_report(report)?),
            ReportFormat::Csv => written.push(self.generate_csv_report(report)?),
            ReportFormat::Json => written.push(self.generate_json_report(report)?),
            ReportFormat::All => {
                written.push(self.generate_text_report(report)?);
                written.push(self.generate_csv_report(report)?);
                written.push(self.generate_json_report(report)?);
            }
        }

        Ok(written)
    }

    fn report_path(&self, extension: &str) -> PathBuf {
        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        self.output_dir
            .join(format!("compatibility_{}.{}", timestamp, extension))
    }

    fn generate_json_report(&self, report: &CompatibilityReport) -> Result<PathBuf> {
        let path = self.report_path("json");
        let json = to_string_pretty(report)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write JSON report to {}", path.display()))?;
        Ok(path)
    }

    fn generate_csv_report(&self, report: &CompatibilityReport) -> Result<PathBuf> {
        let path = self.report_path("csv");
        let mut writer = Writer::from_path(&path)
            .with_context(|| format!("Failed to write CSV report to {}", path.display()))?;

        writer.write_record([
            "blood_type",
            "receives_from",
            "donates_to",
            "donor_count",
            "universal_recipient",
            "description",
        ])?;

        for record in &report.records {
            let receives = join_types(&record.receives_from);
            let donates = join_types(&record.donates_to);
            let donor_count = record.summary.donor_count.to_string();
            let universal = record.summary.is_universal_recipient.to_string();
            writer.write_record([
                record.blood_type.as_str(),
                receives.as_str(),
                donates.as_str(),
                donor_count.as_str(),
                universal.as_str(),
                record.summary.description.as_str(),
            ])?;
        }

        writer.flush()?;
        Ok(path)
    }

    fn generate_text_report(&self, report: &CompatibilityReport) -> Result<PathBuf> {
        let path = self.report_path("txt");
        let content = render_text_report(report);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write text report to {}", path.display()))?;
        Ok(path)
    }
}

fn join_types(types: &[crate::types::BloodType]) -> String {
    types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the compatibility matrix as plain text, also used by the CLI
pub fn render_text_report(report: &CompatibilityReport) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let mut out = String::new();

    out.push_str("Blood Type Compatibility Report\n");
    out.push_str(&format!("Generated on: {}\n\n", timestamp));
    out.push_str(&format!(
        "{:<6} {:<34} {:<34}\n",
        "Type", "Receives from", "Donates to"
    ));

    for record in &report.records {
        out.push_str(&format!(
            "{:<6} {:<34} {:<34}\n",
            record.blood_type.as_str(),
            join_types(&record.receives_from),
            join_types(&record.donates_to),
        ));
    }

    out.push_str("\nPopulation distribution:\n");
    for entry in DISTRIBUTION.iter() {
        out.push_str(&format!(
            "  {:<4} {:>5.1}%\n",
            entry.blood_type.as_str(),
            entry.percentage
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reports_are_written_to_disk() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let generator = ReportGenerator::new(temp_dir.path())?;
        let report = CompatibilityReport::build();

        let written = generator.generate(&report, ReportFormat::All)?;
        assert_eq!(written.len(), 3);
        for path in &written {
            assert!(path.exists());
            assert!(fs::metadata(path)?.len() > 0);
        }

        Ok(())
    }

    #[test]
    fn test_json_report_round_trips() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let generator = ReportGenerator::new(temp_dir.path())?;
        let report = CompatibilityReport::build();

        let written = generator.generate(&report, ReportFormat::Json)?;
        let content = fs::read_to_string(&written[0])?;
        let parsed: CompatibilityReport = serde_json::from_str(&content)?;
        assert_eq!(parsed.records.len(), report.records.len());

        Ok(())
    }

    #[test]
    fn test_text_report_lists_every_type() {
        let rendered = render_text_report(&CompatibilityReport::build());
        for blood_type in crate::types::BloodType::ALL {
            assert!(rendered.contains(blood_type.as_str()));
        }
    }

    #[test]
    fn test_output_directory_is_created() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let nested = temp_dir.path().join("reports").join("nested");
        let _generator = ReportGenerator::new(&nested)?;
        assert!(nested.exists());
        Ok(())
    }
}
