//! Report rendering

use std::io::Write;

use clap::ValueEnum;
use color_eyre::Result;
use repocheck_core::CheckReport;

/// How the report is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Advisory lines only; nothing when all is well
    Text,
    /// A single JSON object describing the full report
    Json,
}

/// Write `report` in `format`
pub fn write_report(out: &mut impl Write, report: &CheckReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for line in &report.advisory {
                writeln!(out, "{line}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use repocheck_core::CheckOutcome;
    use repocheck_pkg::BackendKind;

    fn render(report: &CheckReport, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, report, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_is_empty_when_silent() {
        let report = CheckReport::new("GitLab", None, None, CheckOutcome::NoBackend);
        assert_eq!(render(&report, OutputFormat::Text), "");
    }

    #[test]
    fn test_text_prints_advisory_lines() {
        let report = CheckReport::new(
            "GitLab",
            Some(BackendKind::Apt),
            None,
            CheckOutcome::ManualInstall,
        );

        let text = render(&report, OutputFormat::Text);
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("GitLab has determined that you have manually installed GitLab"));
    }

    #[test]
    fn test_json_is_one_line() {
        let report = CheckReport::new(
            "GitLab",
            Some(BackendKind::Zypper),
            None,
            CheckOutcome::ManualInstall,
        );

        let json = render(&report, OutputFormat::Json);
        assert_eq!(json.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["backend"], "zypper");
        assert_eq!(value["outcome"], "manual_install");
        assert_eq!(value["advisory"].as_array().unwrap().len(), 2);
    }
}
