use crate::core::Severity;
use crate::report::ReportEntry;
use colored::*;
use std::io::Write;

#[derive(Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, entries: &[ReportEntry]) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, entries: &[ReportEntry]) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, entries: &[ReportEntry]) -> anyhow::Result<()> {
        self.write_header()?;
        self.write_summary(entries)?;
        self.write_entries(entries)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_header(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Migration Blocker Report".bold().blue())?;
        writeln!(self.writer, "{}", "========================".blue())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, entries: &[ReportEntry]) -> anyhow::Result<()> {
        writeln!(self.writer, "Findings: {}", entries.len())?;
        for severity in [
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
            Severity::Unknown,
        ] {
            let count = entries.iter().filter(|e| e.severity == severity).count();
            if count > 0 {
                writeln!(self.writer, "  {}: {}", paint_severity(severity), count)?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_entries(&mut self, entries: &[ReportEntry]) -> anyhow::Result<()> {
        for entry in entries {
            writeln!(
                self.writer,
                "{} {} [{}]",
                paint_severity(entry.severity),
                entry.file_path,
                entry.rule_id
            )?;
            writeln!(self.writer, "    {}", entry.message)?;
            if let Some(first) = entry
                .suggestion
                .as_ref()
                .and_then(|bundle| bundle.refactor.first())
            {
                writeln!(self.writer, "    fix: {first}")?;
            }
        }
        Ok(())
    }
}

fn paint_severity(severity: Severity) -> ColoredString {
    let label = severity.to_string();
    match severity {
        Severity::Critical => label.red().bold(),
        Severity::High => label.red(),
        Severity::Medium => label.yellow(),
        Severity::Low => label.green(),
        Severity::Unknown => label.dimmed(),
    }
}

pub fn create_writer(format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(std::io::stdout())),
    }
}

pub fn render_report(format: OutputFormat, entries: &[ReportEntry]) -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    match format {
        OutputFormat::Json => JsonWriter::new(&mut buffer).write_report(entries)?,
        OutputFormat::Terminal => TerminalWriter::new(&mut buffer).write_report(entries)?,
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SmellKind;
    use serde_json::Value;

    fn sample_entry(file: &str, severity: Severity) -> ReportEntry {
        ReportEntry {
            file_path: file.to_string(),
            rule_id: SmellKind::DirectDomAccess,
            severity,
            message: "2 direct DOM accesses (2 native, 0 angular.element)".to_string(),
            custom_metrics: serde_json::json!({"issue": "direct-dom-access"}),
            suggestion: None,
        }
    }

    #[test]
    fn json_writer_emits_a_parseable_array() {
        let entries = vec![
            sample_entry("a.js", Severity::Critical),
            sample_entry("b.js", Severity::Low),
        ];
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_report(&entries).unwrap();

        let parsed: Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["filePath"], "a.js");
        assert_eq!(parsed[0]["severity"], "CRITICAL");
    }

    #[test]
    fn terminal_writer_lists_counts_and_entries() {
        colored::control::set_override(false);
        let entries = vec![
            sample_entry("app/main.js", Severity::Critical),
            sample_entry("app/other.js", Severity::Critical),
        ];
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_report(&entries)
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Findings: 2"));
        assert!(text.contains("CRITICAL: 2"));
        assert!(text.contains("app/main.js [direct-dom-access]"));
    }

    #[test]
    fn empty_report_still_renders_a_summary() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer).write_report(&[]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Findings: 0"));
    }

    #[test]
    fn rendered_report_matches_the_streaming_writer() {
        let entries = vec![
            sample_entry("a.js", Severity::Critical),
            sample_entry("b.js", Severity::Low),
        ];
        let rendered = render_report(OutputFormat::Json, &entries).unwrap();

        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_report(&entries).unwrap();
        assert_eq!(rendered.as_bytes(), buffer.as_slice());
    }
}
