use std::io::Write;

use message_report_model::MessageReport;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{Render, RenderError};

#[derive(Tabled)]
struct SummaryRow {
    file: String,
    version: String,
    revision: i64,
    platform: String,
    hostname: String,
    precision: String,
    cpus: i64,
    #[tabled(rename = "normal termination")]
    normal_termination: bool,
    #[tabled(rename = "elapsed (s)")]
    #[tabled(display = "float2")]
    elapsed_time: f64,
    #[tabled(rename = "cpu total (s)")]
    #[tabled(display = "float2")]
    cpu_total: f64,
    #[tabled(rename = "clock total (s)")]
    #[tabled(display = "float2")]
    clock_total: f64,
}

#[derive(Tabled)]
struct PhaseRow {
    file: String,
    parent: String,
    phase: String,
    #[tabled(rename = "cpu (s)")]
    #[tabled(display = "float2")]
    cpu_seconds: f64,
    #[tabled(rename = "cpu %")]
    #[tabled(display = "float2")]
    cpu_percent: f64,
    #[tabled(rename = "clock (s)")]
    #[tabled(display = "float2")]
    clock_seconds: f64,
    #[tabled(rename = "clock %")]
    #[tabled(display = "float2")]
    clock_percent: f64,
}

fn float2(n: &f64) -> String {
    format!("{:.2}", n)
}

/// Renders one table row per message file.
pub struct SummaryTableRenderer<W> {
    writer: W,
}

impl<W> SummaryTableRenderer<W>
where
    W: Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W> Render for SummaryTableRenderer<W>
where
    W: Write,
{
    type Error = RenderError;

    fn render(&mut self, reports: &[MessageReport]) -> Result<(), Self::Error> {
        let rows = reports.iter().map(|report| SummaryRow {
            file: report.file.clone(),
            version: report.version.clone(),
            revision: report.revision,
            platform: report.platform.clone(),
            hostname: report.hostname.clone(),
            precision: report.precision.clone(),
            cpus: report.num_cpus,
            normal_termination: report.normal_termination,
            elapsed_time: report.elapsed_time,
            cpu_total: report.total_cpu_seconds(),
            clock_total: report.total_clock_seconds(),
        });

        let mut table = Table::new(rows);
        table.with(Style::modern());
        writeln!(self.writer, "{table}")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Renders one table row per phase, sub-phases following their parent.
pub struct PhaseTableRenderer<W> {
    writer: W,
}

impl<W> PhaseTableRenderer<W>
where
    W: Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W> Render for PhaseTableRenderer<W>
where
    W: Write,
{
    type Error = RenderError;

    fn render(&mut self, reports: &[MessageReport]) -> Result<(), Self::Error> {
        let mut rows = Vec::new();
        for report in reports {
            for phase in &report.phases {
                rows.push(PhaseRow {
                    file: report.file.clone(),
                    parent: String::new(),
                    phase: phase.name.clone(),
                    cpu_seconds: phase.cpu_seconds,
                    cpu_percent: phase.cpu_percent,
                    clock_seconds: phase.clock_seconds,
                    clock_percent: phase.clock_percent,
                });
                rows.extend(phase.children.iter().map(|child| PhaseRow {
                    file: report.file.clone(),
                    parent: phase.name.clone(),
                    phase: child.name.clone(),
                    cpu_seconds: child.cpu_seconds,
                    cpu_percent: child.cpu_percent,
                    clock_seconds: child.clock_seconds,
                    clock_percent: child.clock_percent,
                }));
            }
        }

        let mut table = Table::new(&rows);
        table.with(Style::modern());
        writeln!(self.writer, "{table}")?;
        self.writer.flush()?;
        Ok(())
    }
}
