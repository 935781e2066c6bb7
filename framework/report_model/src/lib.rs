use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufRead, Read, Write};
use std::path::PathBuf;

/// How the solver distributed its work, as announced by the version header.
///
/// This decides which line of the message file carries the CPU count. Shared memory runs report it
/// in the footer, distributed memory runs report it in the header.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunType {
    /// Shared memory parallel, a single process.
    Smp,
    /// Massively parallel, multiple processes.
    Mpp,
    /// No version header seen yet, or a version string naming neither kind of run.
    #[default]
    Unknown,
}

impl RunType {
    /// Classify a version string such as `smp d R9.3.0`.
    ///
    /// `smp` is checked before `mpp`. A version string containing neither yields
    /// [RunType::Unknown] and no CPU count rule applies to that run.
    pub fn from_version(version: &str) -> Self {
        if version.contains("smp") {
            RunType::Smp
        } else if version.contains("mpp") {
            RunType::Mpp
        } else {
            RunType::Unknown
        }
    }
}

impl fmt::Display for RunType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunType::Smp => write!(f, "smp"),
            RunType::Mpp => write!(f, "mpp"),
            RunType::Unknown => write!(f, "unknown"),
        }
    }
}

/// A named entry of the timing table of a message file.
///
/// Top level phases own their sub-phases through [Phase::children]. Sub-phases never have children
/// of their own.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Phase {
    /// The phase name with the dot fill removed
    pub name: String,
    /// CPU time spent in the phase, in seconds
    pub cpu_seconds: f64,
    /// Share of the total CPU time, in percent
    pub cpu_percent: f64,
    /// Wall clock time spent in the phase, in seconds
    pub clock_seconds: f64,
    /// Share of the total wall clock time, in percent
    pub clock_percent: f64,
    /// The sub-phases, in file order
    pub children: Vec<Phase>,
}

impl Phase {
    /// Create a phase without children
    pub fn new(
        name: impl Into<String>,
        cpu_seconds: f64,
        cpu_percent: f64,
        clock_seconds: f64,
        clock_percent: f64,
    ) -> Self {
        Self {
            name: name.into(),
            cpu_seconds,
            cpu_percent,
            clock_seconds,
            clock_percent,
            children: Vec::new(),
        }
    }

    /// Append a sub-phase
    pub fn add_child(&mut self, child: Phase) {
        self.children.push(child);
    }

    /// Find a sub-phase by name
    pub fn child(&self, name: &str) -> Option<&Phase> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Everything extracted from a single solver message file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageReport {
    /// The path of the message file, formatted as requested by the caller
    pub file: String,
    /// The solver version string, e.g. `smp d R9.3.0`
    pub version: String,
    /// The build date that follows the version
    pub date: String,
    /// The solver revision number
    pub revision: i64,
    /// The build time that follows the revision
    pub time: String,
    pub licensed_to: String,
    pub issued_by: String,
    pub platform: String,
    pub os: String,
    pub compiler: String,
    pub hostname: String,
    /// The numeric precision label, e.g. `Single precision (I4R4)`
    pub precision: String,
    /// The internal build number, reported as `SVN Version`
    pub build_number: i64,
    /// The input deck path as written by the solver
    pub input_file: String,
    /// The number of CPUs used by the run
    ///
    /// Taken from the footer for [RunType::Smp] runs and from the header for [RunType::Mpp] runs.
    /// Stays at zero for [RunType::Unknown] runs.
    pub num_cpus: i64,
    /// Whether the solver announced a normal termination
    pub normal_termination: bool,
    /// The elapsed wall clock time of the run, in seconds
    pub elapsed_time: f64,
    /// The classification derived from [MessageReport::version]
    pub run_type: RunType,
    /// The top level phases of the timing table, in file order
    pub phases: Vec<Phase>,
}

impl MessageReport {
    /// Create an empty report for the given file
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    /// Set the version string and classify the run from it
    pub fn set_version(&mut self, version: String) {
        self.run_type = RunType::from_version(&version);
        self.version = version;
    }

    /// Append a top level phase and return its index in [MessageReport::phases]
    pub fn add_phase(&mut self, phase: Phase) -> usize {
        self.phases.push(phase);
        self.phases.len() - 1
    }

    /// Find a top level phase by name
    pub fn phase(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|phase| phase.name == name)
    }

    /// Sum of the CPU seconds of the top level phases
    pub fn total_cpu_seconds(&self) -> f64 {
        self.phases.iter().map(|phase| phase.cpu_seconds).sum()
    }

    /// Sum of the wall clock seconds of the top level phases
    pub fn total_clock_seconds(&self) -> f64 {
        self.phases.iter().map(|phase| phase.clock_seconds).sum()
    }
}

/// Append the report to a file
///
/// The report will be serialized to JSON and output as a single line followed by a newline. The
/// recommended file extension is `.jsonl`.
pub fn append_report(report: &MessageReport, path: PathBuf) -> anyhow::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;
    store_report(report, &mut file)?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Serialize the report to a writer
pub fn store_report<W: Write>(report: &MessageReport, writer: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer(writer, report)?;
    Ok(())
}

/// Load a single report from a reader
pub fn load_report<R: Read>(reader: R) -> anyhow::Result<MessageReport> {
    let reader = std::io::BufReader::new(reader);
    let report: MessageReport = serde_json::from_reader(reader)?;
    Ok(report)
}

/// Load reports from a file
///
/// The file should contain one JSON object per line. This is the format produced by
/// [append_report]. Blank lines are ignored.
pub fn load_reports(path: PathBuf) -> anyhow::Result<Vec<MessageReport>> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let mut reports = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let report: MessageReport = serde_json::from_str(&line)?;
        reports.push(report);
    }
    Ok(reports)
}
