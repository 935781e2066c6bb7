use std::path::{Path, PathBuf};
use std::sync::Arc;

use message_parser::{
    discover_message_files, BatchParser, MessageReader, PathFormat, Phase, RunType,
    WriterErrorSink,
};
use pretty_assertions::assert_eq;

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture(name: &str) -> PathBuf {
    Path::new(FIXTURES).join(name)
}

#[test]
fn smp_message_file() {
    let report = MessageReader::default()
        .read_from_file(fixture("smp/messag"))
        .expect("Failed to parse smp message file");

    assert_eq!(report.file, fixture("smp/messag").display().to_string());
    assert_eq!(report.version, "smp d R9.3.0");
    assert_eq!(report.date, "Date: 12/14/2018");
    assert_eq!(report.revision, 140922);
    assert_eq!(report.time, "Time: 15:44:15");
    assert_eq!(report.licensed_to, "Acme Engineering");
    assert_eq!(report.issued_by, "licadmin");
    assert_eq!(report.platform, "Xeon64 System");
    assert_eq!(report.os, "Linux CentOS 7.6 uum");
    assert_eq!(report.compiler, "Intel Fortran XE 2011 SSE2");
    assert_eq!(report.hostname, "node01");
    assert_eq!(report.precision, "Single precision (I4R4)");
    assert_eq!(report.build_number, 140922);
    assert_eq!(report.input_file, "/scratch/crash/main.k");
    assert_eq!(report.run_type, RunType::Smp);
    assert_eq!(report.num_cpus, 4);
    assert!(report.normal_termination);
    assert_eq!(report.elapsed_time, 33.0);

    let names = report
        .phases
        .iter()
        .map(|phase| (phase.name.as_str(), phase.children.len()))
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            ("Keyword Processing", 2),
            ("MPP Decomposition", 0),
            ("Init Proc", 1),
            ("Element processing", 2),
            ("Binary databases", 0),
            ("ASCII database", 0),
            ("Contact algorithm", 2),
            ("Misc. 1", 0),
        ]
    );

    let element = report.phase("Element processing").unwrap();
    assert_eq!(element.cpu_seconds, 20.0);
    assert_eq!(element.cpu_percent, 62.5);
    assert_eq!(element.clock_seconds, 20.5);
    assert_eq!(element.clock_percent, 62.12);
    assert_eq!(
        element.children,
        vec![
            Phase::new("Solids", 12.0, 37.5, 12.25, 37.12),
            Phase::new("Shells", 7.0, 21.88, 7.25, 21.97),
        ]
    );

    let contact = report.phase("Contact algorithm").unwrap();
    assert!(contact.child("Interf. ID         2").is_some());
    let keyword = report.phase("Keyword Processing").unwrap();
    assert_eq!(keyword.clock_seconds, 0.1297);
    assert!(report.phase("T o t a l s").is_none());
}

#[test]
fn mpp_message_file() {
    let report = MessageReader::default()
        .read_from_file(fixture("mpp/mes0000"))
        .expect("Failed to parse mpp message file");

    assert_eq!(report.version, "mpp s R11.1.0");
    assert_eq!(report.run_type, RunType::Mpp);
    // from the header, the footer CPU line belongs to smp runs
    assert_eq!(report.num_cpus, 16);
    assert!(!report.normal_termination);
    assert_eq!(report.elapsed_time, 50.0);
    assert_eq!(report.phases.len(), 3);
    assert_eq!(
        report.phases[1].children,
        vec![Phase::new("Shells", 40.0, 80.0, 41.0, 82.0)]
    );
    assert_eq!(report.phases[2].clock_seconds, 8.75);
}

#[test]
fn truncated_message_file() {
    let report = MessageReader::default()
        .read_from_file(fixture("truncated/messag"))
        .expect("Failed to parse truncated message file");

    assert_eq!(report.hostname, "node01");
    // the closing rule is missing, so the first row was taken for a column title and the sub-phases
    // that follow it have no parent
    let names = report
        .phases
        .iter()
        .map(|phase| phase.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["MPP Decomposition", "Init Proc"]);
    assert!(report.phases.iter().all(|phase| phase.is_leaf()));
    assert_eq!(report.num_cpus, 0);
    assert!(!report.normal_termination);
    assert_eq!(report.elapsed_time, 0.0);
}

#[test]
fn relative_paths_in_batch() {
    let sink = Arc::new(WriterErrorSink::new(Vec::new()));
    let batch = BatchParser::new(
        MessageReader::new(PathFormat::RelativeTo(PathBuf::from(FIXTURES))),
        sink.clone(),
    );

    let files = discover_message_files([Path::new(FIXTURES)]);
    let reports = batch.parse_files(files);

    let files = reports
        .iter()
        .map(|report| report.file.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        files,
        vec![
            Path::new("mpp").join("mes0000").display().to_string(),
            Path::new("smp").join("messag").display().to_string(),
            Path::new("truncated").join("messag").display().to_string(),
        ]
    );
    assert_eq!(sink.reported(), 0);
}

#[test]
fn missing_file_does_not_stop_batch() {
    let sink = Arc::new(WriterErrorSink::new(Vec::new()));
    let batch = BatchParser::new(MessageReader::default(), sink.clone());

    let reports = batch.parse_files(vec![
        fixture("smp/messag"),
        fixture("does-not-exist/messag"),
        fixture("mpp/mes0000"),
    ]);

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].run_type, RunType::Mpp);
    assert_eq!(reports[1].run_type, RunType::Smp);
    assert_eq!(sink.reported(), 1);
}
