use once_cell::sync::Lazy;
use regex::Regex;

use message_report_model::{MessageReport, RunType};

use crate::columns::Columns;

/// The elapsed time line is free format, e.g.
/// ` Elapsed time     194 seconds for   12345 cycles using  4 SMP threads`
static ELAPSED_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ Elapsed time\s*(\d+)\s*seconds")
        .expect("valid elapsed time regex")
});

/// A line of the message file footer, following the timing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterField {
    SmpCpus,
    NormalTermination,
    ElapsedTime,
}

impl FooterField {
    pub const ALL: [FooterField; 3] = [
        FooterField::SmpCpus,
        FooterField::NormalTermination,
        FooterField::ElapsedTime,
    ];

    /// The prefix that identifies the field's line
    pub fn label(&self) -> &'static str {
        match self {
            FooterField::SmpCpus => " Number of CPU's",
            FooterField::NormalTermination => " N o r m a l    t e r m i n a t i o n",
            FooterField::ElapsedTime => " Elapsed time",
        }
    }

    /// Find the field carried by `line`, if any.
    ///
    /// The CPU count line is only recognized for [RunType::Smp] runs.
    pub fn recognize(line: &str, run_type: RunType) -> Option<FooterField> {
        Self::ALL.into_iter().find(|field| match field {
            FooterField::SmpCpus => run_type == RunType::Smp && line.starts_with(field.label()),
            _ => line.starts_with(field.label()),
        })
    }

    /// Extract the field from its line into `report`
    pub fn apply(&self, line: &str, report: &mut MessageReport) {
        match self {
            FooterField::SmpCpus => report.num_cpus = Columns::new(line).int(16..21),
            FooterField::NormalTermination => report.normal_termination = true,
            FooterField::ElapsedTime => match parse_elapsed_seconds(line) {
                Some(seconds) => report.elapsed_time = seconds,
                None => trace!("Elapsed time line without a second count: {line:?}"),
            },
        }
    }
}

/// The whole seconds announced by an elapsed time line
fn parse_elapsed_seconds(line: &str) -> Option<f64> {
    ELAPSED_TIME_REGEX
        .captures(line)
        .and_then(|captures| captures.get(1))
        .and_then(|seconds| seconds.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parse_elapsed_seconds() {
        let cases = [
            (" Elapsed time 123 seconds", Some(123.0)),
            (" Elapsed time    45  seconds ", Some(45.0)),
            (" Elapsed time 12.5 seconds", None),
            (" Elapsed time unknown", None),
        ];
        for (line, expected) in cases {
            assert_eq!(parse_elapsed_seconds(line), expected, "{line}");
        }

        let line = " Elapsed time     194 seconds for   12345 cycles using  4 SMP threads";
        assert_eq!(parse_elapsed_seconds(line), Some(194.0));
    }

    #[test]
    fn test_should_keep_elapsed_time_when_pattern_does_not_match() {
        let mut report = MessageReport {
            elapsed_time: 7.0,
            ..Default::default()
        };
        FooterField::ElapsedTime.apply(" Elapsed time n/a", &mut report);
        assert_eq!(report.elapsed_time, 7.0);
    }

    #[test]
    fn test_should_gate_cpu_count_on_smp() {
        let line = " Number of CPU's    4";
        assert_eq!(
            FooterField::recognize(line, RunType::Smp),
            Some(FooterField::SmpCpus)
        );
        assert_eq!(FooterField::recognize(line, RunType::Mpp), None);
        assert_eq!(FooterField::recognize(line, RunType::Unknown), None);

        let mut report = MessageReport::default();
        FooterField::SmpCpus.apply(line, &mut report);
        assert_eq!(report.num_cpus, 4);
    }

    #[test]
    fn test_should_recognize_normal_termination() {
        let line = " N o r m a l    t e r m i n a t i o n                   12/14/18 15:47:01";
        assert_eq!(
            FooterField::recognize(line, RunType::Unknown),
            Some(FooterField::NormalTermination)
        );
        let plain = " Normal termination";
        assert_eq!(FooterField::recognize(plain, RunType::Smp), None);
    }
}
