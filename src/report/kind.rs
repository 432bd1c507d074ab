//! Report kinds and the request a single invocation carries.

use crate::error::ReportError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Closed set of reports. Each decides which columns are required and
/// which charts come out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// CPU load samples, one chart per table.
    Cpu,
    /// GC summaries as five time-series overlays.
    Gc,
    /// GC summaries as a 50-bin histogram grid per table.
    GcHistogram,
    /// GC heap summaries (used/committed/duration) as overlays.
    Heap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    Save,
    Show,
}

const SHOW_SUFFIX: &str = "_show";

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Cpu,
        ReportKind::Gc,
        ReportKind::GcHistogram,
        ReportKind::Heap,
    ];

    pub fn token(self) -> &'static str {
        match self {
            ReportKind::Cpu => "cpu",
            ReportKind::Gc => "gc",
            ReportKind::GcHistogram => "gc_hist",
            ReportKind::Heap => "heap",
        }
    }

    /// Parse a command-line token. A `_show` suffix on any kind asks for
    /// interactive output; `gcTime` is the old name of the histogram mode.
    pub fn parse(token: &str) -> Result<(ReportKind, Option<OutputMode>), ReportError> {
        let (base, mode) = match token.strip_suffix(SHOW_SUFFIX) {
            Some(base) => (base, Some(OutputMode::Show)),
            None => (token, None),
        };
        let kind = match base {
            "cpu" => ReportKind::Cpu,
            "gc" => ReportKind::Gc,
            "gc_hist" | "gcTime" => ReportKind::GcHistogram,
            "heap" => ReportKind::Heap,
            _ => return Err(ReportError::InvalidMode(token.to_string())),
        };
        Ok((kind, mode))
    }

    fn usage_args(self) -> &'static str {
        match self {
            ReportKind::Cpu => "<file.csv> [file.csv ...]",
            ReportKind::Gc => "<file1.csv> [file2.csv ...]",
            ReportKind::GcHistogram => "<file.csv> [file.csv ...]",
            ReportKind::Heap => "<file1.csv> [file2.csv ...]",
        }
    }

    fn usage_effect(self) -> &'static str {
        match self {
            ReportKind::Cpu => "writes <stem>.png per file",
            ReportKind::Gc => "writes 5 overlay charts named <stem1>_<stem2>..._<metric>.png",
            ReportKind::GcHistogram => "writes <stem>_hist.png per file",
            ReportKind::Heap => "writes 3 overlay charts named <stem1>_<stem2>..._<metric>.png",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Usage text listing every valid invocation.
pub fn usage(program: &str) -> String {
    let mut out = String::from("Usage:\n");
    for kind in ReportKind::ALL {
        out.push_str(&format!(
            "  {} {} {:<28} -> {}\n",
            program,
            kind.token(),
            kind.usage_args(),
            kind.usage_effect()
        ));
        out.push_str(&format!(
            "  {} {}{} {:<28} -> displays interactively\n",
            program,
            kind.token(),
            SHOW_SUFFIX,
            kind.usage_args()
        ));
    }
    out.push_str("\n'gcTime' is accepted as an alias for 'gc_hist'.\n");
    out
}

/// One report over an ordered, non-empty list of input files.
/// A single-table report is the length-1 case.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    kind: ReportKind,
    sources: Vec<PathBuf>,
    output: OutputMode,
}

impl ReportRequest {
    pub fn new(
        kind: ReportKind,
        sources: Vec<PathBuf>,
        output: OutputMode,
    ) -> Result<Self, ReportError> {
        if sources.is_empty() {
            return Err(ReportError::MissingInput(kind.to_string()));
        }
        Ok(Self {
            kind,
            sources,
            output,
        })
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn output(&self) -> OutputMode {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_known_tokens() {
        assert_eq!(ReportKind::parse("cpu").unwrap(), (ReportKind::Cpu, None));
        assert_eq!(
            ReportKind::parse("cpu_show").unwrap(),
            (ReportKind::Cpu, Some(OutputMode::Show))
        );
        assert_eq!(ReportKind::parse("gc").unwrap(), (ReportKind::Gc, None));
        assert_eq!(
            ReportKind::parse("gcTime").unwrap(),
            (ReportKind::GcHistogram, None)
        );
        assert_eq!(
            ReportKind::parse("gc_hist_show").unwrap(),
            (ReportKind::GcHistogram, Some(OutputMode::Show))
        );
        assert_eq!(ReportKind::parse("heap").unwrap(), (ReportKind::Heap, None));
    }

    #[test]
    fn rejects_unknown_tokens() {
        for token in ["bogus", "", "_show", "CPU", "gc_shows", "show"] {
            let err = ReportKind::parse(token).unwrap_err();
            assert!(matches!(err, ReportError::InvalidMode(ref t) if t == token));
            assert!(err.is_usage());
        }
    }

    #[test]
    fn every_token_round_trips() {
        for kind in ReportKind::ALL {
            assert_eq!(ReportKind::parse(kind.token()).unwrap(), (kind, None));
        }
    }

    #[test]
    fn usage_lists_every_kind() {
        let text = usage("report");
        for kind in ReportKind::ALL {
            assert!(text.contains(&format!("report {} ", kind.token())), "{}", text);
            assert!(text.contains(&format!("report {}_show ", kind.token())));
        }
    }

    #[test]
    fn request_needs_a_source() {
        let err = ReportRequest::new(ReportKind::Gc, vec![], OutputMode::Save).unwrap_err();
        assert!(matches!(err, ReportError::MissingInput(_)));
        assert!(err.is_usage());
    }
}
