use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

mod diagnostics;
mod error;
mod render;
mod report;
mod table;

use error::ReportError;
use render::{RenderConfig, Renderer, SaveRenderer, ShowRenderer};
use report::manifest::Manifest;
use report::{OutputMode, PlanOptions, Rendered, ReportKind, ReportRequest};

pub type Result<T> = anyhow::Result<T>;

const PROGRAM: &str = "report";

#[derive(Parser, Debug)]
#[command(name = "report")]
#[command(about = "Charts for JVM flight-recorder CSV exports", long_about = None)]
struct Cli {
    /// Report kind: cpu, gc, gc_hist (alias gcTime) or heap; add `_show` to display.
    kind: Option<String>,

    /// Input CSV files. Their order sets legend order and output names.
    files: Vec<PathBuf>,

    /// Directory for saved charts.
    #[arg(long, env = "REPORT_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Display charts instead of saving them, for any kind.
    #[arg(long)]
    show: bool,

    /// Viewer command for show mode (image path is appended).
    #[arg(long, env = "REPORT_VIEWER")]
    viewer: Option<String>,

    #[arg(long, default_value_t = 1024)]
    width: u32,

    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Appended to CPU chart names, e.g. `_cpu` gives `<stem>_cpu.png`.
    #[arg(long)]
    cpu_suffix: Option<String>,

    /// Write a JSON summary of the produced charts here.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn request(&self) -> std::result::Result<ReportRequest, ReportError> {
        let token = self
            .kind
            .as_deref()
            .ok_or_else(|| ReportError::InvalidMode(String::new()))?;
        let (kind, mode) = ReportKind::parse(token)?;
        let output = if self.show {
            OutputMode::Show
        } else {
            mode.unwrap_or(OutputMode::Save)
        };
        ReportRequest::new(kind, self.files.clone(), output)
    }

    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
        }
    }

    fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            cpu_suffix: self.cpu_suffix.clone().unwrap_or_default(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dispatch(&cli, &mut out, |request| {
        let config = cli.render_config();
        let renderer: Box<dyn Renderer> = match request.output() {
            OutputMode::Save => Box::new(SaveRenderer::new(&cli.out_dir, config)),
            OutputMode::Show => match cli.viewer.as_deref() {
                Some(viewer) => Box::new(ShowRenderer::new(viewer, config)?),
                None => Box::new(ShowRenderer::platform_default(config)),
            },
        };
        Ok(renderer)
    })?;
    Ok(())
}

/// One invocation: validate the request, run it, report what was written.
/// An unknown kind or a missing file list prints usage and produces nothing.
fn dispatch<F>(cli: &Cli, out: &mut dyn Write, make_renderer: F) -> Result<Vec<Rendered>>
where
    F: FnOnce(&ReportRequest) -> Result<Box<dyn Renderer>>,
{
    let request = match cli.request() {
        Ok(r) => r,
        Err(e) if e.is_usage() => {
            debug!("{}", e);
            write!(out, "{}", report::usage(PROGRAM))?;
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut renderer = make_renderer(&request)?;
    let rendered = report::run(&request, &cli.plan_options(), renderer.as_mut())
        .with_context(|| format!("{} report failed", request.kind()))?;

    if request.output() == OutputMode::Save {
        for r in &rendered {
            writeln!(out, "Wrote {}", r.path.display())?;
        }
    }

    if let Some(path) = &cli.manifest {
        Manifest::build(&request, &rendered).write(path)?;
        writeln!(out, "Wrote {}", path.display())?;
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingRenderer;
    use pretty_assertions::assert_eq;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["report"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn recording(_: &ReportRequest) -> Result<Box<dyn Renderer>> {
        Ok(Box::new(RecordingRenderer::default()))
    }

    fn never(_: &ReportRequest) -> Result<Box<dyn Renderer>> {
        panic!("no renderer may be built for a usage error")
    }

    #[test]
    fn unknown_kind_prints_usage_and_draws_nothing() {
        let mut out = Vec::new();
        let rendered = dispatch(&cli(&["bogus", "a.csv"]), &mut out, never).unwrap();
        assert!(rendered.is_empty());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Usage:"), "{}", text);
        assert!(text.contains("report gc "));
    }

    #[test]
    fn missing_files_or_kind_print_usage() {
        for args in [&["gc"][..], &[][..]] {
            let mut out = Vec::new();
            let rendered = dispatch(&cli(args), &mut out, never).unwrap();
            assert!(rendered.is_empty());
            assert!(String::from_utf8(out).unwrap().starts_with("Usage:"));
        }
    }

    #[test]
    fn show_suffix_and_flag_select_show_mode() {
        assert_eq!(
            cli(&["cpu_show", "a.csv"]).request().unwrap().output(),
            OutputMode::Show
        );
        assert_eq!(
            cli(&["--show", "gc", "a.csv"]).request().unwrap().output(),
            OutputMode::Show
        );
        assert_eq!(
            cli(&["gc", "a.csv"]).request().unwrap().output(),
            OutputMode::Save
        );
    }

    #[test]
    fn cpu_run_reports_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("run1.csv");
        std::fs::write(&input, "timestamp,user,system,total\n0,1,2,3\n1,4,5,9\n").unwrap();
        let manifest = dir.path().join("m.json");

        let args = cli(&[
            "cpu",
            input.to_str().unwrap(),
            "--cpu-suffix",
            "_cpu",
            "--manifest",
            manifest.to_str().unwrap(),
        ]);
        let mut out = Vec::new();
        let rendered = dispatch(&args, &mut out, recording).unwrap();

        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].artifact.file_name(), "run1_cpu.png");
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Wrote run1_cpu.png"), "{}", text);
        assert!(manifest.exists());
    }

    #[test]
    fn missing_input_file_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("nope.csv");
        let mut out = Vec::new();
        let err = dispatch(&cli(&["gc", absent.to_str().unwrap()]), &mut out, recording)
            .unwrap_err();
        let cause = err.downcast_ref::<ReportError>().unwrap();
        assert!(matches!(cause, ReportError::InputRead { .. }));
    }
}
