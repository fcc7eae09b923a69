//! analyze-sketch - Locate the nodes of a sketch on document pages
//!
//! Reads JSON page content and a JSON sketch, analyzes the selected pages
//! and prints the report as JSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use dossier_core::geometry::{Length, LengthFormat, LengthUnit};
use dossier_core::{AnalyzeOptions, CancelToken, Document, PageRange, Sketch};

/// Locate the nodes of a sketch on document pages.
#[derive(Parser, Debug)]
#[command(name = "analyze-sketch")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Page content in JSON format
    content: PathBuf,

    /// Sketch in JSON format
    sketch: PathBuf,

    /// Pages to analyze, e.g. "3", "1-4", "2-" or "last"
    #[arg(long, default_value_t = PageRange::ALL)]
    pages: PageRange,

    /// The maximum number of pages to analyze (0 = no limit)
    #[arg(short = 'm', long = "max-pages", default_value = "0")]
    max_pages: usize,

    /// Unit of lengths in the report
    #[arg(short = 'u', long, default_value = "mm")]
    unit: LengthUnit,

    /// Round lengths to the nearest multiple, e.g. "0.1mm"
    #[arg(long)]
    nearest: Option<Length>,

    /// Number of pages analyzed concurrently (default: available parallelism)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Abort analysis after this many seconds
    #[arg(long = "timeout-secs")]
    timeout_secs: Option<u64>,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

/// Caps `range` to at most `max_pages` pages starting at its lower end.
fn limit_range(range: PageRange, max_pages: usize) -> Result<PageRange> {
    if max_pages == 0 || range.lower() == PageRange::LAST {
        return Ok(range);
    }

    let upper = range
        .upper()
        .min(range.lower().saturating_add(max_pages - 1));

    Ok(PageRange::new(range.lower(), upper)?)
}

fn run(args: &Args) -> Result<()> {
    let sketch = Sketch::from_path(&args.sketch)
        .with_context(|| format!("loading sketch {}", args.sketch.display()))?;

    let document = Document::open_json(&args.content);

    let mut cancel = CancelToken::new();
    if let Some(secs) = args.timeout_secs {
        cancel = cancel.with_timeout(Duration::from_secs(secs));
    }

    let mut options = AnalyzeOptions::new().cancel(cancel);
    if let Some(threads) = args.threads {
        options = options.threads(threads);
    }

    document
        .validate(options.cancel_token())
        .context("validating document")?;

    let range = limit_range(args.pages, args.max_pages)?;

    let report = sketch
        .analyze_document(&document, range, &options)
        .with_context(|| format!("analyzing {}", args.content.display()))?;

    let format = match args.nearest {
        Some(nearest) => LengthFormat::rounded(args.unit, nearest),
        None => LengthFormat::new(args.unit),
    };

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("creating output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    serde_json::to_writer_pretty(&mut output, &report.to_output(&format))?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.debug { "debug" } else { "warn" }),
    )
    .init();

    run(&args)
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    #[test]
    fn test_limit_range() {
        let range: PageRange = "2-".parse().unwrap();
        assert_eq!(limit_range(range, 0).unwrap(), range);
        assert_eq!(limit_range(range, 3).unwrap(), PageRange::new(2, 4).unwrap());

        let short = PageRange::new(1, 2).unwrap();
        assert_eq!(limit_range(short, 10).unwrap(), short);

        let last: PageRange = "last".parse().unwrap();
        assert_eq!(limit_range(last, 1).unwrap(), last);
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "analyze-sketch",
            "content.json",
            "sketch.json",
            "--pages",
            "2-5",
            "--unit",
            "cm",
            "--nearest",
            "0.5mm",
            "-j",
            "2",
        ])
        .unwrap();

        assert_eq!(args.pages, PageRange::new(2, 5).unwrap());
        assert_eq!(args.unit, LengthUnit::Cm);
        assert_eq!(args.nearest, Some(Length::from_mm(0.5)));
        assert_eq!(args.threads, Some(2));
        assert!(!args.debug);
    }

    #[test]
    fn test_invalid_document_fails_before_analysis() {
        let dir = std::env::temp_dir();
        let content = dir.join(format!("analyze-sketch-content-{}.json", std::process::id()));
        let outfile = dir.join(format!("analyze-sketch-out-{}.json", std::process::id()));
        std::fs::write(&content, r#"{"pages": [{"number": 2, "width": 10, "height": 10}]}"#).unwrap();

        let sketch = concat!(env!("CARGO_MANIFEST_DIR"), "/../core/tests/fixtures/corners.sketch.json");
        let args = Args::try_parse_from([
            OsStr::new("analyze-sketch"),
            content.as_os_str(),
            OsStr::new(sketch),
            OsStr::new("-o"),
            outfile.as_os_str(),
        ])
        .unwrap();

        let err = run(&args).unwrap_err();
        std::fs::remove_file(&content).unwrap();

        let message = format!("{err:#}");
        assert!(message.starts_with("validating document: "), "{message}");
        assert!(message.contains("page 1 is missing"), "{message}");
        assert!(!outfile.exists());
    }
}
