//! dump-elements - Print the text elements of document pages
//!
//! Lists blocks and lines in reading order with their bounds, which helps
//! when writing search areas for a sketch.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use dossier_core::content::{ElementKind, TextElement};
use dossier_core::document::PageElement;
use dossier_core::geometry::{LengthFormat, LengthUnit};
use dossier_core::sketch::RectOutput;
use dossier_core::{CancelToken, Document, Page, PageRange};
use serde::Serialize;

/// Element kinds to print.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum KindFilter {
    /// Blocks only
    Block,
    /// Lines only
    Line,
    /// Blocks and lines (default)
    #[default]
    All,
}

impl KindFilter {
    fn accepts(self, kind: ElementKind) -> bool {
        match self {
            Self::Block => kind == ElementKind::Block,
            Self::Line => kind == ElementKind::Line,
            Self::All => true,
        }
    }
}

/// Print the text elements of document pages in reading order.
#[derive(Parser, Debug)]
#[command(name = "dump-elements")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Page content in JSON format
    content: PathBuf,

    /// Pages to print, e.g. "3", "1-4", "2-" or "last"
    #[arg(long, default_value_t = PageRange::ALL)]
    pages: PageRange,

    /// Unit of lengths in the output
    #[arg(short = 'u', long, default_value = "mm")]
    unit: LengthUnit,

    /// Element kinds to print
    #[arg(short = 'k', long, value_enum, default_value = "all")]
    kind: KindFilter,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

#[derive(Debug, Serialize)]
struct ElementOutput {
    kind: &'static str,
    bounds: RectOutput,
    text: String,
}

#[derive(Debug, Serialize)]
struct PageElementsOutput {
    number: usize,
    elements: Vec<ElementOutput>,
}

#[derive(Debug, Serialize)]
struct DumpOutput {
    unit: &'static str,
    pages: Vec<PageElementsOutput>,
}

fn element_output(element: &PageElement<'_>, format: &LengthFormat) -> ElementOutput {
    ElementOutput {
        kind: element.kind().name(),
        bounds: RectOutput::new(&element.bounds(), format),
        text: element.text().to_string(),
    }
}

fn dump_page(page: &Page, filter: KindFilter, format: &LengthFormat) -> PageElementsOutput {
    PageElementsOutput {
        number: page.number(),
        elements: page
            .elements_in_reading_order()
            .iter()
            .filter(|e| filter.accepts(e.kind()))
            .map(|e| element_output(e, format))
            .collect(),
    }
}

fn run(args: &Args) -> Result<()> {
    let document = Document::open_json(&args.content);
    let pages = document
        .parse_pages(&CancelToken::new(), args.pages)
        .with_context(|| format!("reading {}", args.content.display()))?;

    let format = LengthFormat::new(args.unit);
    let output = DumpOutput {
        unit: args.unit.name(),
        pages: pages
            .iter()
            .map(|page| dump_page(page, args.kind, &format))
            .collect(),
    };

    let mut out = BufWriter::new(io::stdout());
    serde_json::to_writer_pretty(&mut out, &output)?;
    writeln!(out)?;
    out.flush()?;

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
