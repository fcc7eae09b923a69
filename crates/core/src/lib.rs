//! dossier - locate fields on document pages using relative-geometry
//! sketches.
//!
//! A sketch names the fields ("nodes") of a document layout. Each node has
//! search areas whose edges are fixed or anchored to corners of other
//! nodes, and a pattern matched against the text blocks or lines found
//! within an area.

pub mod config;
pub mod content;
pub mod document;
pub mod error;
pub mod flexrect;
pub mod geometry;
pub mod sketch;

pub use config::SketchConfig;
pub use document::{CancelToken, Document, Page, PageRange};
pub use error::{DossierError, ErrorKind, Result};
pub use sketch::{AnalyzeOptions, DocumentReport, Node, PageReport, Sketch};
