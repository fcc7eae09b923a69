use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use dossier_core::content::{Block, Line, PageContent};
use dossier_core::geometry::{Length, Rect, Size};
use dossier_core::{AnalyzeOptions, Page, Sketch};

const SKETCH: &str = r#"{
    "nodes": [
        {
            "name": "title",
            "search_areas": [{
                "top_left": {"abs": {"left": "1cm", "top": "1cm"}},
                "width": "8cm",
                "height": "3cm"
            }],
            "line_text": {"regex": "^Invoice \\d+$"}
        },
        {
            "name": "date",
            "search_areas": [{
                "top_left": {"rel": {"node": "title", "feature": "bottom_left"}},
                "width": "8cm",
                "height": "2cm"
            }],
            "line_text": {"regex": "\\d{4}-\\d{2}-\\d{2}"}
        },
        {
            "name": "total",
            "search_areas": [
                {
                    "top": {"abs": "20cm"}, "left": {"abs": "10cm"},
                    "bottom": {"abs": "29cm"}, "right": {"abs": "21cm"}
                },
                {
                    "top_left": {"rel": {"node": "date", "feature": "bottom_left"}},
                    "bottom_right": {"abs": {"left": "21cm", "top": "29cm"}}
                }
            ],
            "block_text": {"regex": "(?m)^Total:\\s+(?P<amount>\\d+\\.\\d{2})$", "bounds_from_match": true}
        }
    ]
}"#;

struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn gen_f64(&mut self, min: f64, max: f64) -> f64 {
        let n = self.next_u64() as f64 / u64::MAX as f64;
        min + (max - min) * n
    }
}

fn line(left: f64, top: f64, text: &str) -> Line {
    let width = 5.5 * text.chars().count() as f64;
    Line::from_text(Rect::from_points(left, top, left + width, top + 10.0), text)
}

/// A page with the fields the sketch looks for plus `filler` random
/// one-line blocks.
fn gen_page(number: usize, seed: u64, filler: usize) -> Page {
    let mut rng = XorShift64::new(seed);

    let mut blocks = vec![
        Block::new(vec![line(40.0, 40.0, &format!("Invoice {number}"))]),
        Block::new(vec![line(40.0, 100.0, "2024-03-01")]),
        Block::new(vec![
            line(300.0, 700.0, "Subtotal: 100.00"),
            line(300.0, 712.0, "Total: 119.00"),
        ]),
    ];

    for idx in 0..filler {
        let left = rng.gen_f64(0.0, 500.0);
        let top = rng.gen_f64(150.0, 800.0);
        blocks.push(Block::new(vec![line(left, top, &format!("filler {idx}"))]));
    }

    Page::new(PageContent::new(
        number,
        Size::new(Length::from_pt(595.276), Length::from_pt(841.89)),
        blocks,
    ))
}

fn bench_analyze_page(c: &mut Criterion) {
    let sketch = Sketch::from_json_str(SKETCH).expect("compile sketch");

    let mut group = c.benchmark_group("analyze_page");

    for filler in [0, 200, 2_000] {
        let page = gen_page(1, 0x5eed ^ filler as u64, filler);

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(filler), &page, |b, page| {
            b.iter(|| black_box(sketch.analyze_page(page).expect("analyze page")))
        });
    }

    group.finish();
}

fn bench_analyze_pages(c: &mut Criterion) {
    let sketch = Sketch::from_json_str(SKETCH).expect("compile sketch");
    let pages: Vec<Page> = (1..=64).map(|n| gen_page(n, n as u64, 300)).collect();

    let mut group = c.benchmark_group("analyze_pages");
    group.throughput(Throughput::Elements(pages.len() as u64));

    for threads in [1, 4] {
        let options = AnalyzeOptions::new().threads(threads);
        group.bench_with_input(BenchmarkId::new("threads", threads), &options, |b, options| {
            b.iter(|| black_box(sketch.analyze_pages(&pages, options).expect("analyze pages")))
        });
    }

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_sketch", |b| {
        b.iter(|| black_box(Sketch::from_json_str(black_box(SKETCH)).expect("compile sketch")))
    });
}

criterion_group!(benches, bench_analyze_page, bench_analyze_pages, bench_compile);
criterion_main!(benches);
