//! Benchmarks for outline extraction and relevance ranking.
//!
//! Run with: cargo bench
//!
//! Inputs are synthetic span layouts of varying page counts.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use docsift::{
    analyze_collection, extract_outline, AnalyzeOptions, BoundingBox, DocumentSpans,
    PipelineOptions, TextSpan,
};

/// Creates a synthetic document with the given number of pages, each carrying
/// a numbered heading, a sub-heading, and several body paragraphs.
fn create_test_document(page_count: u32) -> DocumentSpans {
    let mut spans = Vec::new();

    for page in 1..=page_count {
        let mut y = 40.0;
        let mut push = |text: String, size: f32, bold: bool, y: &mut f32| {
            spans.push(TextSpan::new(
                text,
                size,
                bold,
                page,
                BoundingBox::new(72.0, *y, 540.0, *y + size),
            ));
            *y += size * 2.0;
        };

        push(format!("{page}. Operations on Page {page}"), 15.0, true, &mut y);
        for paragraph in 0..4 {
            push(
                format!(
                    "Paragraph {paragraph} describes routine maintenance procedures, \
                     inspection schedules, and reporting duties in ordinary prose."
                ),
                10.0,
                false,
                &mut y,
            );
        }
        push(format!("{page}.1 Inspection Details"), 12.0, true, &mut y);
        for paragraph in 0..4 {
            push(
                format!(
                    "Detail {paragraph} lists the checkpoints an inspector walks through \
                     before signing off on the equipment for the day."
                ),
                10.0,
                false,
                &mut y,
            );
        }
    }

    DocumentSpans::new(format!("synthetic-{page_count}p.pdf"), spans)
}

/// Benchmark outline extraction at various document sizes.
fn bench_outline_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline_extraction");
    let options = AnalyzeOptions::default();

    for page_count in [1, 10, 50].iter() {
        let doc = create_test_document(*page_count);

        group.bench_function(format!("{page_count}_pages"), |b| {
            b.iter(|| extract_outline(black_box(&doc), &options));
        });
    }

    group.finish();
}

/// Benchmark the full persona analysis over a small collection.
fn bench_collection_analysis(c: &mut Criterion) {
    let docs: Vec<DocumentSpans> = (0..4).map(|_| create_test_document(10)).collect();
    // Single worker keeps the benchmark about pipeline cost, not scheduling.
    let options = PipelineOptions::default().with_workers(1);

    c.bench_function("analyze_4_documents", |b| {
        b.iter(|| {
            analyze_collection(
                black_box(&docs),
                "Site Inspector",
                "Review inspection schedules",
                &options,
            )
        });
    });
}

criterion_group!(benches, bench_outline_extraction, bench_collection_analysis);
criterion_main!(benches);
