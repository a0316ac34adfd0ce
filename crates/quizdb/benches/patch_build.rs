use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use quizdb::patch::{self, Converter, FieldSchema, PatchDocument, convert};

/// Schema with `n` text columns: col0, col1, ...
fn schema(n: usize) -> FieldSchema {
    (0..n).fold(FieldSchema::new(), |schema, i| {
        let conv: Converter = if i % 2 == 0 {
            convert::string
        } else {
            convert::string_array
        };
        schema.field(&format!("col{i}"), conv)
    })
}

/// Document that sets every other column of `schema(n)` plus one unknown key.
fn document(n: usize) -> PatchDocument {
    let mut doc = PatchDocument::new().with("unknown", "ignored");
    for i in (0..n).step_by(2) {
        doc.insert(format!("col{i}"), format!("value {i}"));
    }
    doc
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("patch/build");

    for n in [1, 5, 10, 50, 100] {
        let schema = schema(n);
        let doc = document(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(patch::build(&doc, &schema, 1)));
        });
    }

    group.finish();
}

fn bench_decode_and_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("patch/decode_and_build");
    let schema = quizdb::quiz::update_schema();
    let body = br#"{"question": "New Q?", "options": ["A", "B", "C", "D"], "answers": ["A"]}"#;

    group.bench_function("quiz", |b| {
        b.iter(|| {
            let doc = PatchDocument::from_slice(black_box(body)).unwrap();
            black_box(patch::build(&doc, schema, 1))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_decode_and_build);
criterion_main!(benches);
