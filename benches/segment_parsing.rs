use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use scribe::LogEntry;
use scribe::parsers::{parse_v0, parse_v1, render_v1};

/// Generate synthetic history with a mix of short and multi-line commands
fn generate_entries(num_entries: usize) -> Vec<LogEntry> {
    let commands = [
        "ls -la",
        "git status",
        "git commit -m 'fix parser edge case'",
        "cargo build --release",
        "for f in *.log; do\n  gzip \"$f\"\ndone",
        "docker compose up -d",
        "grep -rn 'TODO' src/",
    ];

    (0..num_entries)
        .map(|i| LogEntry::new(1_600_000_000 + i as i64, commands[i % commands.len()]))
        .collect()
}

/// Render entries in the legacy raw layout
fn render_v0(entries: &[LogEntry]) -> Vec<u8> {
    let mut out = Vec::new();
    for entry in entries {
        out.extend_from_slice(format!("{}:", entry.timestamp).as_bytes());
        out.extend_from_slice(&entry.command);
        out.push(b'\n');
    }
    out
}

fn bench_parse_v1(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_v1");

    for size in [1_000, 10_000, 100_000].iter() {
        let content = render_v1(&generate_entries(*size));

        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &content, |b, content| {
            b.iter(|| parse_v1(black_box(content)).unwrap());
        });
    }

    group.finish();
}

fn bench_parse_v0(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_v0");

    for size in [1_000, 10_000, 100_000].iter() {
        let content = render_v0(&generate_entries(*size));

        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &content, |b, content| {
            b.iter(|| parse_v0(black_box(content)).unwrap());
        });
    }

    group.finish();
}

fn bench_render_v1(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_v1");

    for size in [1_000, 10_000].iter() {
        let entries = generate_entries(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| render_v1(black_box(entries)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_v1, bench_parse_v0, bench_render_v1);
criterion_main!(benches);
