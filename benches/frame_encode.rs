use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_console::term::{encode_diff_into, encode_full_into, FrameBuffer, PairTable};
use tui_console::types::{BaseColor, ColorPair};

fn filled_screen() -> FrameBuffer {
    let mut fb = FrameBuffer::new(160, 48);
    for y in 0..48 {
        let pair = (y % 8) as i16 + 1;
        fb.put_str(0, y, &"#".repeat(160), pair);
    }
    fb
}

fn pairs() -> PairTable {
    let mut t = PairTable::new(16);
    for c in BaseColor::ALL {
        t.set(c.code() + 1, ColorPair::new(BaseColor::White, c));
    }
    t
}

fn bench_full_redraw(c: &mut Criterion) {
    let fb = filled_screen();
    let pairs = pairs();
    let mut out = Vec::with_capacity(64 * 1024);

    c.bench_function("encode_full_160x48", |b| {
        b.iter(|| {
            out.clear();
            encode_full_into(black_box(&fb), &pairs, &mut out).unwrap();
        })
    });
}

fn bench_sparse_diff(c: &mut Criterion) {
    let prev = filled_screen();
    let mut next = prev.clone();
    next.put_str(10, 10, "status: ok", 2);
    next.put_str(80, 40, "score 1234", 3);
    let pairs = pairs();
    let mut out = Vec::with_capacity(64 * 1024);

    c.bench_function("encode_diff_two_runs", |b| {
        b.iter(|| {
            out.clear();
            encode_diff_into(black_box(&prev), black_box(&next), &pairs, &mut out).unwrap();
        })
    });
}

criterion_group!(benches, bench_full_redraw, bench_sparse_diff);
criterion_main!(benches);
