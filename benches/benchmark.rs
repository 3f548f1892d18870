use criterion::{criterion_group, criterion_main, Criterion};

use rand_jump::*;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut kiss = Kiss::new();
    c.bench_function("Kiss::next32", move |b| b.iter(|| kiss.next32()));
    let mut jlkiss64 = Jlkiss64::new();
    c.bench_function("Jlkiss64::next64", move |b| b.iter(|| jlkiss64.next64()));
    let mut lfsr113 = Lfsr113::new();
    c.bench_function("Lfsr113::next32", move |b| b.iter(|| lfsr113.next32()));
    let mut lfsr258 = Lfsr258::new();
    c.bench_function("Lfsr258::next64", move |b| b.iter(|| lfsr258.next64()));
    let mut kiss = Kiss::new();
    c.bench_function("Kiss::jump_ahead", move |b| b.iter(|| kiss.jump_ahead(1_000_000_007)));
    let mut lfsr258 = Lfsr258::new();
    c.bench_function("Lfsr258::jump_ahead", move |b| b.iter(|| lfsr258.jump_ahead(1_000_000_007)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
