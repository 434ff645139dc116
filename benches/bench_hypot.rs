use criterion::{Criterion, black_box};
use tmplmaths::tmpl;

mod bench_util;
use bench_util::{bench_paths3, configure_criterion, gen_pairs, gen_triples, glibc};

fn bench_hypot(c: &mut Criterion) {
    let smoke = [
        (3.0, 4.0, 0.0),
        (1e-300, 1e-300, 1e-300),
        (1e-100, 2e-100, 3e-100),
        (1e-6, 1e-6, 1e-6),
        (1.0, 1.0, 1.0),
        (1e6, 1e6, 1e6),
        (1e200, 1e200, 1e200),
    ];
    let wide = gen_triples(1024, -1e6, 1e6, 0x2718);
    let huge = gen_triples(1024, -1e300, 1e300, 0x3141_5926);

    for (label, inputs) in [("smoke", &smoke[..]), ("wide", &wide[..]), ("huge", &huge[..])] {
        let mut group = c.benchmark_group(format!("hypot3/{label}"));
        bench_paths3(&mut group, inputs, tmpl::hypot3_ieee::<f64>, tmpl::hypot3_portable::<f64>);
        group.finish();
    }

    let pairs = gen_pairs(1024, -1e6, 1e6, 0x1618);
    let mut group = c.benchmark_group("hypot/wide");
    group.bench_function("ieee", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &(x, y) in &pairs {
                acc += tmpl::hypot_ieee(black_box(x), black_box(y));
            }
            black_box(acc)
        })
    });
    if let Some(libm) = glibc() {
        group.bench_function("glibc", |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for &(x, y) in &pairs {
                    acc += unsafe { (libm.hypot)(black_box(x), black_box(y)) };
                }
                black_box(acc)
            })
        });
    }
    group.finish();
}

fn main() {
    let mut c = configure_criterion();
    bench_hypot(&mut c);
    c.final_summary();
}
