use criterion::Criterion;
use tmplmaths::tmpl;

mod bench_util;
use bench_util::{bench_one, bench_paths, configure_criterion, gen_range, glibc};

fn bench_floor(c: &mut Criterion) {
    let smoke = [-1e300, -4.5e15, -3.0, -2.5, -0.5, -0.0, 0.0, 0.25, 2.5, 1e10, 4.5e15, 1e300];
    let wide = gen_range(1024, -1e6, 1e6, 0x2718);
    let unit = gen_range(1024, -1.0, 1.0, 0x3141_5926);

    for (label, inputs) in [("smoke", &smoke[..]), ("wide", &wide[..]), ("unit", &unit[..])] {
        let mut group = c.benchmark_group(format!("floor/{label}"));
        bench_paths(&mut group, inputs, tmpl::floor_ieee::<f64>, tmpl::floor_portable::<f64>);
        bench_one(&mut group, "std", inputs, f64::floor);
        if let Some(libm) = glibc() {
            bench_one(&mut group, "glibc", inputs, |x| unsafe { (libm.floor)(x) });
        }
        group.finish();
    }
}

fn main() {
    let mut c = configure_criterion();
    bench_floor(&mut c);
    c.final_summary();
}
