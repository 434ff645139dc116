#![cfg(feature = "mpfr")]

use rug::Float;
use std::env;
use tmplmaths::tmpl;

const MPFR_PREC: u32 = 256;

#[derive(Clone, Copy)]
enum Target {
    Exp,
    Asin,
}

impl Target {
    fn from_env() -> Self {
        match env::var("TMPL_MPFR_FN").as_deref() {
            Ok("asin") => Target::Asin,
            _ => Target::Exp,
        }
    }

    fn symbol(self) -> &'static [u8] {
        match self {
            Target::Exp => b"exp",
            Target::Asin => b"asin",
        }
    }

    fn mpfr(self, x: f64) -> f64 {
        let mut v = Float::with_val(MPFR_PREC, x);
        match self {
            Target::Exp => v.exp_mut(),
            Target::Asin => v.asin_mut(),
        }
        v.to_f64()
    }

    fn ieee(self, x: f64) -> f64 {
        match self {
            Target::Exp => tmpl::exp_ieee(x),
            Target::Asin => tmpl::asin_ieee(x),
        }
    }

    fn portable(self, x: f64) -> f64 {
        match self {
            Target::Exp => tmpl::exp_portable(x),
            Target::Asin => tmpl::asin_portable(x),
        }
    }
}

fn ulp_size(x: f64) -> f64 {
    if x == 0.0 {
        return f64::from_bits(1);
    }
    if x.is_nan() || x.is_infinite() {
        return f64::NAN;
    }
    let next = if x.is_sign_negative() {
        x.next_down()
    } else {
        x.next_up()
    };
    (next - x).abs()
}

fn ulp_error(actual: f64, expected: f64) -> f64 {
    if actual.to_bits() == expected.to_bits() || (actual.is_nan() && expected.is_nan()) {
        return 0.0;
    }
    let diff = (actual - expected).abs();
    if diff == 0.0 {
        return 0.0;
    }
    let ulp = ulp_size(expected);
    if !ulp.is_finite() || ulp == 0.0 {
        return f64::INFINITY;
    }
    diff / ulp
}

type Libm1 = unsafe extern "C" fn(f64) -> f64;

fn glibc_opt(target: Target) -> Option<Libm1> {
    let path = env::var("TMPL_GLIBC_LIBM")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| {
            let default = "/lib/x86_64-linux-gnu/libm.so.6";
            if std::path::Path::new(default).exists() {
                Some(default.to_string())
            } else {
                None
            }
        })?;

    let lib = unsafe { libloading::Library::new(&path).ok()? };
    let lib = Box::leak(Box::new(lib));
    unsafe {
        let f: libloading::Symbol<Libm1> = lib.get(target.symbol()).ok()?;
        Some(*f)
    }
}

fn sweep_offsets(radius: i64, stride: i64) -> Vec<i64> {
    let mut offsets = Vec::new();
    let mut off = -radius;
    while off <= radius {
        offsets.push(off);
        off = off.saturating_add(stride);
        if off == i64::MAX {
            break;
        }
    }
    offsets
}

struct ReportRow {
    label: &'static str,
    x: f64,
    mpfr: f64,
    ieee: f64,
    ieee_ulps: f64,
    portable: f64,
    portable_ulps: f64,
    glibc: Option<(f64, f64)>,
}

fn push_report(
    rows: &mut Vec<ReportRow>,
    label: &'static str,
    target: Target,
    x: f64,
    glibc: Option<Libm1>,
) {
    let mpfr = target.mpfr(x);
    let ieee = target.ieee(x);
    let portable = target.portable(x);
    let glibc_row = glibc
        .map(|g| unsafe { g(x) })
        .map(|v| (v, ulp_error(v, mpfr)));
    rows.push(ReportRow {
        label,
        x,
        mpfr,
        ieee,
        ieee_ulps: ulp_error(ieee, mpfr),
        portable,
        portable_ulps: ulp_error(portable, mpfr),
        glibc: glibc_row,
    });
}

fn print_report(rows: &[ReportRow]) {
    println!(
        "| Case | x | mpfr bits | ieee bits | ieee ulp | portable bits | portable ulp | glibc bits | glibc ulp |"
    );
    println!("| :--- | ---: | :--- | :--- | ---: | :--- | ---: | :--- | ---: |");
    for row in rows {
        let (glibc_bits, glibc_ulps) = match row.glibc {
            Some((v, ulps)) => (format!("{:016x}", v.to_bits()), format!("{ulps:.3}")),
            None => ("n/a".to_string(), "n/a".to_string()),
        };
        println!(
            "| {} | {:.17e} | {:016x} | {:016x} | {:.3} | {:016x} | {:.3} | {} | {} |",
            row.label,
            row.x,
            row.mpfr.to_bits(),
            row.ieee.to_bits(),
            row.ieee_ulps,
            row.portable.to_bits(),
            row.portable_ulps,
            glibc_bits,
            glibc_ulps
        );
    }
}

#[test]
fn mpfr_sweep() {
    let x0 = match env::var("TMPL_MPFR_X") {
        Ok(v) => v.parse::<f64>().expect("TMPL_MPFR_X must be f64"),
        Err(_) => return,
    };
    let radius = env::var("TMPL_MPFR_RADIUS")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(10_000);
    let stride = env::var("TMPL_MPFR_STRIDE")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(1);
    let max_allowed = env::var("TMPL_MPFR_MAX_ULP")
        .ok()
        .and_then(|v| v.parse::<f64>().ok());

    let target = Target::from_env();
    let glibc = glibc_opt(target);
    let base_bits = x0.to_bits();
    let mut max_ieee = (0.0f64, x0);
    let mut max_portable = (0.0f64, x0);
    let mut max_glibc = (0.0f64, x0);
    let mut first_mismatch: Option<(f64, f64, f64)> = None;
    let mut report = Vec::new();

    push_report(&mut report, "x0", target, x0, glibc);

    for offset in sweep_offsets(radius, stride.max(1)) {
        let bits = if offset < 0 {
            base_bits.wrapping_sub((-offset) as u64)
        } else {
            base_bits.wrapping_add(offset as u64)
        };
        let x = f64::from_bits(bits);
        let expected = target.mpfr(x);

        let actual = target.ieee(x);
        let ulps = ulp_error(actual, expected);
        if ulps > max_ieee.0 {
            max_ieee = (ulps, x);
        }
        if first_mismatch.is_none() && ulps != 0.0 {
            first_mismatch = Some((x, actual, expected));
        }

        let ulps = ulp_error(target.portable(x), expected);
        if ulps > max_portable.0 {
            max_portable = (ulps, x);
        }

        if let Some(g) = glibc {
            let gulps = ulp_error(unsafe { g(x) }, expected);
            if gulps > max_glibc.0 {
                max_glibc = (gulps, x);
            }
        }
    }

    println!("MPFR sweep around x0={x0} (radius={radius} stride={stride})");
    println!("ieee max ulp error vs MPFR: ulps={} at x={}", max_ieee.0, max_ieee.1);
    println!(
        "portable max ulp error vs MPFR: ulps={} at x={}",
        max_portable.0, max_portable.1
    );
    if let Some((x, actual, expected)) = first_mismatch {
        println!(
            "first ieee mismatch: x={x} actual={actual:.17e} expected={expected:.17e} ulps={}",
            ulp_error(actual, expected)
        );
    } else {
        println!("no mismatches against MPFR in sweep range");
    }
    if glibc.is_some() {
        println!("glibc max ulp error vs MPFR: ulps={} at x={}", max_glibc.0, max_glibc.1);
    }

    push_report(&mut report, "ieee_max", target, max_ieee.1, glibc);
    push_report(&mut report, "portable_max", target, max_portable.1, glibc);
    if glibc.is_some() {
        push_report(&mut report, "glibc_max", target, max_glibc.1, glibc);
    }
    if let Some((x, _, _)) = first_mismatch {
        push_report(&mut report, "ieee_first", target, x, glibc);
    }

    let report_enabled = env::var("TMPL_MPFR_REPORT")
        .ok()
        .map(|v| v != "0")
        .unwrap_or(true);
    if report_enabled {
        print_report(&report);
    }

    if let Some(limit) = max_allowed {
        assert!(max_ieee.0 <= limit, "ieee error {} exceeds {limit}", max_ieee.0);
        assert!(
            max_portable.0 <= limit,
            "portable error {} exceeds {limit}",
            max_portable.0
        );
    }
}
