//! Approximations to the special functions the rest of the crate builds on.
//!
//! None of these are exact. The polynomial coefficients are fixed so that
//! results stay reproducible across releases; callers that display p-values or
//! critical values computed here inherit the approximation error.
//!
//! # Examples
//!
//! ```
//! use statlab_stats::special::{normal_cdf, normal_quantile};
//!
//! let z = normal_quantile(0.975).unwrap();
//! assert!((z - 1.959_964).abs() < 1e-5);
//! assert!((normal_cdf(z) - 0.975).abs() < 1e-6);
//! ```

use std::f64::consts::{PI, SQRT_2};

use crate::error::{Result, require_positive, require_probability};

/// `1 / sqrt(2 * pi)`
const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Degrees of freedom above which Student's t is replaced by the normal.
pub const LARGE_DF: f64 = 1000.0;

/// Degrees of freedom below which the t-CDF gets its small-sample correction.
const SMALL_DF: f64 = 30.0;

// Abramowitz & Stegun 26.2.17
const CDF_P: f64 = 0.231_641_9;
const CDF_B: [f64; 5] = [
    0.319_381_530,
    -0.356_563_782,
    1.781_477_937,
    -1.821_255_978,
    1.330_274_429,
];

// Acklam's rational approximation to the inverse normal CDF
const ACKLAM_A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_69e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const ACKLAM_B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const ACKLAM_C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const ACKLAM_D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];
const ACKLAM_P_LOW: f64 = 0.024_25;

// Abramowitz & Stegun 7.1.26
const ERF_P: f64 = 0.327_591_1;
const ERF_A: [f64; 5] = [
    0.254_829_592,
    -0.284_496_736,
    1.421_413_741,
    -1.453_152_027,
    1.061_405_429,
];

/// Standard normal density.
#[must_use]
pub fn normal_pdf(x: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal CDF, Abramowitz & Stegun 26.2.17 (absolute error below 7.5e-8).
///
/// # Examples
///
/// ```
/// # use statlab_stats::special::normal_cdf;
/// assert!((normal_cdf(0.0) - 0.5).abs() < 1e-7);
/// assert!((normal_cdf(1.0) + normal_cdf(-1.0) - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn normal_cdf(x: f64) -> f64 {
    let t = 1.0 / (1.0 + CDF_P * x.abs());
    let poly = t * (CDF_B[0] + t * (CDF_B[1] + t * (CDF_B[2] + t * (CDF_B[3] + t * CDF_B[4]))));
    let tail = normal_pdf(x) * poly;
    if x > 0.0 { 1.0 - tail } else { tail }
}

/// Inverse of the standard normal CDF (Acklam, relative error below 1.2e-9).
///
/// Fails with [`StatsError::InvalidProbability`](crate::StatsError::InvalidProbability) unless `0 < p < 1`.
pub fn normal_quantile(p: f64) -> Result<f64> {
    require_probability("p", p)?;
    if p >= 0.5 {
        Ok(-acklam_lower_half(1.0 - p))
    } else {
        Ok(acklam_lower_half(p))
    }
}

/// Acklam's approximation restricted to `0 < p <= 0.5`.
fn acklam_lower_half(p: f64) -> f64 {
    if p < ACKLAM_P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        let c = &ACKLAM_C;
        let d = &ACKLAM_D;
        (((((c[0] * q + c[1]) * q + c[2]) * q + c[3]) * q + c[4]) * q + c[5])
            / ((((d[0] * q + d[1]) * q + d[2]) * q + d[3]) * q + 1.0)
    } else {
        let q = p - 0.5;
        let r = q * q;
        let a = &ACKLAM_A;
        let b = &ACKLAM_B;
        (((((a[0] * r + a[1]) * r + a[2]) * r + a[3]) * r + a[4]) * r + a[5]) * q
            / (((((b[0] * r + b[1]) * r + b[2]) * r + b[3]) * r + b[4]) * r + 1.0)
    }
}

/// Student-t quantile via a third-order Cornish-Fisher expansion around the
/// normal quantile.
///
/// Above [`LARGE_DF`] degrees of freedom the normal quantile is returned as is.
///
/// # Examples
///
/// ```
/// # use statlab_stats::special::t_quantile_approx;
/// // Tabulated value: t(0.975, 10) = 2.228
/// let t = t_quantile_approx(10.0, 0.975).unwrap();
/// assert!((t - 2.228).abs() < 0.01);
/// ```
pub fn t_quantile_approx(df: f64, p: f64) -> Result<f64> {
    require_positive("degrees of freedom", df)?;
    let z = normal_quantile(p)?;
    if df > LARGE_DF {
        return Ok(z);
    }
    let z2 = z * z;
    let z3 = z2 * z;
    let z5 = z3 * z2;
    let z7 = z5 * z2;
    let g1 = (z3 + z) / 4.0;
    let g2 = (5.0 * z5 + 16.0 * z3 + 3.0 * z) / 96.0;
    let g3 = (3.0 * z7 + 19.0 * z5 + 17.0 * z3 - 15.0 * z) / 384.0;
    Ok(z + g1 / df + g2 / (df * df) + g3 / (df * df * df))
}

/// Approximate Student-t CDF.
///
/// Normal CDF with a first-order Edgeworth correction below 30 degrees of
/// freedom, and a linear expansion around zero for `|t| < 0.1`. Accuracy
/// degrades for very small `df` combined with large `|t|`.
#[must_use]
pub fn t_cdf_approx(t: f64, df: f64) -> f64 {
    if df > LARGE_DF {
        return normal_cdf(t);
    }
    let correction = if df < SMALL_DF { 1.0 / (4.0 * df) } else { 0.0 };
    if t.abs() < 0.1 {
        return 0.5 + t * INV_SQRT_2PI * (1.0 - correction);
    }
    let value = normal_cdf(t) - normal_pdf(t) * (t * t * t + t) * correction;
    value.clamp(0.0, 1.0)
}

/// Approximate CDF of the non-central t distribution.
///
/// With `ncp == 0` this is the exact central t CDF (see
/// [`t_upper_tail_exact`]); otherwise the usual normal approximation
/// `Φ((t·(1 − 1/4ν) − δ) / sqrt(1 + t²/2ν))` is used.
#[must_use]
pub fn noncentral_t_cdf(t: f64, df: f64, ncp: f64) -> f64 {
    if ncp == 0.0 {
        return 1.0 - t_upper_tail_exact(t, df);
    }
    let z = (t * (1.0 - 1.0 / (4.0 * df)) - ncp) / (1.0 + t * t / (2.0 * df)).sqrt();
    normal_cdf(z)
}

/// Chi-square CDF via the Wilson–Hilferty cube-root transform.
#[must_use]
pub fn chi_square_cdf(x: f64, df: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let h = 2.0 / (9.0 * df);
    let z = ((x / df).cbrt() - (1.0 - h)) / h.sqrt();
    normal_cdf(z)
}

/// Chi-square quantile via the inverse Wilson–Hilferty transform.
///
/// The transform can go negative for tiny `p` and `df`; the result is clamped
/// at zero.
pub fn chi_square_quantile(p: f64, df: f64) -> Result<f64> {
    require_positive("degrees of freedom", df)?;
    let z = normal_quantile(p)?;
    let h = 2.0 / (9.0 * df);
    let base = 1.0 - h + z * h.sqrt();
    Ok((df * base * base * base).max(0.0))
}

/// Error function, Abramowitz & Stegun 7.1.26 (absolute error below 1.5e-7).
#[must_use]
pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + ERF_P * x);
    let a = &ERF_A;
    let poly = ((((a[4] * t + a[3]) * t + a[2]) * t + a[1]) * t + a[0]) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Normal CDF with arbitrary location and scale, expressed through [`erf`].
#[must_use]
pub(crate) fn normal_cdf_erf(x: f64, mean: f64, std_dev: f64) -> f64 {
    0.5 * (1.0 + erf((x - mean) / (std_dev * SQRT_2)))
}

/// Natural log of the gamma function (Lanczos, g = 7).
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn ln_gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFICIENTS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        // Reflection keeps the series in its accurate range.
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut sum = COEFFICIENTS[0];
    for (i, &c) in COEFFICIENTS.iter().enumerate().skip(1) {
        sum += c / (x + i as f64);
    }
    let t = x + G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + sum.ln()
}

/// Regularized incomplete beta function `I_x(a, b)` (continued fraction, Lentz).
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn regularized_incomplete_beta(x: f64, a: f64, b: f64) -> f64 {
    const TINY: f64 = 1e-30;
    const TOLERANCE: f64 = 1e-12;
    const MAX_ITERATIONS: usize = 300;

    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    if x > (a + 1.0) / (a + b + 2.0) {
        return 1.0 - regularized_incomplete_beta(1.0 - x, b, a);
    }

    let ln_beta = ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b);
    let front = (a * x.ln() + b * (1.0 - x).ln() - ln_beta).exp() / a;

    let clamp_tiny = |v: f64| if v.abs() < TINY { TINY } else { v };
    let mut f = 1.0;
    let mut c = 1.0;
    let mut d = 0.0;
    for m in 0..MAX_ITERATIONS {
        let m_f = m as f64;
        let even = if m == 0 {
            1.0
        } else {
            m_f * (b - m_f) * x / ((a + 2.0 * m_f - 1.0) * (a + 2.0 * m_f))
        };
        d = 1.0 / clamp_tiny(1.0 + even * d);
        c = clamp_tiny(1.0 + even / c);
        f *= d * c;

        let odd = -(a + m_f) * (a + b + m_f) * x / ((a + 2.0 * m_f) * (a + 2.0 * m_f + 1.0));
        d = 1.0 / clamp_tiny(1.0 + odd * d);
        c = clamp_tiny(1.0 + odd / c);
        let delta = d * c;
        f *= delta;
        if (delta - 1.0).abs() < TOLERANCE {
            break;
        }
    }

    // The m = 0 even term contributes the leading 1 of the fraction.
    front * (f - 1.0)
}

/// Exact upper-tail probability `P(T > t)` of Student's t.
#[must_use]
pub fn t_upper_tail_exact(t: f64, df: f64) -> f64 {
    let x = df / (df + t * t);
    let half = 0.5 * regularized_incomplete_beta(x, df / 2.0, 0.5);
    if t >= 0.0 { half } else { 1.0 - half }
}

/// Exact upper-tail probability `P(F > f)` of Fisher's F.
#[must_use]
pub fn f_upper_tail_exact(f: f64, df1: f64, df2: f64) -> f64 {
    if f <= 0.0 {
        return 1.0;
    }
    let x = df2 / (df2 + df1 * f);
    regularized_incomplete_beta(x, df2 / 2.0, df1 / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_cdf_known_values() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((normal_cdf(1.96) - 0.975).abs() < 1e-4);
        assert!((normal_cdf(-1.645) - 0.05).abs() < 1e-4);
        assert!(normal_cdf(10.0) <= 1.0);
        assert!(normal_cdf(-10.0) >= 0.0);
    }

    #[test]
    fn test_normal_quantile_symmetry_and_regions() {
        for p in [0.001, 0.01, 0.02, 0.1, 0.3, 0.45] {
            let lo = normal_quantile(p).unwrap();
            let hi = normal_quantile(1.0 - p).unwrap();
            assert!((lo + hi).abs() < 1e-9, "asymmetric at p={p}");
        }
        assert!(normal_quantile(0.5).unwrap().abs() < 1e-12);
        assert!((normal_quantile(0.95).unwrap() - 1.644_853_6).abs() < 1e-6);
        assert!((normal_quantile(0.01).unwrap() + 2.326_347_9).abs() < 1e-6);
    }

    #[test]
    fn test_normal_quantile_rejects_endpoints() {
        assert!(normal_quantile(0.0).is_err());
        assert!(normal_quantile(1.0).is_err());
        assert!(normal_quantile(-0.2).is_err());
    }

    #[test]
    fn test_normal_quantile_inverts_cdf() {
        for p in [0.005, 0.05, 0.25, 0.5, 0.75, 0.95, 0.995] {
            let x = normal_quantile(p).unwrap();
            assert!((normal_cdf(x) - p).abs() < 1e-6);
        }
    }

    #[test]
    fn test_t_quantile_matches_tables() {
        // (df, p, tabulated)
        let cases = [
            (5.0, 0.975, 2.571),
            (10.0, 0.975, 2.228),
            (20.0, 0.95, 1.725),
            (29.0, 0.975, 2.045),
        ];
        for (df, p, expected) in cases {
            let t = t_quantile_approx(df, p).unwrap();
            assert!((t - expected).abs() < 0.02, "df={df} p={p} got {t}");
        }
    }

    #[test]
    fn test_t_quantile_large_df_is_normal() {
        let t = t_quantile_approx(5000.0, 0.9).unwrap();
        let z = normal_quantile(0.9).unwrap();
        assert!((t - z).abs() < f64::EPSILON);
    }

    #[test]
    fn test_t_cdf_is_monotone_and_bounded() {
        let mut last = 0.0;
        for i in -40..=40 {
            let t = f64::from(i) * 0.25;
            let v = t_cdf_approx(t, 8.0);
            assert!((0.0..=1.0).contains(&v));
            assert!(v + 1e-3 >= last, "not monotone near t={t}");
            last = v;
        }
    }

    #[test]
    fn test_t_cdf_inverts_quantile() {
        let t = t_quantile_approx(9.0, 0.95).unwrap();
        assert!((t_cdf_approx(t, 9.0) - 0.95).abs() < 0.005);
    }

    #[test]
    fn test_chi_square_pair() {
        // Tabulated: chi2(0.95, 10) = 18.307
        let q = chi_square_quantile(0.95, 10.0).unwrap();
        assert!((q - 18.307).abs() < 0.05);
        assert!((chi_square_cdf(q, 10.0) - 0.95).abs() < 1e-6);
        assert!(chi_square_cdf(-1.0, 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_erf_known_values() {
        assert!(erf(0.0).abs() < 1e-7);
        assert!((erf(1.0) - 0.842_700_79).abs() < 1e-6);
        assert!((erf(-1.0) + 0.842_700_79).abs() < 1e-6);
        assert!((normal_cdf_erf(1.96, 0.0, 1.0) - 0.975).abs() < 1e-4);
    }

    #[test]
    fn test_ln_gamma_known_values() {
        assert!(ln_gamma(1.0).abs() < 1e-10);
        assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-10);
        assert!((ln_gamma(0.5) - PI.sqrt().ln()).abs() < 1e-10);
    }

    #[test]
    fn test_exact_tails() {
        // t(0.975, 10) = 2.228
        assert!((t_upper_tail_exact(2.228_138_9, 10.0) - 0.025).abs() < 1e-6);
        assert!((t_upper_tail_exact(0.0, 4.0) - 0.5).abs() < 1e-9);
        // F(0.95; 3, 10) = 3.708
        assert!((f_upper_tail_exact(3.708_265, 3.0, 10.0) - 0.05).abs() < 1e-4);
    }

    #[test]
    fn test_noncentral_reduces_to_central() {
        let central = 1.0 - t_upper_tail_exact(1.5, 12.0);
        assert!((noncentral_t_cdf(1.5, 12.0, 0.0) - central).abs() < f64::EPSILON);
        // df = 2: P(T <= 2.92) = 0.95
        assert!((noncentral_t_cdf(2.919_986, 2.0, 0.0) - 0.95).abs() < 1e-5);
        assert!(noncentral_t_cdf(1.5, 12.0, 3.0) < noncentral_t_cdf(1.5, 12.0, 0.5));
    }
}
