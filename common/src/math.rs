use std::f64::consts::{PI, SQRT_2};

/// Arithmetic mean, accumulated in f64. An empty input has a mean of 0.
pub fn mean<I: IntoIterator<Item = f32>>(values: I) -> f32 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0f64, 0usize), |(sum, count), v| (sum + v as f64, count + 1));

    if count == 0 {
        0.0
    } else {
        (sum / count as f64) as f32
    }
}

/// Complementary error function, Chebyshev fit with a fractional error below 1.2e-7.
pub fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let r = t * (-z * z - 1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87 + t * (-0.822_152_23 + t * 0.170_872_77)))))))))
        .exp();

    if x >= 0.0 {
        r
    } else {
        2.0 - r
    }
}

/// Inverse of `erfc`, refined with two Newton steps.
pub fn erfc_inv(y: f64) -> f64 {
    if y >= 2.0 {
        return -100.0;
    }

    if y <= 0.0 {
        return 100.0;
    }

    let lower_half = y < 1.0;
    let y = if lower_half { y } else { 2.0 - y };
    let t = (-2.0 * (y / 2.0).ln()).sqrt();
    let mut x = -0.707_11 * ((2.307_53 + t * 0.270_61) / (1.0 + t * (0.992_29 + t * 0.044_81)) - t);

    for _ in 0..2 {
        let err = erfc(x) - y;
        x += err / (1.128_379_167_095_512_6 * (-(x * x)).exp() - x * err);
    }

    if lower_half {
        x
    } else {
        -x
    }
}

/// Standard normal probability density.
pub fn norm_pdf(x: f64) -> f64 {
    (-(x * x) / 2.0).exp() / (2.0 * PI).sqrt()
}

/// Standard normal cumulative distribution.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal quantile function.
pub fn norm_ppf(p: f64) -> f64 {
    -SQRT_2 * erfc_inv(2.0 * p)
}
