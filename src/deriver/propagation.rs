//! First-order (delta method) uncertainty propagation.

/// A value with an independent standard deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub value: f64,
    pub std: f64,
}

impl Measurement {
    pub fn new(value: f64, std: f64) -> Self {
        Self { value, std }
    }
}

/// `R = A / B` with σ_R = sqrt(σ_A²/B² + σ_B²·A²/B⁴).
///
/// No guarding against `B == 0`; the IEEE result (inf/NaN) is returned as is.
pub fn ratio(num: Measurement, den: Measurement) -> Measurement {
    let b2 = den.value * den.value;
    let variance = num.std * num.std / b2 + den.std * den.std * num.value * num.value / (b2 * b2);
    Measurement {
        value: num.value / den.value,
        std: variance.sqrt(),
    }
}
