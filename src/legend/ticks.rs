//! Tick positions and labels for colorbar axes.

/// Step multipliers tried within each decade.
const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Labels switch to exponent notation outside `[SMALL, LARGE)`.
const SMALL: f64 = 1e-4;
const LARGE: f64 = 1e6;

/// Ticks on a range, with the spacing used to format them.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticks {
    pub values: Vec<f64>,
    /// Distance between ticks; 0 for a degenerate range with a single tick
    pub step: f64,
}

impl Ticks {
    /// Labels for every tick, formatted consistently for the step.
    pub fn labels(&self) -> Vec<String> {
        self.values.iter().map(|&v| format_tick(v, self.step)).collect()
    }
}

/// Round multiples of 1, 2, 2.5 or 5 times a power of ten covering the
/// range, at most `max_ticks + 1` of them. The bounds may come in either order.
pub fn nice_ticks(min: f64, max: f64, max_ticks: usize) -> Ticks {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if !(hi > lo) || !lo.is_finite() || !hi.is_finite() {
        return Ticks {
            values: vec![lo],
            step: 0.0,
        };
    }

    let step = nice_step((hi - lo) / max_ticks.max(1) as f64);
    let first = (lo / step - 1e-9).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;

    let values = (first..=last)
        .map(|k| {
            let v = k as f64 * step;
            // no negative zero
            if v == 0.0 { 0.0 } else { v }
        })
        .collect();

    Ticks { values, step }
}

/// Smallest nice step at least as large as `raw`.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    NICE_STEPS
        .iter()
        .map(|m| m * magnitude)
        .find(|&step| step >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0 * magnitude)
}

/// Number of decimals needed to show multiples of `step` exactly.
fn decimals_for(step: f64) -> usize {
    let mut scaled = step.abs();
    let mut decimals = 0;
    while decimals < 10 && (scaled - scaled.round()).abs() > 1e-6 * scaled.max(1.0) {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

/// Format a tick value. `step` is the tick spacing, or 0 for a lone tick.
pub fn format_tick(value: f64, step: f64) -> String {
    let abs = value.abs();
    if abs != 0.0 && !(SMALL..LARGE).contains(&abs) {
        let exponent = abs.log10().floor();
        let mantissa_step = if step > 0.0 { step / 10f64.powf(exponent) } else { abs / 10f64.powf(exponent) };
        return format!("{:.*e}", decimals_for(mantissa_step).min(6), value);
    }

    if step > 0.0 {
        format!("{:.*}", decimals_for(step), value)
    } else {
        format!("{}", value)
    }
}
