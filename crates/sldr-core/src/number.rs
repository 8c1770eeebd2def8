//! Numeric helpers shared by scene styling and widgets.

/// Constrain `value` to `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics: an inverted range resolves in
/// favour of `max`, and a NaN input (or bound) passes through the
/// comparisons untouched.
#[must_use]
pub fn constrain(value: f64, min: f64, max: f64) -> f64 {
    if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}

/// Render a number the way a browser stringifies it.
///
/// Shortest round-trip digits, `-0` printed as `0`, `NaN`/`Infinity`
/// spelled out, and exponent notation (`1e+21`) outside `[1e-6, 1e21)`.
#[must_use]
pub fn js_number_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        format!("{value}")
    } else {
        let exp = format!("{value:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    }
}

/// Round half towards positive infinity at two decimal places.
///
/// Matches `Math.round(value * 100) / 100`.
#[must_use]
pub fn round_hundredths(value: f64) -> f64 {
    let scaled = value * 100.0;
    let floor = scaled.floor();
    let rounded = if scaled - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded / 100.0
}
