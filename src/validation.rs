//! Consistency checks applied to bars in strict mode.

use crate::bar::Bar;

/// Checks that a bar is internally consistent.
///
/// Returns a short description of the first violated rule.
pub fn check_bar(bar: &Bar) -> Result<(), String> {
    let values = [
        ("open", bar.open),
        ("high", bar.high),
        ("low", bar.low),
        ("close", bar.close),
        ("volume", bar.volume),
    ];
    if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
        return Err(format!("{name} is not finite ({value})"));
    }
    if bar.volume < 0.0 {
        return Err(format!("negative volume {}", bar.volume));
    }
    let body_low = bar.open.min(bar.close);
    let body_high = bar.open.max(bar.close);
    if bar.low > body_low {
        return Err(format!("low {} above min(open, close) {}", bar.low, body_low));
    }
    if bar.high < body_high {
        return Err(format!("high {} below max(open, close) {}", bar.high, body_high));
    }
    Ok(())
}
