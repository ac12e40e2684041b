use smallvec::SmallVec;

/// Vertical drop per squared character distance, per unit of curve amount.
const DY_PER_AMOUNT: f64 = 0.15;
/// Rotation in degrees per character distance, per unit of curve amount.
const ROTATION_PER_AMOUNT: f64 = 0.5;

/// Offset applied to one character of a curved word.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct CharOffset {
    /// Vertical displacement in pixels; positive moves the glyph down.
    pub dy: f64,
    /// Glyph rotation in degrees.
    pub rotation_deg: f64,
}

/// Per-character offsets bending `word` into an arc.
///
/// Characters are Unicode scalar values. With `m = (len - 1) / 2` and `d = idx - m`, each
/// character gets `dy = sign(amount) * d^2 * |amount| * 0.15` and `rotation = d * amount * 0.5`.
/// The arc is symmetric around the middle: outer characters drop (or rise, for negative amounts)
/// by the same distance and tilt by opposite angles. An amount of zero yields all-zero offsets.
pub fn curve(word: &str, amount: f64) -> SmallVec<[CharOffset; 16]> {
    let len = word.chars().count();
    if len == 0 {
        return SmallVec::new();
    }
    if amount == 0.0 || !amount.is_finite() {
        return std::iter::repeat_n(CharOffset::default(), len).collect();
    }

    let middle = (len as f64 - 1.0) / 2.0;
    (0..len)
        .map(|idx| {
            let d = idx as f64 - middle;
            CharOffset {
                dy: amount.signum() * d * d * amount.abs() * DY_PER_AMOUNT,
                rotation_deg: d * amount * ROTATION_PER_AMOUNT,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/text/curve.rs"]
mod tests;
