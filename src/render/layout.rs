use crate::foundation::{
    core::Rgba8Premul,
    error::{GaugeError, GaugeResult},
};

/// Which digit strip a wheel is cut from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitVariant {
    Light,
    Dark,
}

/// One digit wheel: horizontal offset from the viewport centre and its strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DigitSlot {
    pub dx: i32,
    pub variant: DigitVariant,
}

/// Pixel constants of the face artwork.
///
/// Defaults match the bundled artwork; a manifest may override any field.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaceLayout {
    /// Straight RGBA of the flat fill beneath every other layer.
    pub backdrop_rgba: [u8; 4],
    /// Vertical distance between consecutive numerals on a digit strip.
    pub digit_pitch_px: i32,
    /// Offset below the centre at which numeral 0 lines up with the window.
    pub digit_zero_offset_px: i32,
    /// Hour tens, hour units, minute tens, minute units.
    pub digit_slots: [DigitSlot; 4],
    /// Needle top-left corner in the rotated frame.
    pub needle_offset_px: [i32; 2],
}

impl Default for FaceLayout {
    fn default() -> Self {
        Self {
            backdrop_rgba: [0, 0, 0, 255],
            digit_pitch_px: 41,
            digit_zero_offset_px: 58,
            digit_slots: [
                DigitSlot {
                    dx: -54,
                    variant: DigitVariant::Light,
                },
                DigitSlot {
                    dx: -27,
                    variant: DigitVariant::Light,
                },
                DigitSlot {
                    dx: -1,
                    variant: DigitVariant::Light,
                },
                DigitSlot {
                    dx: 24,
                    variant: DigitVariant::Dark,
                },
            ],
            needle_offset_px: [20, 20],
        }
    }
}

impl FaceLayout {
    pub fn validate(&self) -> GaugeResult<()> {
        if self.digit_pitch_px <= 0 {
            return Err(GaugeError::validation(format!(
                "digit_pitch_px must be > 0, got {}",
                self.digit_pitch_px
            )));
        }
        Ok(())
    }

    pub fn backdrop(&self) -> Rgba8Premul {
        let [r, g, b, a] = self.backdrop_rgba;
        Rgba8Premul::from_straight_rgba(r, g, b, a)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
