//! Hour/minute to digit-wheel values.

use crate::foundation::core::TimeSample;

/// Two decimal digits shown side by side, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct DigitPair(pub u8, pub u8);

impl DigitPair {
    pub fn first(self) -> u8 {
        self.0
    }

    pub fn second(self) -> u8 {
        self.1
    }

    pub fn to_array(self) -> [u8; 2] {
        [self.0, self.1]
    }
}

/// Split a one- or two-digit value into a pair, reading its decimal form left
/// to right. A single digit is re-homed to the second position behind a zero.
pub fn split_digits(value: u8) -> DigitPair {
    debug_assert!(value < 100, "split_digits expects at most two digits");
    let text = value.to_string();
    let mut digits = [0u8; 2];
    for (slot, ch) in digits.iter_mut().zip(text.bytes()) {
        *slot = ch - b'0';
    }
    if text.len() == 1 {
        digits[1] = digits[0];
        digits[0] = 0;
    }
    DigitPair(digits[0], digits[1])
}

/// Minute wheels: `00` on the hour, otherwise the zero-padded minute.
pub fn minute_digits(minute: u8) -> DigitPair {
    if minute == 0 {
        return DigitPair(0, 0);
    }
    split_digits(minute)
}

/// Hour wheels on a 12-hour face. Both midnight and 23:00 read `12`.
pub fn hour_digits(hour: u8) -> DigitPair {
    if hour == 0 || hour == 23 {
        return DigitPair(1, 2);
    }
    let adjusted = if hour > 12 { hour - 12 } else { hour };
    split_digits(adjusted)
}

/// Both digit pairs for one redraw, hours first.
pub fn time_digits(time: TimeSample) -> (DigitPair, DigitPair) {
    let hours = hour_digits(time.hour());
    let minutes = minute_digits(time.minute());
    tracing::debug!(%time, ?hours, ?minutes, "decomposed time digits");
    (hours, minutes)
}

#[cfg(test)]
#[path = "../../tests/unit/gauge/digits.rs"]
mod tests;
