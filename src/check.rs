//! Check-digit computation and verification.
//!
//! A VIN carries a check digit at position nine, derived from a weighted
//! checksum over the other sixteen characters. Letters contribute through a
//! transliteration table; the letters I, O, and Q never appear in a VIN and
//! fail verification outright.

/// Letter values for the weighted sum, indexed A = 0 through Z = 25.
///
/// I, O, and Q hold the marker value -1.
const TRANSLITERATION: [i32; 26] = [
    1, 2, 3, 4, 5, 6, 7, 8, -1, 1, 2, 3, 4, 5, -1, 7, -1, 9, 2, 3, 4, 5, 6, 7, 8, 9,
];

/// Per-position weights. Position 8 holds the check digit itself and is
/// skipped during accumulation.
const WEIGHTS: [i32; 17] = [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];

/// Verify a VIN against its embedded check digit.
///
/// Matching is case-insensitive. Returns `false` for input that is not
/// exactly 17 bytes long or contains a character outside `[0-9A-Za-z]`.
pub fn validate(vin: &str) -> bool {
    corrected(vin).0
}

/// Verify a VIN, producing a corrected copy when the check digit is wrong.
///
/// Returns `(true, Some(vin))` for a valid VIN, unchanged, and
/// `(false, Some(fixed))` when the alphabet is clean but the check digit
/// mismatches, with `fixed` differing from the input only at position 8. The
/// second element is thus always "the VIN with a correct check digit". Input
/// of the wrong length, or containing a character outside `[0-9A-Za-z]`,
/// yields `(false, None)`: no correction is possible.
pub fn corrected(vin: &str) -> (bool, Option<String>) {
    let bytes = vin.as_bytes();
    if bytes.len() != 17 {
        return (false, None);
    }

    let mut upper = [0u8; 17];
    for (u, b) in upper.iter_mut().zip(bytes) {
        *u = b.to_ascii_uppercase();
    }

    let mut sum = 0;
    for (i, &b) in upper.iter().enumerate() {
        if i == 8 {
            // The check digit is excluded from its own sum.
            continue;
        }
        let value = match b {
            b'0'..=b'9' => i32::from(b - b'0'),
            b'A'..=b'Z' => TRANSLITERATION[usize::from(b - b'A')],
            _ => return (false, None),
        };
        if value < 0 {
            // I, O, or Q.
            return (false, None);
        }
        sum += value * WEIGHTS[i];
    }

    let expected = match sum % 11 {
        10 => b'X',
        r => b'0' + r as u8,
    };

    if upper[8] == expected {
        (true, Some(vin.to_owned()))
    } else {
        let mut fixed = bytes.to_owned();
        fixed[8] = expected;
        // Every byte was verified ASCII alphanumeric above.
        (false, Some(String::from_utf8(fixed).unwrap()))
    }
}
