//! Model-year derivation from the year code at VIN position ten.
//!
//! Year codes repeat on a thirty-year cycle, so most codes name two candidate
//! years. [`resolve_model_year`] picks between them under the assumption that
//! a vehicle is at most one model year ahead of a caller-supplied reference
//! year.

/// Candidate model years for a year code, most recent first.
///
/// Digits 1-9 and the letters A-Y less I, O, Q, and U carry candidates; `A`
/// is the only single-candidate code. Everything else (including `0` and `Z`)
/// is invalid at this position.
const fn candidates(code: u8) -> &'static [i32] {
    match code {
        b'A' => &[2010],
        b'B' => &[2011, 1981],
        b'C' => &[2012, 1982],
        b'D' => &[2013, 1983],
        b'E' => &[2014, 1984],
        b'F' => &[2015, 1985],
        b'G' => &[2016, 1986],
        b'H' => &[2017, 1987],
        b'J' => &[2018, 1988],
        b'K' => &[2019, 1989],
        b'L' => &[2020, 1990],
        b'M' => &[2021, 1991],
        b'N' => &[2022, 1992],
        b'P' => &[2023, 1993],
        b'R' => &[2024, 1994],
        b'S' => &[2025, 1995],
        b'T' => &[2026, 1996],
        b'V' => &[2027, 1997],
        b'W' => &[2028, 1998],
        b'X' => &[2029, 1999],
        b'Y' => &[2030, 2000],
        b'1' => &[2031, 2001],
        b'2' => &[2032, 2002],
        b'3' => &[2033, 2003],
        b'4' => &[2034, 2004],
        b'5' => &[2035, 2005],
        b'6' => &[2036, 2006],
        b'7' => &[2037, 2007],
        b'8' => &[2038, 2008],
        b'9' => &[2039, 2009],
        _ => &[],
    }
}

/// Derive a model year from a VIN's year code.
///
/// When the code names two candidates, the more recent one is chosen unless
/// it lies more than one year past `reference_year` (normally the current
/// calendar year), in which case the candidate thirty years earlier is
/// returned instead.
///
/// Returns `0` when `vin` is not exactly 17 bytes long or position ten does
/// not hold a valid year code.
pub fn resolve_model_year(vin: &str, reference_year: i32) -> i32 {
    let bytes = vin.as_bytes();
    if bytes.len() != 17 {
        return 0;
    }

    match *candidates(bytes[9]) {
        [only] => only,
        [newer, older] => {
            let max_year = reference_year + 1;
            if newer > max_year { older } else { newer }
        }
        _ => 0,
    }
}
