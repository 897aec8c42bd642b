/// Formats a duration given in milliseconds, picking the unit from its magnitude.
pub fn time(ms: f64) -> String {
    if ms < 1e-6 {
        format!("{:>6} ps", short(ms * 1e9))
    } else if ms < 1e-3 {
        format!("{:>6} ns", short(ms * 1e6))
    } else if ms < 1.0 {
        format!("{:>6} µs", short(ms * 1e3))
    } else if ms < 1e3 {
        format!("{:>6} ms", short(ms))
    } else {
        format!("{:>6} s", short(ms / 1e3))
    }
}

pub fn short(n: f64) -> String {
    if n < 10.0 {
        format!("{:.4}", n)
    } else if n < 100.0 {
        format!("{:.3}", n)
    } else if n < 1000.0 {
        format!("{:.2}", n)
    } else if n < 10000.0 {
        format!("{:.1}", n)
    } else {
        format!("{:.0}", n)
    }
}

/// Format a number with thousands separators.
// Based on the corresponding libtest functionality, see
// https://github.com/rust-lang/rust/blob/557359f92512ca88b62a602ebda291f17a953002/library/test/src/bench.rs#L87-L109
fn thousands_sep(mut n: u64, sep: char) -> String {
    use std::fmt::Write;
    let mut output = String::new();
    let mut trailing = false;
    for &pow in &[18, 15, 12, 9, 6, 3, 0] {
        let base = 10_u64.pow(pow);
        if pow == 0 || trailing || n / base != 0 {
            // Writing to a String cannot fail.
            let _ = if !trailing {
                write!(output, "{}", n / base)
            } else {
                write!(output, "{:03}", n / base)
            };
            if pow != 0 {
                output.push(sep);
            }
            trailing = true;
        }
        n %= base;
    }

    output
}

/// Format a count, including thousands-separators.
pub fn integer(n: u64) -> String {
    thousands_sep(n, ',')
}

/// Describes a value by its size once it is too long to print usefully.
pub fn digits(count: u64) -> String {
    if count == 1 {
        String::from("1 digit")
    } else {
        format!("{} digits", integer(count))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn short_max_len() {
        let mut float = 1.0;
        while float < 999_999.9 {
            let string = short(float);
            println!("{}", string);
            assert!(string.len() <= 6);
            float *= 2.0;
        }
    }

    #[test]
    fn time_picks_unit() {
        assert_eq!(time(0.000_5), "500.00 ns");
        assert_eq!(time(0.25), "250.00 µs");
        assert_eq!(time(12.5), "12.500 ms");
        assert_eq!(time(2_500.0), "2.5000 s");
    }

    #[test]
    fn integer_thousands_sep() {
        assert_eq!(integer(140_352_319), "140,352,319");
        assert_eq!(integer(29_860_703), "29,860,703");
        assert_eq!(integer(0), "0");
        assert_eq!(integer(1_000_000_000_000), "1,000,000,000,000");
    }

    #[test]
    fn digit_counts() {
        assert_eq!(digits(1), "1 digit");
        assert_eq!(digits(208_988), "208,988 digits");
    }
}
