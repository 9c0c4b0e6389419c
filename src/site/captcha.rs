//! Arithmetic challenge shown under the contact form

use rand::Rng;

use super::form::is_js_space;

/// `a + b` with both operands drawn once per page load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Captcha {
    a: u32,
    b: u32,
}

impl Captcha {
    /// Draw both operands from `1..=max`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, max: u32) -> Self {
        let max = max.max(1);
        Self {
            a: rng.gen_range(1..=max),
            b: rng.gen_range(1..=max),
        }
    }

    pub fn from_operands(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    pub fn operands(&self) -> (u32, u32) {
        (self.a, self.b)
    }

    pub fn answer(&self) -> i64 {
        self.a as i64 + self.b as i64
    }

    /// Label text placed above the answer input
    pub fn prompt(&self) -> String {
        format!("Сколько будет {} + {}?", self.a, self.b)
    }

    /// Whether the visitor's raw input solves the challenge.
    pub fn accepts(&self, input: &str) -> bool {
        parse_int(input) == Some(self.answer())
    }
}

/// Parse an integer the way the browser's `parseInt` does without a radix.
///
/// Leading whitespace is skipped, an optional sign is honoured, a `0x`/`0X`
/// prefix switches to hexadecimal, and parsing stops at the first character
/// that is not a digit. Returns `None` when no digit was read or the value
/// does not fit in an `i64`.
pub fn parse_int(input: &str) -> Option<i64> {
    let s = input.trim_start_matches(is_js_space);
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: i64 = 0;
    let mut any = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        value = value.checked_mul(radix as i64)?.checked_add(d as i64)?;
        any = true;
    }

    if !any {
        return None;
    }
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_operands_in_range() {
        let mut rng = SmallRng::seed_from_u64(99);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..2000 {
            let captcha = Captcha::generate(&mut rng, 10);
            let (a, b) = captcha.operands();
            assert!((1..=10).contains(&a));
            assert!((1..=10).contains(&b));
            seen_min |= a == 1 || b == 1;
            seen_max |= a == 10 || b == 10;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_zero_max_still_valid() {
        let captcha = Captcha::generate(&mut SmallRng::seed_from_u64(1), 0);
        assert_eq!(captcha.operands(), (1, 1));
    }

    #[test]
    fn test_prompt() {
        let captcha = Captcha::from_operands(3, 7);
        assert_eq!(captcha.prompt(), "Сколько будет 3 + 7?");
        assert_eq!(captcha.answer(), 10);
    }

    #[test]
    fn test_accepts() {
        let captcha = Captcha::from_operands(4, 5);
        assert!(captcha.accepts("9"));
        assert!(captcha.accepts("  9 "));
        assert!(captcha.accepts("9 apples"));
        assert!(captcha.accepts("+9"));
        assert!(captcha.accepts("0x9"));
        assert!(!captcha.accepts("10"));
        assert!(!captcha.accepts(""));
        assert!(!captcha.accepts("nine"));
        assert!(!captcha.accepts("-9"));
    }

    #[test]
    fn test_parse_int_like_browser() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("\t\n 42"), Some(42));
        assert_eq!(parse_int("-17"), Some(-17));
        assert_eq!(parse_int("12.9"), Some(12));
        assert_eq!(parse_int("3e5"), Some(3));
        assert_eq!(parse_int("0x1F"), Some(31));
        assert_eq!(parse_int("0Xg"), None);
        assert_eq!(parse_int("007"), Some(7));
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int(" + 5"), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("99999999999999999999999"), None);
        // Browser whitespace, not Rust's
        assert_eq!(parse_int("\u{FEFF}9"), Some(9));
        assert_eq!(parse_int("\u{3000}\u{2028}-7"), Some(-7));
        assert_eq!(parse_int("\u{85}9"), None);
    }
}
