//! Contact form validation and submission state

use std::sync::LazyLock;

use regex::Regex;

use super::captcha::Captcha;

/// Browser whitespace (`\s` in a page script): WhiteSpace plus LineTerminator,
/// as a regex class body
const JS_SPACE_CLASS: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^[^{JS_SPACE_CLASS}@]+@[^{JS_SPACE_CLASS}@]+\.[^{JS_SPACE_CLASS}@]+$"
    ))
    .expect("static regex must compile")
});

/// Separators a visitor may type between phone digits
static PHONE_SEPARATORS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"[{JS_SPACE_CLASS}\-+()]")).expect("static regex must compile")
});

/// Whitespace as the browser's `trim()` and `parseInt` see it. Unlike
/// `char::is_whitespace` this includes U+FEFF and excludes U+0085.
pub fn is_js_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Inputs checked on submit, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Captcha,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Captcha,
    ];

    /// Id of the `<input>` element on the page
    pub fn input_id(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Captcha => "captchaInput",
        }
    }
}

/// Raw input values at submit time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub captcha: String,
}

impl FormInput {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Captcha => &self.captcha,
        }
    }
}

pub fn valid_name(value: &str) -> bool {
    // Length in UTF-16 units, as the browser counts it
    value.trim_matches(is_js_space).encode_utf16().count() > 1
}

pub fn valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn valid_phone(value: &str) -> bool {
    let digits = PHONE_SEPARATORS_RE.replace_all(value, "");
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Per-field verdicts for one submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
    verdicts: [(FormField, bool); 4],
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.verdicts.iter().all(|(_, ok)| *ok)
    }

    /// Every field with its verdict, so callers can both set and clear errors
    pub fn verdicts(&self) -> impl Iterator<Item = (FormField, bool)> + '_ {
        self.verdicts.iter().copied()
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.verdicts
            .iter()
            .filter(|(_, ok)| !*ok)
            .map(|(field, _)| *field)
    }

    pub fn is_field_valid(&self, field: FormField) -> bool {
        self.verdicts
            .iter()
            .any(|(f, ok)| *f == field && *ok)
    }
}

/// Check every field. All fields are always evaluated so each error marker
/// can be updated in one pass.
pub fn validate(input: &FormInput, captcha: &Captcha) -> ValidationReport {
    let verdict = |field: FormField| {
        let value = input.value(field);
        let ok = match field {
            FormField::Name => valid_name(value),
            FormField::Email => valid_email(value),
            FormField::Phone => valid_phone(value),
            FormField::Captcha => captcha.accepts(value),
        };
        (field, ok)
    };
    ValidationReport {
        verdicts: FormField::ALL.map(verdict),
    }
}

/// What the page should do after a submit event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Mark the invalid fields and stay put
    Rejected(ValidationReport),
    /// Swap the button to its sending state and schedule completion
    Sending(ValidationReport),
    /// A submission is already in flight
    Ignored,
}

/// Contact form state for one page load
#[derive(Debug, Clone)]
pub struct ContactForm {
    captcha: Captcha,
    sending: bool,
}

impl ContactForm {
    pub fn new(captcha: Captcha) -> Self {
        Self {
            captcha,
            sending: false,
        }
    }

    pub fn captcha(&self) -> &Captcha {
        &self.captcha
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn submit(&mut self, input: &FormInput) -> SubmitOutcome {
        if self.sending {
            return SubmitOutcome::Ignored;
        }
        let report = validate(input, &self.captcha);
        if report.is_valid() {
            self.sending = true;
            SubmitOutcome::Sending(report)
        } else {
            SubmitOutcome::Rejected(report)
        }
    }

    /// Simulated delivery finished. The captcha keeps its operands.
    pub fn complete(&mut self) {
        self.sending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_input() -> FormInput {
        FormInput {
            name: "Анна".to_string(),
            email: "anna@example.ru".to_string(),
            phone: "+7 (999) 123-45-67".to_string(),
            captcha: "7".to_string(),
        }
    }

    #[test]
    fn test_name_rule() {
        assert!(valid_name("Al"));
        assert!(valid_name("  Ян  "));
        assert!(!valid_name("A"));
        assert!(!valid_name("   A   "));
        assert!(!valid_name(""));
        // One astral character is two UTF-16 units
        assert!(valid_name("😀"));
        // Trimmed like the browser: BOM and ideographic space go, NEL stays
        assert!(!valid_name("\u{FEFF}A"));
        assert!(!valid_name("\u{3000}A\u{2028}"));
        assert!(valid_name("\u{85}A"));
    }

    #[test]
    fn test_js_space_set() {
        for c in ['\t', '\u{0B}', '\u{A0}', '\u{2007}', '\u{2029}', '\u{FEFF}'] {
            assert!(is_js_space(c), "{:?}", c);
        }
        for c in ['\u{85}', '\u{180E}', '\u{200B}', 'a'] {
            assert!(!is_js_space(c), "{:?}", c);
        }
    }

    #[test]
    fn test_email_rule() {
        assert!(valid_email("a@b.c"));
        assert!(valid_email("first.last@mail.example.com"));
        assert!(!valid_email("a@b"));
        assert!(!valid_email("a b@c.d"));
        assert!(!valid_email("@b.c"));
        assert!(!valid_email("a@@b.c"));
        assert!(!valid_email(""));
        assert!(!valid_email("a\u{FEFF}@b.c"));
        assert!(!valid_email("a@b.c\u{A0}d"));
        assert!(valid_email("a\u{85}@b.c"));
    }

    #[test]
    fn test_phone_rule() {
        assert!(valid_phone("89991234567"));
        assert!(valid_phone("+7 (999) 123-45-67"));
        assert!(valid_phone(" 123 "));
        assert!(!valid_phone(""));
        assert!(!valid_phone("+ ( ) -"));
        assert!(!valid_phone("123a"));
        assert!(!valid_phone("8.999.123"));
        assert!(!valid_phone("١٢٣"));
        assert!(valid_phone("12\u{FEFF}3"));
        assert!(valid_phone("\u{A0}8 999\u{2009}123"));
        assert!(!valid_phone("12\u{85}3"));
    }

    #[test]
    fn test_validate_all_good() {
        let report = validate(&good_input(), &Captcha::from_operands(3, 4));
        assert!(report.is_valid());
        assert_eq!(report.invalid_fields().count(), 0);
    }

    #[test]
    fn test_validate_reports_every_bad_field() {
        let input = FormInput {
            name: "A".to_string(),
            email: "nope".to_string(),
            phone: "call me".to_string(),
            captcha: "8".to_string(),
        };
        let report = validate(&input, &Captcha::from_operands(3, 4));
        assert!(!report.is_valid());
        assert_eq!(report.invalid_fields().collect::<Vec<_>>(), FormField::ALL.to_vec());
    }

    #[test]
    fn test_validate_captcha_only() {
        let mut input = good_input();
        input.captcha = "6".to_string();
        let report = validate(&input, &Captcha::from_operands(3, 4));
        assert_eq!(report.invalid_fields().collect::<Vec<_>>(), vec![FormField::Captcha]);
        assert!(report.is_field_valid(FormField::Name));
        assert!(!report.is_field_valid(FormField::Captcha));
        assert_eq!(report.verdicts().count(), 4);
    }

    #[test]
    fn test_submit_cycle() {
        let mut form = ContactForm::new(Captcha::from_operands(3, 4));

        let mut bad = good_input();
        bad.email.clear();
        assert!(matches!(form.submit(&bad), SubmitOutcome::Rejected(_)));
        assert!(!form.is_sending());

        assert!(matches!(form.submit(&good_input()), SubmitOutcome::Sending(_)));
        assert!(form.is_sending());
        assert_eq!(form.submit(&good_input()), SubmitOutcome::Ignored);

        form.complete();
        assert!(!form.is_sending());
        assert_eq!(form.captcha().answer(), 7);
        assert!(matches!(form.submit(&good_input()), SubmitOutcome::Sending(_)));
    }

    #[test]
    fn test_input_ids() {
        let ids: Vec<_> = FormField::ALL.iter().map(|f| f.input_id()).collect();
        assert_eq!(ids, ["name", "email", "phone", "captchaInput"]);
    }
}
