//! Field patterns shared by every form schema.

use once_cell::sync::Lazy;
use regex::Regex;

/// `000.000.000-00` or eleven bare digits.
pub static CPF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{3}\.\d{3}\.\d{3}-\d{2}|\d{11})$").expect("valid cpf regex")
});
/// 24-hour `H:MM` or `HH:MM`.
pub static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):[0-5][0-9]$").expect("valid time regex"));
pub static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));
/// Optional `(DD)` area code followed by a 4+4 or 5+4 digit number.
pub static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\(\d{2}\)\s?)?(\d{4,5}-?\d{4})$").expect("valid phone regex")
});
pub static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub fn is_cpf(value: &str) -> bool {
    CPF_RE.is_match(value)
}

pub fn is_time(value: &str) -> bool {
    TIME_RE.is_match(value)
}

pub fn is_date(value: &str) -> bool {
    DATE_RE.is_match(value)
}

pub fn is_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::{is_cpf, is_date, is_email, is_phone, is_time};

    #[test]
    fn cpf_accepts_masked_and_bare_digits() {
        assert!(is_cpf("123.456.789-00"));
        assert!(is_cpf("12345678900"));
        assert!(!is_cpf("123456789"));
        assert!(!is_cpf("1234567890"));
        assert!(!is_cpf("abc.def.ghi-00"));
        assert!(!is_cpf("123.456.789-0"));
    }

    #[test]
    fn time_accepts_single_digit_hours_and_rejects_out_of_range() {
        assert!(is_time("10:00"));
        assert!(is_time("9:05"));
        assert!(is_time("23:59"));
        assert!(!is_time("24:00"));
        assert!(!is_time("25:99"));
        assert!(!is_time("10:60"));
    }

    #[test]
    fn date_requires_iso_shape() {
        assert!(is_date("2025-07-15"));
        assert!(!is_date("15/07/2025"));
        assert!(!is_date("2025-7-15"));
    }

    #[test]
    fn phone_accepts_common_brazilian_shapes() {
        assert!(is_phone("(11) 99999-1111"));
        assert!(is_phone("(11)999991111"));
        assert!(is_phone("3333-4444"));
        assert!(!is_phone("99-1"));
    }

    #[test]
    fn email_requires_local_part_and_dotted_domain() {
        assert!(is_email("admin@cartorio.dev"));
        assert!(!is_email("admin@cartorio"));
        assert!(!is_email("admin cartorio@dev.br"));
    }
}
