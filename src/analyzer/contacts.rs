//! Contact extraction: first phone number and first email address in page text

use regex::Regex;
use std::sync::LazyLock;

/// Contact details found on a page; empty strings when nothing matched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contacts {
    pub phone: String,
    pub email: String,
}

impl Contacts {
    /// True when neither a phone number nor an email address was found
    pub fn is_empty(&self) -> bool {
        self.phone.is_empty() && self.email.is_empty()
    }
}

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[0-9]{3}[-.]?[0-9]{3}[-.]?[0-9]{4}\b").expect("PHONE_PATTERN regex")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("EMAIL_PATTERN regex")
});

/// Scan `text` for the first phone-like and the first email-like match.
pub fn extract_contacts(text: &str) -> Contacts {
    Contacts {
        phone: PHONE_PATTERN
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        email: EMAIL_PATTERN
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    }
}
