use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters stripped from free text: quotes, statement separator,
/// comment dash and backslash escape
static SQL_METACHARACTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)['";\-\\]"#).unwrap());

/// `local@domain.tld` where no part contains `@` or whitespace
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Input cleaning and format checks for untrusted text
///
/// Sanitizing is defense in depth for display and storage. It is not what
/// keeps SQL safe: credential lookups always bind values as statement
/// parameters (see [`crate::store::SqlCredentialStore`]).
pub struct Sanitizer;

impl Sanitizer {
    /// Cleans free-text input
    ///
    /// Empty input is returned as-is. Otherwise `<` and `>` become `&lt;`
    /// and `&gt;`, the SQL metacharacters `' " ; - \` are removed, and
    /// surrounding whitespace is trimmed. Removal runs after encoding, so
    /// the entities lose their closing `;` (`<b>` becomes `&ltb&gt`).
    ///
    /// # Example
    /// ```
    /// use safevault::security::Sanitizer;
    ///
    /// assert_eq!(Sanitizer::sanitize("' OR 1=1 --"), "OR 1=1");
    ///
    /// let clean = Sanitizer::sanitize("<script>alert(1)</script>");
    /// assert_eq!(clean, "&ltscript&gtalert(1)&lt/script&gt");
    /// ```
    pub fn sanitize(input: &str) -> Cow<'_, str> {
        if input.is_empty() {
            return Cow::Borrowed(input);
        }

        let encoded = input.replace('<', "&lt;").replace('>', "&gt;");
        let stripped = SQL_METACHARACTERS.replace_all(&encoded, "");

        Cow::Owned(stripped.trim().to_string())
    }

    /// [`Sanitizer::sanitize`] for optional form fields; `None` stays `None`
    pub fn sanitize_option(input: Option<&str>) -> Option<Cow<'_, str>> {
        input.map(Self::sanitize)
    }

    /// Liberal email format check
    ///
    /// Not RFC 5322: anything shaped like `x@y.z` without `@` or whitespace
    /// inside the parts passes, including Unicode letters and doubled dots.
    ///
    /// # Example
    /// ```
    /// use safevault::security::Sanitizer;
    ///
    /// assert!(Sanitizer::is_valid_email("user@example.com"));
    /// assert!(!Sanitizer::is_valid_email("not-an-email"));
    /// assert!(!Sanitizer::is_valid_email("  "));
    /// ```
    pub fn is_valid_email(email: &str) -> bool {
        if email.trim().is_empty() {
            return false;
        }

        EMAIL_REGEX.is_match(email)
    }

    pub fn is_valid_email_option(email: Option<&str>) -> bool {
        email.is_some_and(Self::is_valid_email)
    }
}
