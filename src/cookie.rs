//! The cookie entity.

use crate::date::parse_expiry;
use crate::Error;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::fmt;

/// Separator characters refused in cookie names.
const NAME_SEPARATORS: &[char] = &['=', ',', ';', ' ', '\t', '\r', '\n', '\x0b', '\x0c'];

/// Encode set for cookie values.
/// https://www.rfc-editor.org/rfc/rfc6265#section-4.1.1 + '(', ')'
const COOKIE_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'|')
    .add(b'%')
    .add(b'(')
    .add(b')')
    .add(b',');

/// A single http cookie.
///
/// Holds the name, value, domain, path, expiry and secure flag of one
/// cookie. [`Cookie::parse`] constructs one from the `Set-Cookie` wire
/// form; the `Display` impl serializes back to the `Cookie` request
/// header form (name and value only).
///
/// All fields are owned and matching takes `&self`, so a cookie can be
/// shared freely across threads while being matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: String,
    domain: Option<String>,
    path: String,
    expires: Option<i64>,
    secure: bool,
    encode_value: bool,
}

/// Expiry input to [`Cookie::set_expires`]. Either a unix timestamp or
/// a textual date.
#[derive(Debug, Clone, Copy)]
pub enum Expires<'a> {
    At(i64),
    Text(&'a str),
}

impl From<i64> for Expires<'static> {
    fn from(timestamp: i64) -> Self {
        Expires::At(timestamp)
    }
}

impl<'a> From<&'a str> for Expires<'a> {
    fn from(text: &'a str) -> Self {
        Expires::Text(text)
    }
}

impl Cookie {
    /// Create a new cookie with the given name and value.
    ///
    /// The name is validated. The remaining fields start out at their
    /// defaults: no domain, path `/`, no expiry (a session cookie), not
    /// secure, value encoding on.
    pub fn new(name: &str, value: &str) -> Result<Cookie, Error> {
        let mut cookie = Cookie {
            name: String::new(),
            value: value.to_string(),
            domain: None,
            path: "/".to_string(),
            expires: None,
            secure: false,
            encode_value: true,
        };
        cookie.set_name(name)?;
        Ok(cookie)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the cookie name. The name must not be empty and must not
    /// contain control characters or any of `= , ;` space tab CR LF VT FF.
    pub fn set_name(&mut self, name: &str) -> Result<&mut Self, Error> {
        if name.is_empty() {
            return Err(Error::InvalidFormat("cookie name is empty".into()));
        }
        if name.contains(NAME_SEPARATORS) || name.chars().any(|c| c.is_ascii_control()) {
            return Err(Error::InvalidFormat(format!(
                "cookie name cannot contain these characters: =,; \\t\\r\\n\\x0b\\x0c ({})",
                name
            )));
        }
        self.name = name.to_string();
        Ok(self)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) -> &mut Self {
        self.value = value.to_string();
        self
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn set_domain(&mut self, domain: &str) -> &mut Self {
        self.domain = Some(domain.to_string());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Set the cookie path. An empty path normalizes to `/`.
    pub fn set_path(&mut self, path: &str) -> &mut Self {
        self.path = if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        };
        self
    }

    /// The expiry time as a unix timestamp, or `None` for a session
    /// cookie.
    pub fn expiry_time(&self) -> Option<i64> {
        self.expires
    }

    /// Set the expiry time, from a unix timestamp or a textual date.
    ///
    /// Textual dates are converted to a timestamp here and now; a date
    /// that cannot be converted is an `InvalidArgument` error. A zero
    /// timestamp or empty text is ignored and leaves any previously set
    /// expiry untouched.
    pub fn set_expires<'a, E: Into<Expires<'a>>>(
        &mut self,
        expires: E,
    ) -> Result<&mut Self, Error> {
        match expires.into() {
            Expires::At(0) => {
                trace!("Ignore zero expires: {}", self.name);
            }
            Expires::At(timestamp) => {
                self.expires = Some(timestamp);
            }
            Expires::Text("") => {
                trace!("Ignore empty expires: {}", self.name);
            }
            Expires::Text(text) => match parse_expiry(text) {
                Some(timestamp) => self.expires = Some(timestamp),
                None => {
                    return Err(Error::InvalidArgument(format!(
                        "invalid expires time: {}",
                        text
                    )));
                }
            },
        }
        Ok(self)
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn set_secure(&mut self, secure: bool) -> &mut Self {
        self.secure = secure;
        self
    }

    /// Whether the value is percent-encoded on serialization and
    /// percent-decoded on parse.
    pub fn encodes_value(&self) -> bool {
        self.encode_value
    }

    pub fn set_encode_value(&mut self, encode_value: bool) -> &mut Self {
        self.encode_value = encode_value;
        self
    }

    /// Whether the cookie has expired.
    ///
    /// Always false for a session cookie (no expiry time set).
    pub fn is_expired(&self, now: i64) -> bool {
        matches!(self.expires, Some(expires) if expires < now)
    }

    /// Whether this is a session cookie (no expiry time set).
    pub fn is_session_cookie(&self) -> bool {
        self.expires.is_none()
    }

    /// The request header field name cookies serialize under.
    pub fn field_name(&self) -> &'static str {
        "Cookie"
    }

    /// The full request header line, e.g. `Cookie: foo=bar;`.
    pub fn to_header(&self) -> String {
        format!("{}: {}", self.field_name(), self)
    }
}

/// The `Cookie` request header form: name and value only, no attributes.
impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.encode_value {
            write!(
                f,
                "{}={};",
                self.name,
                utf8_percent_encode(&self.value, COOKIE_VALUE)
            )
        } else {
            write!(f, "{}={};", self.name, self.value)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const VALID_NAMES: &[&str] = &["foo", "Foo", "SESSIONID", "foo_bar-baz.qux", "%c"];

    const INVALID_NAMES: &[&str] = &[
        "",
        "foo=bar",
        "foo,bar",
        "foo;bar",
        "foo bar",
        "foo\tbar",
        "foo\rbar",
        "foo\nbar",
        "foo\x0bbar",
        "foo\x0cbar",
        "foo\x00bar",
    ];

    #[test]
    fn name_validation() {
        for name in VALID_NAMES {
            let cookie = Cookie::new(name, "v").unwrap();
            assert_eq!(cookie.name(), *name);
        }
        for name in INVALID_NAMES {
            let err = Cookie::new(name, "v").unwrap_err();
            assert!(matches!(err, Error::InvalidFormat(_)), "{:?}", name);
        }
    }

    #[test]
    fn reassign_name_revalidates() {
        let mut cookie = Cookie::new("a", "b").unwrap();
        assert!(cookie.set_name("still;bad").is_err());
        assert_eq!(cookie.name(), "a");
        cookie.set_name("better").unwrap();
        assert_eq!(cookie.name(), "better");
    }

    #[test]
    fn expires_from_timestamp() {
        let mut cookie = Cookie::new("a", "b").unwrap();
        assert!(cookie.is_session_cookie());
        cookie.set_expires(1000).unwrap();
        assert_eq!(cookie.expiry_time(), Some(1000));
        assert!(!cookie.is_session_cookie());
    }

    #[test]
    fn expires_from_text() {
        let mut cookie = Cookie::new("a", "b").unwrap();
        cookie.set_expires("Fri, 31 Dec 1999 23:59:59 GMT").unwrap();
        assert_eq!(cookie.expiry_time(), Some(946_684_799));

        let err = cookie.set_expires("never ever").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        // the failed call leaves the previous expiry alone
        assert_eq!(cookie.expiry_time(), Some(946_684_799));
    }

    #[test]
    fn falsy_expires_is_ignored() {
        let mut cookie = Cookie::new("a", "b").unwrap();
        cookie.set_expires(0).unwrap();
        assert!(cookie.is_session_cookie());

        cookie.set_expires(1000).unwrap();
        cookie.set_expires(0).unwrap();
        assert_eq!(cookie.expiry_time(), Some(1000));
        cookie.set_expires("").unwrap();
        assert_eq!(cookie.expiry_time(), Some(1000));
    }

    #[test]
    fn expiry_check() {
        let mut cookie = Cookie::new("a", "b").unwrap();
        // session cookies never expire
        assert!(!cookie.is_expired(i64::MAX));

        cookie.set_expires(1000).unwrap();
        assert!(!cookie.is_expired(999));
        assert!(!cookie.is_expired(1000));
        assert!(cookie.is_expired(1001));
    }

    #[test]
    fn empty_path_normalizes() {
        let mut cookie = Cookie::new("a", "b").unwrap();
        assert_eq!(cookie.path(), "/");
        cookie.set_path("/foo");
        assert_eq!(cookie.path(), "/foo");
        cookie.set_path("");
        assert_eq!(cookie.path(), "/");
    }

    #[test]
    fn serialize_encoded() {
        let cookie = Cookie::new("a", "b c;d").unwrap();
        assert_eq!(cookie.to_string(), "a=b%20c%3Bd;");
    }

    #[test]
    fn serialize_plain() {
        let mut cookie = Cookie::new("a", "b c").unwrap();
        cookie.set_encode_value(false);
        assert_eq!(cookie.to_string(), "a=b c;");
    }

    #[test]
    fn header_line() {
        let cookie = Cookie::new("a", "b").unwrap();
        assert_eq!(cookie.field_name(), "Cookie");
        assert_eq!(cookie.to_header(), "Cookie: a=b;");
    }
}
