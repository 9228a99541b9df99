//! Whether a cookie should be sent with a request.

use crate::uri_ext::{AsUri, UriExt};
use crate::{Cookie, Error};
use std::time::{SystemTime, UNIX_EPOCH};

impl Cookie {
    /// Whether this cookie should be sent with a request against `uri`.
    ///
    /// Convenience form of [`Cookie::matches_at`]: session cookies are
    /// included and expiry is checked against the system clock.
    pub fn matches<U: AsUri>(&self, uri: U) -> Result<bool, Error> {
        self.matches_at(uri, true, unix_now())
    }

    /// Whether this cookie should be sent with a request against `uri`.
    ///
    /// The checks are evaluated in order, first failing check decides:
    ///
    /// 1. The uri must be a valid http or https uri, or the call fails.
    /// 2. A secure cookie is not sent over plain http.
    /// 3. An expired cookie is not sent.
    /// 4. A session cookie is not sent when `match_session_cookies` is
    ///    off.
    /// 5. The cookie domain must match the uri host.
    /// 6. The cookie path must be a prefix of the uri path.
    ///
    /// The cookie must have a domain bound (set explicitly or defaulted
    /// from the reference uri in [`Cookie::parse`]) for matching to be
    /// meaningful; an unbound domain is an `InvalidArgument` error.
    pub fn matches_at<U: AsUri>(
        &self,
        uri: U,
        match_session_cookies: bool,
        now: i64,
    ) -> Result<bool, Error> {
        let uri = uri.as_uri()?;
        uri.ensure_http()?;

        if self.is_secure() && !uri.is_secure() {
            trace!("No match, secure cookie for insecure uri: {}", uri);
            return Ok(false);
        }
        if self.is_expired(now) {
            trace!("No match, cookie is expired: {}", self.name());
            return Ok(false);
        }
        if self.is_session_cookie() && !match_session_cookies {
            trace!("No match, session cookies are off: {}", self.name());
            return Ok(false);
        }

        let domain = self.domain().unwrap_or("");
        let host = uri.host().unwrap_or("");
        if !domain_matches(domain, host)? {
            trace!("No match, domain {} for host: {}", domain, host);
            return Ok(false);
        }

        if !path_matches(self.path(), uri.path())? {
            trace!("No match, path {} for: {}", self.path(), uri.path());
            return Ok(false);
        }

        Ok(true)
    }
}

/// Check if a cookie domain matches a host name.
///
/// The comparison is case insensitive and a leading `.` on the cookie
/// domain is ignored, so `.example.com` and `example.com` behave the
/// same. The host matches on equality or on a `.` bounded suffix:
/// `example.com` matches `www.example.com` but not `notexample.com`.
pub fn domain_matches(cookie_domain: &str, host: &str) -> Result<bool, Error> {
    if cookie_domain.is_empty() {
        return Err(Error::InvalidArgument("cookie domain is empty".into()));
    }
    if host.is_empty() {
        return Err(Error::InvalidArgument("host is empty".into()));
    }

    let cookie_domain = cookie_domain.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();

    let cookie_domain = cookie_domain.strip_prefix('.').unwrap_or(&cookie_domain);

    Ok(host == cookie_domain || host.ends_with(&format!(".{}", cookie_domain)))
}

/// Check if a cookie path matches a request path.
///
/// An empty request path counts as `/`. The test is a literal prefix
/// match, not segment aware: `/foo` matches `/foobar`. That over-matches,
/// and is the historical behavior kept on purpose.
pub fn path_matches(cookie_path: &str, path: &str) -> Result<bool, Error> {
    if cookie_path.is_empty() {
        return Err(Error::InvalidArgument("cookie path is empty".into()));
    }

    let path = if path.is_empty() { "/" } else { path };

    Ok(path.starts_with(cookie_path))
}

fn unix_now() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}
