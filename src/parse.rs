//! Parsing of the `Set-Cookie` wire form.

use crate::date::parse_expiry;
use crate::uri_ext::{AsUri, UriExt};
use crate::{Cookie, Error};
use percent_encoding::percent_decode_str;

impl Cookie {
    /// Parse a cookie from the wire form of a `Set-Cookie` header.
    ///
    /// `ref_uri` supplies default values for fields the cookie text does
    /// not carry: the domain defaults to the uri host and the path to the
    /// directory component of the uri path (up to and excluding the last
    /// `/`). Raw text reference uris are accepted and assumed http when
    /// they have no scheme.
    ///
    /// Malformed cookie text is a routine outcome on the open internet,
    /// so it is not an error: `Ok(None)` is returned when the first `;`
    /// separated part has no `=`, or when the name is empty after
    /// trimming. Anything else degrades gracefully. Unrecognized
    /// attributes are ignored and an unparseable `Expires` leaves the
    /// expiry unset.
    ///
    /// `encode_value` percent-decodes the value here and is remembered on
    /// the cookie, so serializing encodes it again.
    pub fn parse<U: AsUri>(
        raw: &str,
        ref_uri: Option<U>,
        encode_value: bool,
    ) -> Result<Option<Cookie>, Error> {
        let ref_uri = match &ref_uri {
            Some(u) => Some(u.as_uri()?),
            None => None,
        };

        parse_wire(raw, ref_uri.as_ref(), encode_value)
    }
}

fn parse_wire(
    raw: &str,
    ref_uri: Option<&http::Uri>,
    encode_value: bool,
) -> Result<Option<Cookie>, Error> {
    let mut parts = raw.split(';');

    // the first part must be the name=value pair
    let first = parts.next().unwrap_or("");
    let (name, value) = match split_pair(first) {
        Some(v) => v,
        None => {
            debug!("No name=value in first part of cookie: {}", raw);
            return Ok(None);
        }
    };

    let name = name.trim();
    let value = value.trim();
    let value = if encode_value {
        percent_decode_str(value).decode_utf8_lossy().to_string()
    } else {
        value.to_string()
    };

    // default domain and path from the reference uri
    let (mut domain, mut path) = match ref_uri {
        Some(uri) => (
            uri.host().unwrap_or("").to_string(),
            uri.directory_path().to_string(),
        ),
        None => (String::new(), String::new()),
    };

    let mut expires = None;
    let mut secure = false;

    for part in parts {
        let part = part.trim();

        if part.eq_ignore_ascii_case("secure") {
            secure = true;
            continue;
        }

        let (k, v) = match split_pair(part) {
            Some(v) => v,
            // value-less attributes such as HttpOnly
            None => continue,
        };

        match k.to_ascii_lowercase().as_str() {
            "expires" => match parse_expiry(v) {
                Some(timestamp) => expires = Some(timestamp),
                None => debug!("Ignore unparseable expires ({}): {}", v, name),
            },
            "path" => path = v.to_string(),
            "domain" => domain = v.to_string(),
            _ => trace!("Ignore unknown cookie attribute ({}): {}", k, name),
        }
    }

    if name.is_empty() {
        debug!("Empty cookie name: {}", raw);
        return Ok(None);
    }

    let mut cookie = Cookie::new(name, &value)?;
    if !domain.is_empty() {
        cookie.set_domain(&domain);
    }
    if let Some(timestamp) = expires {
        cookie.set_expires(timestamp)?;
    }
    cookie
        .set_path(&path)
        .set_secure(secure)
        .set_encode_value(encode_value);

    Ok(Some(cookie))
}

/// Split on the first '=' only. The value may itself contain '='.
fn split_pair(part: &str) -> Option<(&str, &str)> {
    let idx = part.find('=')?;
    Some((&part[..idx], &part[idx + 1..]))
}
