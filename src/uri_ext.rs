use crate::Error;

const DEFAULT_SCHEME: &str = "http";

/// Things that can act as the uri of a request. Either an already parsed
/// `http::Uri`, or raw text. Raw text without a scheme is assumed http.
pub trait AsUri {
    fn as_uri(&self) -> Result<http::Uri, Error>;
}

impl AsUri for http::Uri {
    fn as_uri(&self) -> Result<http::Uri, Error> {
        Ok(self.clone())
    }
}

impl<'a> AsUri for &'a http::Uri {
    fn as_uri(&self) -> Result<http::Uri, Error> {
        Ok((*self).clone())
    }
}

impl<'a> AsUri for &'a str {
    fn as_uri(&self) -> Result<http::Uri, Error> {
        let uri = if self.contains("://") {
            self.parse()?
        } else {
            // no scheme, assume http
            format!("{}://{}", DEFAULT_SCHEME, self).parse()?
        };
        Ok(uri)
    }
}

impl AsUri for String {
    fn as_uri(&self) -> Result<http::Uri, Error> {
        self.as_str().as_uri()
    }
}

pub(crate) trait UriExt {
    /// Tell if this uri is using a secure protocol (i.e. https).
    fn is_secure(&self) -> bool;
    /// Check that the uri is usable for cookie matching, which means an
    /// http or https scheme.
    fn ensure_http(&self) -> Result<(), Error>;
    /// The directory component of the path, up to and excluding the
    /// last '/'.
    fn directory_path(&self) -> &str;
}

impl UriExt for http::Uri {
    fn is_secure(&self) -> bool {
        self.scheme_str() == Some("https")
    }

    fn ensure_http(&self) -> Result<(), Error> {
        match self.scheme_str() {
            Some("http") | Some("https") => Ok(()),
            _ => Err(Error::InvalidArgument(format!(
                "not a valid http or https uri: {}",
                self
            ))),
        }
    }

    fn directory_path(&self) -> &str {
        let path = self.path();
        match path.rfind('/') {
            Some(idx) => &path[..idx],
            None => "",
        }
    }
}
