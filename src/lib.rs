#![warn(clippy::all)]
//! hcookie models a single http cookie and decides when to send it.
//!
//! The goals of this library are:
//!
//! * A cookie entity built on the http crate's uri type.
//! * Wire format parsing that agrees with the matching rules on how
//!   domain and path default.
//! * No ambient state. Matching is pure and the current time is an
//!   argument.
//!
//! ```
//! use hcookie::Cookie;
//!
//! fn main() -> Result<(), hcookie::Error> {
//!     // parse the value of a Set-Cookie header. The reference uri
//!     // provides domain/path defaults for cookies that don't set them.
//!     let cookie = Cookie::parse(
//!         "sid=abc123; Domain=example.com; Path=/api; Secure",
//!         Some("https://www.example.com/api/login"),
//!         true,
//!     )?
//!     .expect("well formed cookie");
//!
//!     // should this cookie go along with a request?
//!     assert!(cookie.matches("https://www.example.com/api/v2")?);
//!     assert!(!cookie.matches("http://www.example.com/api/v2")?);
//!
//!     // the Cookie request header form
//!     assert_eq!(cookie.to_string(), "sid=abc123;");
//!
//!     Ok(())
//! }
//! ```

#[macro_use]
extern crate log;

mod cookie;
mod date;
mod error;
mod matching;
mod parse;
mod uri_ext;

pub use crate::cookie::{Cookie, Expires};
pub use crate::error::Error;
pub use crate::matching::{domain_matches, path_matches};
pub use crate::uri_ext::AsUri;
pub use http;
