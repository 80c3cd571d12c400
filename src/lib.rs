//! Processor for [RFC 6570] URI Templates: parsing, expansion and matching.
//!
//! [RFC 6570]: https://www.rfc-editor.org/rfc/rfc6570.html
//!
//! A template string is parsed once into an immutable [`Template`]. The same
//! value can then be expanded with bindings into a concrete URI, or matched
//! against a concrete URI to recover bindings; matching is the inverse of
//! expansion. Templates are safe to share across threads and to expand or
//! match concurrently with independent [`Context`] values.
//!
//! # Examples
//!
//! Expansion:
//!
//! ```
//! use uri_template::{Context, Template, Value};
//!
//! let template = Template::parse("/users/{username}{?fields*}")?;
//!
//! let mut context = Context::new();
//! context.insert("username", "foo");
//! context.insert("fields", Value::from_assoc([("lang", "en"), ("page", "5")]));
//!
//! assert_eq!(
//!     template.expand(&context),
//!     "/users/foo?lang=en&page=5"
//! );
//! # Ok::<_, uri_template::Error>(())
//! ```
//!
//! Matching:
//!
//! ```
//! use uri_template::{Context, Template, Value};
//!
//! let template = Template::parse("/users{/id}{?fields}")?;
//!
//! let mut values = Context::new();
//! assert!(template.match_uri("/users/42?fields=name,email", Some(&mut values)));
//! assert_eq!(values.get("id"), Some(&Value::String("42".into())));
//! assert_eq!(values.get("fields"), Some(&Value::from_list(["name", "email"])));
//! # Ok::<_, uri_template::Error>(())
//! ```
//!
//! # `std` and `alloc` support
//!
//! This crate supports `no_std` usage; heap allocation (the `alloc` crate)
//! is always required.
//!
//! * `std` feature (**enabled by default**):
//!     + Lets the crate utilize std-specific stuff, such as the
//!       `std::error::Error` trait.
//! * `memchr` feature:
//!     + Accelerates literal search during matching.
//! * `serde` feature:
//!     + Serializes a [`Template`] as its template string and deserializes
//!       it with full validation.
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod ast;
mod chars;
mod error;
mod expand;
mod matcher;
mod modifier;
mod operator;
mod parser;
mod percent_encode;
mod value;

pub use self::ast::{Expression, Literal, Part, Template, Variable};
pub use self::error::{Error, ErrorKind};
pub use self::modifier::Modifier;
pub use self::operator::Operator;
pub use self::value::{Context, Value, ValueType};
