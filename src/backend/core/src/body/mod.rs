//! Request body decoding.
//!
//! The decoder turns the raw request payload into a [`DecodedBody`], a
//! read-only string-keyed mapping of JSON values. It runs once per request;
//! everything downstream only ever borrows the result.

pub mod decoder;

pub use decoder::{BodyDecoder, DecodeError, DecodeErrorKind, DecodedBody};
