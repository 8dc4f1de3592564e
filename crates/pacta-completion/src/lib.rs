//! Completion endpoint client
//!
//! This crate consumes the text-completion endpoint: one streaming request
//! per prompt, chunks concatenated in arrival order into a single result
//! string. Chunks are raw bytes with no framing and may split UTF-8
//! sequences, so decoding is stateful ([`decode::Utf8StreamDecoder`]).
//!
//! The provider is a trait ([`CompletionProvider`]) so the vendor can be
//! swapped without touching the contract workflow; [`HttpCompletionClient`]
//! is the canonical streaming implementation. There is no retry and no
//! partial-result caching: a mid-stream failure aborts the whole fetch.

pub mod decode;
mod error;
mod http;
mod provider;
pub mod sanitize;

pub use decode::Utf8StreamDecoder;
pub use error::CompletionError;
pub use http::HttpCompletionClient;
pub use provider::CompletionProvider;
