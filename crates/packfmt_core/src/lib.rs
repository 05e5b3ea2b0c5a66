//! Compact binary serialization driven by a textual format descriptor.
//!
//! A format string such as `?c[i]{c:i}` is parsed once into a [`codec::Format`]
//! and then reused to encode value sequences into little-endian bytes and to
//! decode them back.

/// Descriptor grammar, value model, encoder and decoder.
pub mod codec;
