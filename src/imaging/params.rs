//! Parameter types for encode operations.
//!
//! These describe *what* to encode, not *how*. The quality search and the
//! output writer build them; the [`backend`](super::backend) turns them into
//! codec settings. Keeping them separate lets tests swap in a mock backend
//! without touching search logic.

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How to encode an image.
///
/// `optimize` asks the codec to spend more effort for a smaller file where it
/// has such a knob (PNG compression level). JPEG output is only driven by
/// `quality`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeParams {
    pub quality: Quality,
    pub optimize: bool,
}

impl EncodeParams {
    pub fn new(quality: Quality, optimize: bool) -> Self {
        Self { quality, optimize }
    }
}
