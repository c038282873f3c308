//! Image codec access — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (content sniffing, extension fallback) |
//! | **Encode → JPEG** | `JpegEncoder::new_with_quality` |
//! | **Encode → PNG** | `PngEncoder`, best compression when optimizing |
//!
//! The module is split into:
//! - **Parameters**: [`Quality`] and [`EncodeParams`]
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Asset**: [`ImageAsset`], a decoded input image and where it came from

pub mod asset;
pub mod backend;
mod params;
pub mod rust_backend;

pub use asset::ImageAsset;
pub use backend::{BackendError, ImageBackend};
pub use params::{EncodeParams, Quality};
pub use rust_backend::RustBackend;
