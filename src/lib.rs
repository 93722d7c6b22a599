//! # pixedit
//!
//! A small image editor: load a raster image, apply pixel-level transforms
//! (resize, crop, border expansion, vignette), and export to any of six
//! container formats. Ships as a library plus a thin CLI binary.
//!
//! # Architecture: Buffer → Transform → Encode
//!
//! Everything flows through one data type, the RGBA [`buffer::PixelBuffer`]:
//!
//! ```text
//! 1. Load       file      →  PixelBuffer     (image crate decoders)
//! 2. Transform  buffer    →  buffer          (pure functions, chainable)
//! 3. Encode     buffer    →  bytes           (registry-dispatched encoder)
//! ```
//!
//! Transforms never encode and encoders never mutate: a transform returns a
//! new buffer, an encoder borrows one and returns bytes. That keeps each
//! stage a pure function that unit tests can exercise without files.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`buffer`] | The RGBA pixel grid every stage exchanges |
//! | [`format`] | One encoder per output format + static format descriptors |
//! | [`format::registry`] | Media-type-keyed catalog; lookup and priority-ordered listing |
//! | [`transform`] | Resize, crop, expand, and the multi-pass vignette compositor |
//! | [`session`] | Orchestration: load → op chain → encode → `{name}-edited.{ext}` |
//!
//! # Design Decisions
//!
//! ## Hand-Rolled BMP and ICO
//!
//! PNG, JPEG, WebP, and AVIF delegate to the `image` crate's codecs. BMP and
//! ICO are serialized by hand instead: their byte layout is pinned
//! (bottom-up BGR rows with 4-byte padding for BMP; an ICONDIR wrapping a
//! single PNG frame for ICO) and readers of those formats are unforgiving
//! about it. The serializers are ~60 lines each and tested against the
//! computed offsets, which beats coaxing a general-purpose encoder into an
//! exact layout.
//!
//! ## Registry Dispatch
//!
//! Callers select formats by media type through a
//! [`format::FormatRegistry`], never by concrete encoder type. Adding a
//! format means registering one more `Encoder` implementation; the
//! edit/export flow does not change. Registries are explicitly constructed
//! values — the shared built-in set lives behind a `LazyLock`, so there is
//! no mutable global state and initialization is idempotent.
//!
//! ## Vignette Intensity Above 100
//!
//! The vignette's intensity is percentage-like but intentionally accepts
//! values above 100: the overshoot becomes extra full-alpha compositing
//! passes plus one fractional pass, which deepens the effect the way
//! repeated manual applications would. See
//! [`transform::vignette_passes`].

pub mod buffer;
pub mod format;
pub mod session;
pub mod transform;

pub use buffer::PixelBuffer;
pub use format::{FormatRegistry, Quality};
pub use session::{EditOp, EditorSession};
