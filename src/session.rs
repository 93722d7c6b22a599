//! Editor session: load → transform chain → encode → write.
//!
//! A session owns the working pixel buffer and the original file's base name.
//! Transforms are applied in order through [`EditOp`]; export looks the
//! format up in a [`FormatRegistry`], runs the encoder, and writes
//! `{original-base-name}-edited.{extension}` next to wherever the caller
//! points it. A registry miss aborts before any file is touched.

use crate::buffer::PixelBuffer;
use crate::format::{EncodeError, FormatRegistry, Quality};
use crate::transform::{self, CropRect, Padding, Rgb, TransformError, VignetteParams};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// One step of the edit pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    Resize { width: u32, height: u32 },
    Crop(CropRect),
    Expand { padding: Padding, fill: Rgb },
    Vignette(VignetteParams),
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Where the encoded file was written.
    pub path: PathBuf,
    /// Encoded size in bytes.
    pub bytes: usize,
    /// Advisory warning from the encoder's pre-flight check, if any
    /// (e.g. ICO downscale notice). Non-fatal — the file was still written.
    pub warning: Option<String>,
}

/// An in-progress edit of one image.
pub struct EditorSession {
    buffer: PixelBuffer,
    base_name: String,
}

impl EditorSession {
    /// Decode an image from disk. The decode itself is delegated to the
    /// `image` crate's reader (format sniffed from content).
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let decoded = image::ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| SessionError::Decode { path: path.to_path_buf(), reason: e.to_string() })?;

        let base_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        debug!(path = %path.display(), base_name, "loaded image");
        Ok(Self { buffer: PixelBuffer::from_image(decoded.to_rgba8()), base_name })
    }

    /// Start a session from an already-built buffer (tests, embedding hosts).
    pub fn from_buffer(buffer: PixelBuffer, base_name: impl Into<String>) -> Self {
        Self { buffer, base_name: base_name.into() }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Apply one transform, replacing the working buffer.
    pub fn apply(&mut self, op: &EditOp) -> Result<(), SessionError> {
        debug!(?op, "applying transform");
        self.buffer = match op {
            EditOp::Resize { width, height } => transform::resize(&self.buffer, *width, *height),
            EditOp::Crop(rect) => transform::crop(&self.buffer, *rect)?,
            EditOp::Expand { padding, fill } => transform::expand(&self.buffer, *padding, *fill),
            EditOp::Vignette(params) => transform::vignette(&self.buffer, params),
        };
        Ok(())
    }

    /// Apply a chain of transforms in order. Stops at the first failure,
    /// leaving the buffer at the last successful step.
    pub fn apply_all(&mut self, ops: &[EditOp]) -> Result<(), SessionError> {
        for op in ops {
            self.apply(op)?;
        }
        Ok(())
    }

    /// Encode the working buffer and write it under `out_dir` as
    /// `{base-name}-edited.{extension}`.
    pub fn export(
        &self,
        registry: &FormatRegistry,
        media_type: &str,
        quality: Quality,
        out_dir: &Path,
    ) -> Result<ExportResult, SessionError> {
        let encoder = registry
            .get(media_type)
            .ok_or_else(|| SessionError::UnsupportedFormat(media_type.to_string()))?;

        let warning = encoder.validate(&self.buffer);
        let bytes = encoder.encode(&self.buffer, quality)?;

        let descriptor = encoder.descriptor();
        let path = out_dir.join(format!("{}-edited.{}", self.base_name, descriptor.extension));
        std::fs::write(&path, &bytes)?;

        debug!(path = %path.display(), bytes = bytes.len(), format = descriptor.label, "exported");
        Ok(ExportResult { path, bytes: bytes.len(), warning })
    }
}

/// Default export media type for an input file extension, falling back to
/// PNG for anything unrecognized.
pub fn format_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => "image/png",
    }
}
