//! Catalog of output formats, keyed by media type.
//!
//! The registry decouples the edit/export flow from the concrete format set:
//! callers either ask "give me the encoder for format X" or "list formats in
//! display order" and never name an encoder type directly. Registries are
//! plain values passed explicitly; the shared built-in instance is created
//! once behind a [`LazyLock`], so initialization is idempotent even under a
//! multi-threaded host.

use super::bmp::BmpFormat;
use super::ico::IcoFormat;
use super::native::{AvifFormat, JpegFormat, PngFormat, WebpFormat};
use super::{Encoder, FormatDescriptor};
use std::sync::LazyLock;
use tracing::warn;

static BUILTIN: LazyLock<FormatRegistry> = LazyLock::new(FormatRegistry::with_builtins);

/// The process-wide registry holding every built-in encoder.
pub fn builtin() -> &'static FormatRegistry {
    &BUILTIN
}

/// Ordered collection of [`Encoder`]s. Entries are registered once at
/// startup and only read afterwards.
#[derive(Default)]
pub struct FormatRegistry {
    // Registration order is preserved so that get_all()'s priority sort can
    // break ties stably.
    entries: Vec<Box<dyn Encoder>>,
}

impl FormatRegistry {
    /// An empty registry, for callers that want a custom format set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with all six built-in formats registered in priority order.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PngFormat));
        registry.register(Box::new(JpegFormat));
        registry.register(Box::new(WebpFormat));
        registry.register(Box::new(AvifFormat));
        registry.register(Box::new(BmpFormat));
        registry.register(Box::new(IcoFormat));
        registry
    }

    /// Add an encoder. A media type that is already registered is skipped
    /// with a warning — not an error, so optional formats can be registered
    /// unconditionally. Returns whether the encoder was added.
    pub fn register(&mut self, encoder: Box<dyn Encoder>) -> bool {
        let media_type = encoder.descriptor().media_type;
        if self.get(media_type).is_some() {
            warn!(media_type, "format already registered, skipping");
            return false;
        }
        self.entries.push(encoder);
        true
    }

    /// Look up an encoder by media type ("image/png").
    pub fn get(&self, media_type: &str) -> Option<&dyn Encoder> {
        self.entries
            .iter()
            .find(|e| e.descriptor().media_type == media_type)
            .map(|e| e.as_ref())
    }

    /// All encoders sorted ascending by priority; ties keep registration
    /// order.
    pub fn get_all(&self) -> Vec<&dyn Encoder> {
        let mut all: Vec<&dyn Encoder> = self.entries.iter().map(|e| e.as_ref()).collect();
        all.sort_by_key(|e| e.descriptor().priority);
        all
    }

    /// Descriptors in display order, for format pickers and listings.
    pub fn descriptors(&self) -> Vec<FormatDescriptor> {
        self.get_all().iter().map(|e| *e.descriptor()).collect()
    }

    pub fn supports(&self, media_type: &str) -> bool {
        self.get(media_type).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry. Only needed for test isolation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelBuffer;
    use crate::format::{Capabilities, EncodeError, Quality};

    /// Minimal encoder for registry behavior tests.
    struct Stub(FormatDescriptor);

    impl Encoder for Stub {
        fn descriptor(&self) -> &FormatDescriptor {
            &self.0
        }

        fn encode(&self, _: &PixelBuffer, _: Quality) -> Result<Vec<u8>, EncodeError> {
            Ok(Vec::new())
        }
    }

    fn stub(media_type: &'static str, priority: u32) -> Box<dyn Encoder> {
        Box::new(Stub(FormatDescriptor {
            label: "Stub",
            extension: "stub",
            media_type,
            priority,
            capabilities: Capabilities {
                supports_quality: false,
                max_dimensions: None,
                native: false,
            },
        }))
    }

    #[test]
    fn builtins_sorted_by_priority() {
        let labels: Vec<&str> = FormatRegistry::with_builtins()
            .get_all()
            .iter()
            .map(|e| e.descriptor().label)
            .collect();
        assert_eq!(labels, ["PNG", "JPEG", "WebP", "AVIF", "BMP", "ICO"]);
    }

    #[test]
    fn get_all_sorts_regardless_of_registration_order() {
        let mut registry = FormatRegistry::new();
        registry.register(stub("image/c", 30));
        registry.register(stub("image/a", 10));
        registry.register(stub("image/b", 20));

        let types: Vec<&str> = registry
            .get_all()
            .iter()
            .map(|e| e.descriptor().media_type)
            .collect();
        assert_eq!(types, ["image/a", "image/b", "image/c"]);
    }

    #[test]
    fn equal_priorities_keep_registration_order() {
        let mut registry = FormatRegistry::new();
        registry.register(stub("image/first", 7));
        registry.register(stub("image/second", 7));

        let types: Vec<&str> = registry
            .get_all()
            .iter()
            .map(|e| e.descriptor().media_type)
            .collect();
        assert_eq!(types, ["image/first", "image/second"]);
    }

    #[test]
    fn duplicate_registration_is_a_no_op() {
        let mut registry = FormatRegistry::new();
        assert!(registry.register(stub("image/a", 1)));
        assert!(!registry.register(stub("image/a", 99)));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("image/a").unwrap().descriptor().priority, 1);
    }

    #[test]
    fn lookup_miss_returns_none() {
        let registry = FormatRegistry::with_builtins();
        assert!(registry.get("image/tiff").is_none());
        assert!(!registry.supports("image/tiff"));
        assert!(registry.supports("image/x-icon"));
    }

    #[test]
    fn clear_empties_the_registry() {
        let mut registry = FormatRegistry::with_builtins();
        assert_eq!(registry.len(), 6);
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn builtin_instance_is_initialized_once() {
        let first = builtin() as *const FormatRegistry;
        let second = builtin() as *const FormatRegistry;
        assert_eq!(first, second);
        assert_eq!(builtin().len(), 6);
    }
}
