use std::collections::HashMap;

use tracing::warn;

use super::{table, Glyph, GlyphId};
use crate::error::{MorphError, MorphResult};

/// Catalogue of glyph outlines keyed by identity.
///
/// Populated with the eleven built-ins on construction, so lookups of known
/// identities never fail. Overrides replace the stored outline wholesale.
/// Views share a registry behind an `Arc`; it is read-only once shared and
/// copy-on-write (`Arc::make_mut`) if an override comes later.
#[derive(Debug, Clone)]
pub struct GlyphRegistry {
    glyphs: HashMap<GlyphId, Glyph>,
}

impl Default for GlyphRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl GlyphRegistry {
    /// Registry holding the built-in digits and the hidden placeholder.
    pub fn standard() -> Self {
        let glyphs = table::BUILTIN.iter().map(|g| (g.id, *g)).collect();
        Self { glyphs }
    }

    /// Store `glyph` under `id`, returning the outline it replaced.
    ///
    /// Only the digits 0-9 and [`GlyphId::HIDDEN`] may be registered.
    pub fn register(&mut self, id: GlyphId, glyph: Glyph) -> MorphResult<Option<Glyph>> {
        if !id.is_known() {
            return Err(MorphError::UnknownGlyph(id));
        }
        let previous = self.glyphs.insert(id, glyph.with_id(id));
        if previous.is_some() {
            warn!("Replacing existing glyph for {}", id);
        }
        Ok(previous)
    }

    pub fn lookup(&self, id: GlyphId) -> MorphResult<&Glyph> {
        self.glyphs.get(&id).ok_or(MorphError::UnknownGlyph(id))
    }

    /// Lookup restricted to concrete digits; the placeholder is not a number.
    pub fn for_number(&self, n: i64) -> MorphResult<&Glyph> {
        let id = GlyphId::digit(n)?;
        self.lookup(id)
    }

    pub fn hidden(&self) -> &Glyph {
        // The placeholder is inserted by `standard` and can only be replaced.
        self.glyphs.get(&GlyphId::HIDDEN).unwrap_or(&table::HIDDEN)
    }

    pub fn contains(&self, id: GlyphId) -> bool {
        self.glyphs.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;
    use crate::glyph::table::{EIGHT, ZERO};

    #[test]
    fn standard_registry_resolves_every_known_id() {
        let registry = GlyphRegistry::standard();
        assert_eq!(registry.len(), 11);
        for n in 0..=9 {
            assert_eq!(registry.for_number(n).unwrap().id.raw(), n);
        }
        assert!(registry.lookup(GlyphId::HIDDEN).unwrap().id.is_hidden());
    }

    #[test]
    fn for_number_rejects_out_of_range_and_never_yields_hidden() {
        let registry = GlyphRegistry::standard();
        assert!(matches!(registry.for_number(10), Err(MorphError::InvalidDigit(10))));
        assert!(matches!(
            registry.for_number(GlyphId::HIDDEN.raw()),
            Err(MorphError::InvalidDigit(-1))
        ));
    }

    #[test]
    fn lookup_of_unknown_id_fails() {
        let registry = GlyphRegistry::standard();
        let id = GlyphId::from_raw(11);
        assert!(matches!(registry.lookup(id), Err(MorphError::UnknownGlyph(e)) if e == id));
    }

    #[test]
    fn register_overrides_last_write_wins() {
        let mut registry = GlyphRegistry::standard();
        let id = GlyphId::from_raw(0);

        let previous = registry.register(id, EIGHT).unwrap();
        assert_eq!(previous, Some(ZERO));

        let replacement = Glyph::degenerate(id, Point::new(1.0, 1.0), 10.0);
        let previous = registry.register(id, replacement).unwrap();
        assert_eq!(previous.map(|g| g.anchors), Some(EIGHT.anchors));

        let stored = registry.lookup(id).unwrap();
        assert_eq!(stored.width, 10.0);
        assert_eq!(stored.id, id);
    }

    #[test]
    fn register_rejects_unknown_ids() {
        let mut registry = GlyphRegistry::standard();
        let id = GlyphId::from_raw(42);
        assert!(matches!(registry.register(id, ZERO), Err(MorphError::UnknownGlyph(_))));
        assert!(!registry.contains(id));
    }
}
