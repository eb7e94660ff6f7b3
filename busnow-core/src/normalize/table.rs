//! The variant-character table.

/// Ideographic variation selector VS17 (U+E0100).
///
/// Appending this selector to a shinnyou Kanji selects the one-stroke
/// radical glyph, which is the form used on the physical station signage.
pub const VARIANT_SELECTOR: char = '\u{E0100}';

/// A single base character together with the selector that forces its
/// preferred glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantMapping {
    /// The bare code point as it appears in most input methods
    /// (two-stroke shinnyou form).
    pub base: char,
    /// The variation selector appended to force the one-stroke glyph.
    pub selector: char,
}

/// Table of Kanji whose glyph rendering is ambiguous without a variation
/// selector.
///
/// The backend stores station names with the selector attached, so every
/// representation of an ambiguous character has to collide to the same
/// marked form before it is used as a search key. The table is data, not
/// code: adding a character is a new entry here, with no change to the
/// normalization logic.
///
/// # Examples
///
/// ```
/// use busnow_core::normalize::VariantTable;
///
/// let table = VariantTable::default();
/// assert!(table.is_base('辻'));
/// assert!(!table.is_base('駅'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantTable {
    mappings: Vec<VariantMapping>,
}

impl VariantTable {
    /// Build a table from explicit (base, selector) pairs.
    pub fn new(pairs: impl IntoIterator<Item = (char, char)>) -> Self {
        let mappings = pairs
            .into_iter()
            .map(|(base, selector)| VariantMapping { base, selector })
            .collect();
        Self { mappings }
    }

    /// The mappings in table order.
    pub fn mappings(&self) -> &[VariantMapping] {
        &self.mappings
    }

    /// Whether `c` is one of the table's base characters.
    pub fn is_base(&self, c: char) -> bool {
        self.mappings.iter().any(|m| m.base == c)
    }

    /// Look up the selector for a base character.
    pub fn selector_for(&self, c: char) -> Option<char> {
        self.mappings
            .iter()
            .find(|m| m.base == c)
            .map(|m| m.selector)
    }
}

impl Default for VariantTable {
    /// The shinnyou Kanji that appear in station names on this network.
    fn default() -> Self {
        Self::new([
            ('\u{8FBB}', VARIANT_SELECTOR), // 辻
            ('\u{8FBC}', VARIANT_SELECTOR), // 込
            ('\u{8FEB}', VARIANT_SELECTOR), // 迫
            ('\u{8FFD}', VARIANT_SELECTOR), // 追
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_four_entries() {
        let table = VariantTable::default();
        assert_eq!(table.mappings().len(), 4);
        for m in table.mappings() {
            assert_eq!(m.selector, VARIANT_SELECTOR);
        }
    }

    #[test]
    fn is_base_matches_table_entries() {
        let table = VariantTable::default();
        assert!(table.is_base('辻'));
        assert!(table.is_base('込'));
        assert!(table.is_base('迫'));
        assert!(table.is_base('追'));
        assert!(!table.is_base('高'));
        assert!(!table.is_base(VARIANT_SELECTOR));
    }

    #[test]
    fn selector_for_known_base() {
        let table = VariantTable::default();
        assert_eq!(table.selector_for('辻'), Some(VARIANT_SELECTOR));
        assert_eq!(table.selector_for('駅'), None);
    }

    #[test]
    fn custom_table_is_honoured() {
        let table = VariantTable::new([('葛', VARIANT_SELECTOR)]);
        assert!(table.is_base('葛'));
        assert!(!table.is_base('辻'));
    }
}
