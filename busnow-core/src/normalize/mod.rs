//! Station-name normalization.
//!
//! Some Kanji in local station names are rendered with either a one-stroke
//! or two-stroke "shinnyou" radical. The code points are identical; only a
//! trailing Unicode variation selector distinguishes the glyphs. Users type
//! whichever form their keyboard produces, but the backend stores exactly
//! one form, so search keys and display strings both have to be forced onto
//! a single canonical representation.
//!
//! The pipeline is: NFC canonical composition, then variant-selector
//! forcing from the [`VariantTable`], then whitespace collapse (trim,
//! full-width space to ASCII space, runs to a single space). Both public
//! operations are pure and idempotent.

mod table;

pub use table::{VARIANT_SELECTOR, VariantMapping, VariantTable};

use unicode_normalization::UnicodeNormalization;

impl VariantTable {
    /// Normalize a station name for use as a backend search key.
    ///
    /// All representations of an ambiguous character collide to the marked
    /// form, so a query matches the stored row regardless of which glyph
    /// variant the user typed.
    ///
    /// # Examples
    ///
    /// ```
    /// use busnow_core::normalize::VariantTable;
    ///
    /// let table = VariantTable::default();
    /// assert_eq!(table.normalize_for_search("高辻"), "高辻\u{E0100}");
    /// assert_eq!(table.normalize_for_search(""), "");
    /// ```
    pub fn normalize_for_search(&self, input: &str) -> String {
        self.normalize(input)
    }

    /// Normalize a station name for display.
    ///
    /// Today this is the same pipeline as [`normalize_for_search`]: the
    /// marked form is both the stored form and the preferred visual form.
    /// It is a separate operation because the two policies are allowed to
    /// diverge (search needing the unmarked form while display keeps the
    /// selector, say); callers must not assume they stay identical.
    ///
    /// [`normalize_for_search`]: VariantTable::normalize_for_search
    pub fn normalize_for_display(&self, input: &str) -> String {
        self.normalize(input)
    }

    fn normalize(&self, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }
        let composed: String = input.nfc().collect();
        let forced = self.force_variants(&composed);
        collapse_whitespace(&forced)
    }

    /// Insert the selector after every base character that does not already
    /// carry it. Single left-to-right pass; a character already bearing the
    /// selector is left untouched, which makes the operation idempotent.
    fn force_variants(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            out.push(c);
            if let Some(selector) = self.selector_for(c) {
                match chars.peek() {
                    Some(&next) if next == selector => {
                        out.push(next);
                        chars.next();
                    }
                    _ => out.push(selector),
                }
            }
        }

        out
    }

    /// Per-character breakdown of a string, for diagnosing glyph issues.
    ///
    /// Lists each character with its code points and whether it is one of
    /// the table's base characters.
    pub fn character_info(&self, input: &str) -> Vec<CharacterInfo> {
        input
            .chars()
            .map(|c| CharacterInfo {
                character: c,
                code_point: format!("U+{:04X}", c as u32),
                is_base: self.is_base(c),
            })
            .collect()
    }
}

/// One character's diagnostic breakdown from [`VariantTable::character_info`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterInfo {
    pub character: char,
    pub code_point: String,
    pub is_base: bool,
}

/// Trim the ends, map full-width space (U+3000) to ASCII space, and
/// collapse interior whitespace runs to a single space.
fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;

    for c in input.trim().chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }

    out
}
