//! Word bank — the ordered item list a drill session traverses.
//!
//! # Pipeline
//!
//! ```text
//! WordSource (DirSource / ManifestSource) → WordBank::load
//!     → trim + drop empty words → deterministic sort → WordBank
//! ```
//!
//! A bank is built once per session and never mutated afterwards; restarting
//! the drill loads a fresh bank.

pub mod item;
pub mod source;

pub use item::{AudioRef, DrillItem};
pub use source::{DirSource, ManifestSource, SourceError, WordSource};

// ---------------------------------------------------------------------------
// WordBank
// ---------------------------------------------------------------------------

/// Ordered, immutable sequence of [`DrillItem`]s.
///
/// Ordering is case-insensitive lexicographic with the original-cased word
/// as tie-breaker, so the same input set always produces the same session
/// order.  Duplicate words are kept — each is an independent item.
#[derive(Debug, Clone)]
pub struct WordBank {
    items: Vec<DrillItem>,
}

impl WordBank {
    /// Build a bank from `source`.
    ///
    /// Entries whose word is empty after trimming are discarded.
    ///
    /// # Errors
    ///
    /// * [`SourceError::Unavailable`] — the source could not be read.
    /// * [`SourceError::Empty`] — nothing usable remained after filtering.
    pub fn load(source: &dyn WordSource) -> Result<Self, SourceError> {
        let raw = source.entries()?;
        let total = raw.len();

        let mut items: Vec<DrillItem> = raw
            .into_iter()
            .filter_map(|(word, clip)| DrillItem::new(word, clip))
            .collect();

        if items.is_empty() {
            return Err(SourceError::Empty);
        }

        items.sort_by(|a, b| {
            a.word()
                .to_lowercase()
                .cmp(&b.word().to_lowercase())
                .then_with(|| a.word().cmp(b.word()))
        });

        if items.len() < total {
            log::debug!(
                "bank: discarded {} entry(ies) with empty words",
                total - items.len()
            );
        }
        log::info!("bank: loaded {} item(s)", items.len());

        Ok(Self { items })
    }

    /// Build a bank from already-constructed items, keeping their order.
    ///
    /// Mainly for tests and embedders that assemble items themselves.  An
    /// empty bank is representable here; starting a session on it fails.
    pub fn from_items(items: Vec<DrillItem>) -> Self {
        Self { items }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when the bank holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&DrillItem> {
        self.items.get(index)
    }

    /// Iterate over the items in drill order.
    pub fn iter(&self) -> std::slice::Iter<'_, DrillItem> {
        self.items.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::source::VecSource;
    use super::*;

    fn words(bank: &WordBank) -> Vec<&str> {
        bank.iter().map(DrillItem::word).collect()
    }

    #[test]
    fn load_sorts_case_insensitively() {
        let source = VecSource::of_words(["dog", "Apple", "banana"]);
        let bank = WordBank::load(&source).unwrap();
        assert_eq!(words(&bank), ["Apple", "banana", "dog"]);
    }

    #[test]
    fn load_is_deterministic_across_input_orders() {
        let a = WordBank::load(&VecSource::of_words(["pear", "Pear", "apple"])).unwrap();
        let b = WordBank::load(&VecSource::of_words(["apple", "Pear", "pear"])).unwrap();
        assert_eq!(words(&a), words(&b));
    }

    #[test]
    fn load_keeps_duplicates() {
        let source = VecSource::of_words(["cat", "Cat", "cat"]);
        let bank = WordBank::load(&source).unwrap();
        assert_eq!(bank.len(), 3);
        assert_eq!(words(&bank), ["Cat", "cat", "cat"]);
    }

    #[test]
    fn load_discards_blank_words() {
        let source = VecSource::of_words(["", "  ", "cat", " \t"]);
        let bank = WordBank::load(&source).unwrap();
        assert_eq!(words(&bank), ["cat"]);
    }

    #[test]
    fn load_trims_words() {
        let source = VecSource::of_words(["  cat  "]);
        let bank = WordBank::load(&source).unwrap();
        assert_eq!(bank.get(0).unwrap().word(), "cat");
    }

    #[test]
    fn load_all_blank_is_empty_error() {
        let source = VecSource::of_words(["", "   "]);
        let err = WordBank::load(&source).unwrap_err();
        assert!(matches!(err, SourceError::Empty));
    }

    #[test]
    fn load_no_entries_is_empty_error() {
        let source = VecSource::of_words(Vec::<String>::new());
        let err = WordBank::load(&source).unwrap_err();
        assert!(matches!(err, SourceError::Empty));
    }

    #[test]
    fn load_propagates_unavailable() {
        let source = VecSource::err(SourceError::Unavailable("boom".into()));
        let err = WordBank::load(&source).unwrap_err();
        assert!(matches!(err, SourceError::Unavailable(_)));
    }

    #[test]
    fn from_items_keeps_given_order() {
        let items = vec![
            DrillItem::new("zebra", AudioRef::new("/z.mp3")).unwrap(),
            DrillItem::new("ant", AudioRef::new("/a.mp3")).unwrap(),
        ];
        let bank = WordBank::from_items(items);
        assert_eq!(words(&bank), ["zebra", "ant"]);
    }

    #[test]
    fn get_out_of_range_is_none() {
        let bank = WordBank::from_items(Vec::new());
        assert!(bank.is_empty());
        assert!(bank.get(0).is_none());
    }
}
