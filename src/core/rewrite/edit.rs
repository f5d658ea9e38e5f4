use tracing::warn;

/// Replace `length` bytes at `offset` with `replacement`.
///
/// A zero-length edit is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub offset: usize,
    pub length: usize,
    pub replacement: String,
}

impl TextEdit {
    pub fn replace(offset: usize, length: usize, replacement: impl Into<String>) -> Self {
        Self {
            offset,
            length,
            replacement: replacement.into(),
        }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace(offset, 0, text)
    }

    pub fn delete(offset: usize, length: usize) -> Self {
        Self::replace(offset, length, "")
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    fn conflicts_with(&self, other: &TextEdit) -> bool {
        match (self.length, other.length) {
            (0, 0) => self.offset == other.offset,
            (0, _) => other.offset < self.offset && self.offset < other.end(),
            (_, 0) => self.offset < other.offset && other.offset < self.end(),
            _ => self.offset < other.end() && other.offset < self.end(),
        }
    }
}

/// The edits planned for one file.
///
/// Exact duplicates are merged. An edit overlapping one already accepted is
/// dropped, so earlier discoveries win.
#[derive(Debug, Clone, Default)]
pub struct EditSet {
    edits: Vec<TextEdit>,
    dropped: usize,
}

impl EditSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the edit was a duplicate or conflicted.
    pub fn push(&mut self, edit: TextEdit) -> bool {
        if self.edits.contains(&edit) {
            return false;
        }
        if let Some(existing) = self.edits.iter().find(|e| e.conflicts_with(&edit)) {
            warn!(
                "dropping edit at {}..{} overlapping edit at {}..{}",
                edit.offset,
                edit.end(),
                existing.offset,
                existing.end()
            );
            self.dropped += 1;
            return false;
        }
        self.edits.push(edit);
        true
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    /// Apply every edit to `source`, last offset first so earlier offsets
    /// stay valid.
    pub fn apply(&self, source: &str) -> String {
        let mut ordered: Vec<&TextEdit> = self.edits.iter().collect();
        ordered.sort_by(|a, b| b.offset.cmp(&a.offset).then(b.length.cmp(&a.length)));

        let mut out = source.to_string();
        for edit in ordered {
            let range = edit.offset..edit.end();
            if out.get(range.clone()).is_none() {
                warn!("skipping edit at {}..{}: out of bounds", edit.offset, edit.end());
                continue;
            }
            out.replace_range(range, &edit.replacement);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_apply_in_descending_order() {
        let source = "const Text('Hi');";
        let mut edits = EditSet::new();
        assert!(edits.push(TextEdit::replace(11, 4, "l10n.hi")));
        assert!(edits.push(TextEdit::delete(0, 6)));
        assert_eq!(edits.apply(source), "Text(l10n.hi);");
    }

    #[test]
    fn test_duplicates_are_merged() {
        let mut edits = EditSet::new();
        assert!(edits.push(TextEdit::delete(0, 6)));
        assert!(!edits.push(TextEdit::delete(0, 6)));
        assert_eq!(edits.len(), 1);
        assert_eq!(edits.dropped(), 0);
    }

    #[test]
    fn test_overlapping_edit_is_dropped() {
        let mut edits = EditSet::new();
        assert!(edits.push(TextEdit::replace(5, 10, "a")));
        assert!(!edits.push(TextEdit::replace(10, 10, "b")));
        assert!(!edits.push(TextEdit::insert(7, "c")));
        assert_eq!(edits.dropped(), 2);
        assert_eq!(edits.len(), 1);
    }

    #[test]
    fn test_adjacent_edits_do_not_conflict() {
        let mut edits = EditSet::new();
        assert!(edits.push(TextEdit::replace(0, 3, "x")));
        assert!(edits.push(TextEdit::replace(3, 3, "y")));
        assert!(edits.push(TextEdit::insert(6, "!")));
        assert_eq!(edits.apply("aaabbbccc"), "xy!ccc");
    }

    #[test]
    fn test_insert_at_range_start_goes_before_replacement() {
        let mut edits = EditSet::new();
        edits.push(TextEdit::replace(4, 3, "new"));
        edits.push(TextEdit::insert(4, "// x\n"));
        assert_eq!(edits.apply("abc old def"), "abc // x\nnew def");
    }

    #[test]
    fn test_two_inserts_at_same_offset_conflict() {
        let mut edits = EditSet::new();
        assert!(edits.push(TextEdit::insert(0, "a")));
        assert!(!edits.push(TextEdit::insert(0, "b")));
    }
}
