//! Ordered staging list for user-selected input files.
//!
//! The list is the single source of truth for processing order: merge order
//! and split source order are whatever this list says when the upload phase
//! starts. Order changes only through [`FileList::reorder`]; thumbnail
//! completions mutate entries in place by id and can arrive in any order
//! without disturbing their neighbours.
//!
//! The types are generic over the platform file handle (`gloo_file::File` in
//! the frontend, anything at all in tests) so the ordering and consistency
//! rules stay host-testable.

/// One staged input file.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile<F> {
    /// Opaque client-side id, assigned at selection time and stable for the
    /// file's lifetime in the list. Reorder, removal and drag identity all
    /// key on it.
    pub id: String,
    /// Display name, copied from the raw file at creation.
    pub name: String,
    /// Byte size of the raw file.
    pub size: u64,
    /// The raw platform file handle.
    pub file: F,
    /// Rendered preview of page 1. Starts `None`, populated at most once;
    /// stays `None` when rendering fails.
    pub preview_url: Option<String>,
    /// Page count, populated alongside the preview.
    pub page_count: Option<u32>,
}

impl<F> StagedFile<F> {
    pub fn new(id: String, name: String, size: u64, file: F) -> Self {
        Self {
            id,
            name,
            size,
            file,
            preview_url: None,
            page_count: None,
        }
    }
}

/// Moves the element at `old_index` to `new_index`, shifting the elements in
/// between. Out-of-range indices are a caller bug, same contract as the
/// slice indexing it is built on.
pub fn reorder<T>(items: &mut Vec<T>, old_index: usize, new_index: usize) {
    let moved = items.remove(old_index);
    items.insert(new_index, moved);
}

/// The ordered file list with keyed, in-place preview updates.
#[derive(Debug, Clone, PartialEq)]
pub struct FileList<F> {
    entries: Vec<StagedFile<F>>,
}

impl<F> FileList<F> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an already-staged file. Id assignment happens at the call
    /// site, synchronously, before any asynchronous thumbnail work.
    pub fn push(&mut self, file: StagedFile<F>) {
        self.entries.push(file);
    }

    /// Applies a thumbnail completion to the entry with the given id.
    ///
    /// Write-once: an entry that already has a preview (or page count) keeps
    /// it. A completion for an id that has since been removed is a no-op, so
    /// late arrivals from an earlier batch can never corrupt the list.
    pub fn set_preview(&mut self, id: &str, preview_url: Option<String>, page_count: Option<u32>) {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return;
        };
        if entry.preview_url.is_none() {
            entry.preview_url = preview_url;
        }
        if entry.page_count.is_none() {
            entry.page_count = page_count;
        }
    }

    /// Removes the entry with the given id; no-op when absent. Other ids are
    /// never renumbered.
    pub fn remove(&mut self, id: &str) {
        self.entries.retain(|e| e.id != id);
    }

    pub fn reorder(&mut self, old_index: usize, new_index: usize) {
        reorder(&mut self.entries, old_index, new_index);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StagedFile<F>> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StagedFile<F>> {
        self.entries.iter()
    }

    /// Page count of the first staged file, the reference document for the
    /// split tool.
    pub fn first_page_count(&self) -> Option<u32> {
        self.entries.first().and_then(|e| e.page_count)
    }
}

impl<F> Default for FileList<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(id: &str) -> StagedFile<()> {
        StagedFile::new(id.to_string(), format!("{id}.pdf"), 1024, ())
    }

    fn list(ids: &[&str]) -> FileList<()> {
        let mut list = FileList::new();
        for id in ids {
            list.push(staged(id));
        }
        list
    }

    fn ids(list: &FileList<()>) -> Vec<&str> {
        list.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn reorder_moves_first_to_third() {
        let mut files = list(&["x", "y", "z"]);
        files.reorder(0, 2);
        assert_eq!(ids(&files), ["y", "z", "x"]);
    }

    #[test]
    fn operation_sequence_preserves_implied_order() {
        let mut files = list(&["a", "b"]);
        files.push(staged("c"));
        files.remove("a");
        files.push(staged("d"));
        files.reorder(2, 0);
        assert_eq!(ids(&files), ["d", "b", "c"]);
    }

    #[test]
    fn reorder_never_touches_ids_or_payloads() {
        let mut files = list(&["a", "b", "c"]);
        files.set_preview("b", Some("thumb-b".into()), Some(2));
        files.reorder(1, 0);
        let first = files.get(0).unwrap();
        assert_eq!(first.id, "b");
        assert_eq!(first.preview_url.as_deref(), Some("thumb-b"));
        assert_eq!(first.page_count, Some(2));
    }

    #[test]
    fn remove_is_keyed_and_tolerates_absent_ids() {
        let mut files = list(&["a", "b", "c"]);
        files.remove("b");
        assert_eq!(ids(&files), ["a", "c"]);
        files.remove("nope");
        assert_eq!(ids(&files), ["a", "c"]);
    }

    #[test]
    fn preview_completions_apply_only_to_their_own_id() {
        // b was added after a but its thumbnail lands first.
        let mut files = list(&["a", "b"]);
        files.set_preview("b", Some("thumb-b".into()), Some(3));
        assert_eq!(files.get(0).unwrap().preview_url, None);
        assert_eq!(files.get(1).unwrap().preview_url.as_deref(), Some("thumb-b"));

        files.set_preview("a", Some("thumb-a".into()), Some(1));
        assert_eq!(files.get(0).unwrap().preview_url.as_deref(), Some("thumb-a"));
        assert_eq!(files.get(1).unwrap().preview_url.as_deref(), Some("thumb-b"));
    }

    #[test]
    fn preview_is_write_once() {
        let mut files = list(&["a"]);
        files.set_preview("a", Some("first".into()), Some(1));
        files.set_preview("a", Some("second".into()), Some(9));
        let entry = files.get(0).unwrap();
        assert_eq!(entry.preview_url.as_deref(), Some("first"));
        assert_eq!(entry.page_count, Some(1));
    }

    #[test]
    fn preview_for_removed_id_is_discarded() {
        let mut files = list(&["a", "b"]);
        files.remove("a");
        files.set_preview("a", Some("late".into()), Some(4));
        assert_eq!(ids(&files), ["b"]);
        assert_eq!(files.get(0).unwrap().preview_url, None);
    }

    #[test]
    fn failed_render_leaves_the_placeholder() {
        let mut files = list(&["a"]);
        files.set_preview("a", None, None);
        assert_eq!(files.get(0).unwrap().preview_url, None);
        // A later retry may still fill it in.
        files.set_preview("a", Some("thumb".into()), Some(1));
        assert_eq!(files.get(0).unwrap().preview_url.as_deref(), Some("thumb"));
    }
}
