//! Configuration for the split tool: user-defined page ranges or fixed-size
//! chunks, with an optional merged output.

use super::files::reorder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    #[default]
    Custom,
    Fixed,
}

/// Which field of a range the user is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    From,
    To,
}

/// One user-defined page range, `from ≤ to`, both within `[1, total_pages]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRange {
    /// Stable id used as the reorder/drag key, like a staged file's id.
    pub id: String,
    pub from: u32,
    pub to: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitOptions {
    pub mode: SplitMode,
    /// Custom mode only. The first range is seeded to the full document once
    /// the page count is known and is never removable.
    pub ranges: Vec<SplitRange>,
    /// Pages per chunk, fixed mode only.
    pub fixed_range: u32,
    /// Whether the resulting chunks are merged into one output file.
    pub merge_output: bool,
}

impl SplitOptions {
    pub fn new() -> Self {
        Self {
            mode: SplitMode::Custom,
            ranges: Vec::new(),
            fixed_range: 1,
            merge_output: false,
        }
    }

    /// Seeds the initial full-document range once the reference document's
    /// page count is known. Does nothing if ranges already exist.
    pub fn seed_full_range(&mut self, id: String, total_pages: u32) {
        if self.ranges.is_empty() && total_pages > 0 {
            self.ranges.push(SplitRange {
                id,
                from: 1,
                to: total_pages,
            });
        }
    }

    /// Applies an edit to one range field, keeping the range well-formed.
    ///
    /// The raw value is clamped to `[1, total_pages]` first. Editing `from`
    /// above the current `to` drags `to` up to match; editing `to` below
    /// `from` floors it at `from`.
    pub fn update_range(&mut self, index: usize, field: RangeField, value: u32, total_pages: u32) {
        let Some(range) = self.ranges.get_mut(index) else {
            return;
        };
        let clamped = value.clamp(1, total_pages.max(1));
        match field {
            RangeField::From => {
                range.from = clamped;
                if range.to < clamped {
                    range.to = clamped;
                }
            }
            RangeField::To => {
                range.to = clamped.max(range.from);
            }
        }
    }

    /// Appends a new range starting right after the last one.
    pub fn add_range(&mut self, id: String, total_pages: u32) {
        let total = total_pages.max(1);
        let from = self
            .ranges
            .last()
            .map(|r| (r.to + 1).min(total))
            .unwrap_or(1);
        self.ranges.push(SplitRange {
            id,
            from,
            to: total,
        });
    }

    /// Removes a range. The first range always stays.
    pub fn remove_range(&mut self, index: usize) {
        if index > 0 && index < self.ranges.len() {
            self.ranges.remove(index);
        }
    }

    /// Reordering only applies in custom mode with more than one range.
    pub fn can_reorder(&self) -> bool {
        self.mode == SplitMode::Custom && self.ranges.len() > 1
    }

    pub fn reorder_ranges(&mut self, old_index: usize, new_index: usize) {
        if self.can_reorder() && old_index < self.ranges.len() && new_index < self.ranges.len() {
            reorder(&mut self.ranges, old_index, new_index);
        }
    }

    /// Generates the fixed-mode chunks: `ceil(total_pages / fixed_range)`
    /// ranges of `fixed_range` pages each, the last one truncated.
    pub fn fixed_ranges(&self, total_pages: u32) -> Vec<(u32, u32)> {
        if self.fixed_range == 0 || total_pages == 0 {
            return Vec::new();
        }
        let mut chunks = Vec::new();
        let mut from = 1;
        while from <= total_pages {
            let to = (from + self.fixed_range - 1).min(total_pages);
            chunks.push((from, to));
            from = to + 1;
        }
        chunks
    }
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options_with_range(from: u32, to: u32) -> SplitOptions {
        let mut options = SplitOptions::new();
        options.ranges.push(SplitRange {
            id: "r1".into(),
            from,
            to,
        });
        options
    }

    #[test]
    fn editing_from_drags_to_upward() {
        let mut options = options_with_range(1, 3);
        options.update_range(0, RangeField::From, 5, 20);
        assert_eq!(options.ranges[0].from, 5);
        assert_eq!(options.ranges[0].to, 5);
    }

    #[test]
    fn editing_to_floors_at_from() {
        let mut options = options_with_range(4, 9);
        options.update_range(0, RangeField::To, 2, 20);
        assert_eq!(options.ranges[0].from, 4);
        assert_eq!(options.ranges[0].to, 4);
    }

    #[test]
    fn edits_clamp_to_document_bounds() {
        let mut options = options_with_range(1, 5);
        options.update_range(0, RangeField::To, 99, 10);
        assert_eq!(options.ranges[0].to, 10);
        options.update_range(0, RangeField::From, 0, 10);
        assert_eq!(options.ranges[0].from, 1);
    }

    #[test]
    fn fixed_ranges_chunk_with_truncated_tail() {
        let mut options = SplitOptions::new();
        options.fixed_range = 10;
        assert_eq!(options.fixed_ranges(25), [(1, 10), (11, 20), (21, 25)]);
        options.fixed_range = 25;
        assert_eq!(options.fixed_ranges(25), [(1, 25)]);
        options.fixed_range = 0;
        assert!(options.fixed_ranges(25).is_empty());
    }

    #[test]
    fn reorder_requires_custom_mode_and_multiple_ranges() {
        let mut options = options_with_range(1, 5);
        assert!(!options.can_reorder());
        options.add_range("r2".into(), 10);
        assert!(options.can_reorder());
        options.reorder_ranges(0, 1);
        assert_eq!(options.ranges[0].id, "r2");

        options.mode = SplitMode::Fixed;
        assert!(!options.can_reorder());
        options.reorder_ranges(0, 1);
        assert_eq!(options.ranges[0].id, "r2");
    }

    #[test]
    fn added_range_starts_after_the_last() {
        let mut options = options_with_range(1, 4);
        options.add_range("r2".into(), 10);
        assert_eq!(options.ranges[1].from, 5);
        assert_eq!(options.ranges[1].to, 10);
    }

    #[test]
    fn first_range_is_not_removable() {
        let mut options = options_with_range(1, 4);
        options.add_range("r2".into(), 10);
        options.remove_range(0);
        assert_eq!(options.ranges.len(), 2);
        options.remove_range(1);
        assert_eq!(options.ranges.len(), 1);
        assert_eq!(options.ranges[0].id, "r1");
    }
}
