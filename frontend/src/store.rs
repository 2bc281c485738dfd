//! The job file store, instantiated with browser file handles.
//!
//! All list semantics (ordering, keyed write-once previews, reorder,
//! removal) live in `common::model::files`; this module binds them to
//! `gloo_file::File` and owns id assignment, which must happen synchronously
//! at selection time so the UI reflects the new count before any thumbnail
//! work starts.

use common::model::files::{FileList, StagedFile};
use gloo_file::File;
use uuid::Uuid;

pub type JobFile = StagedFile<File>;
pub type JobFileStore = FileList<File>;

/// Wraps a freshly selected browser file with a stable client-side id.
pub fn stage(file: File) -> JobFile {
    let name = file.name();
    let size = file.size();
    StagedFile::new(Uuid::new_v4().to_string(), name, size, file)
}
