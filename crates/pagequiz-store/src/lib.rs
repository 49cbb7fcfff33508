//! pagequiz-store: Quiz files and the manifest index.
//!
//! Writes one JSON document per topic and rebuilds `manifest.json` from the
//! quiz files found in the output directory. The quiz files are the source
//! of truth; the manifest is derived from them, carrying over only the date
//! each file was first indexed.
//!
//! A single writer per output directory is assumed. Nothing is locked.

pub mod manifest;
pub mod writer;

pub use manifest::{
    list_quiz_files, reconcile, reconcile_on, Manifest, ManifestEntry, MANIFEST_FILE_NAME,
};
pub use writer::write_quiz;
