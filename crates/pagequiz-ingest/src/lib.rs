//! pagequiz-ingest: Page image discovery and encoding.
//!
//! Finds the supported images in a topic directory in page order and encodes
//! each one for transport to the model. HEIC/HEIF pages are transcoded to
//! JPEG because the model does not accept that container.

pub mod discover;
pub mod encode;
pub mod error;

pub use discover::{discover_images, is_supported, SUPPORTED_EXTENSIONS};
pub use encode::{load_image, mime_type_for, transcode_to_jpeg, JPEG_QUALITY};
pub use error::IngestError;
