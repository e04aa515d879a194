//! # chemflow-storage
//!
//! Attachment upload storage. The service layer only consumes the
//! [`UploadStore`] trait and the [`StoredUpload`] metadata shape; the
//! provider behind it is a local-filesystem implementation.

pub mod local;
pub mod provider;

pub use local::LocalUploadStore;
pub use provider::{StoredUpload, UploadStore};
