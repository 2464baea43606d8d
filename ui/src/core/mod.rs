//! Collaborator seams (DOM, storage, scheduling) and small shared helpers.

pub mod dom;
pub mod format;
pub mod platform;
pub mod storage;
pub mod timing;
