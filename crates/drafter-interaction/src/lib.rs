//! Transport implementations of the remote draft service boundary.

pub mod http_draft_service;

pub use http_draft_service::HttpDraftService;
