//! Mapping service API client.
//!
//! Blocking reqwest client (no Tokio runtime required).
//! Covers the full editor workflow: list files → fetch predefined elements
//! → save templates, plus reading back saved data.
//!
//! No retries, no caching, no editor concepts. Response parsing keeps the
//! tolerances the service's original front end relied on: unknown fields
//! ignored, a non-array elements body treated as "no predefined elements".

mod client;

pub use client::{ApiError, MappingClient};
