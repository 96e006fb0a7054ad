//! SheerID client
//!
//! [`SheerId`] is the verb-level façade (`get`, `post`, `put`, `delete` and
//! their `*_json` variants). Resource operations and the chunked entry
//! uploader are built on top of it and only ever talk to the [`Transport`]
//! port.

pub mod bulk;
pub mod operations;
pub mod ports;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

pub use bulk::BulkUploader;
pub use ports::Transport;
pub use service::{decode_json, field_text, require_field, SheerId};
