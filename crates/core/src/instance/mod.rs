//! Instance configuration
//!
//! Parsing of the on-disk property layouts, the [`ConfigStore`] port the
//! infrastructure crate implements, and name resolution including puppet
//! delegation.

pub mod ports;
pub mod properties;
pub mod resolver;

pub use ports::ConfigStore;
pub use properties::{parse_properties, parse_sections, Properties};
pub use resolver::{is_valid_instance_name, DelegationChain, InstanceResolver};
