//! Domain types and models

pub mod config;
pub mod params;
pub mod request;

pub use config::{ClientConfig, InstanceRecord};
pub use params::{ParamValue, Params};
pub use request::{ApiRequest, HttpMethod};
