//! Example: Basic calls against the SheerID sandbox
//!
//! Pings the service, lists organization types, submits a test
//! verification and searches military organizations.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=info cargo run -p sheerid-infra --example demo -- <API_KEY>
//! ```

use anyhow::{bail, Context};
use sheerid_domain::{ClientConfig, Params};
use sheerid_infra::client_from_config;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (Some(key), None) = (args.next(), args.next()) else {
        bail!("Usage: demo <API_KEY>");
    };

    let api = client_from_config(ClientConfig::new(key).with_verbose(true))?;

    println!("Expected response \"pong\": {}", api.ping()?);

    let org_types = api.list_organization_types()?;
    println!("Org Types: {}", org_types.unwrap_or_default());

    let fields = Params::new()
        .with("FIRST_NAME", "Test")
        .with("LAST_NAME", "User")
        .with("SSN_LAST4", "1234");
    let verification = api.verify(fields)?.context("empty verification response")?;
    println!("Verification response: {}", verification["result"]);

    let orgs = api.list_organizations("Reserve", "MILITARY")?.unwrap_or_default();
    let names: Vec<&str> = orgs
        .as_array()
        .map(|orgs| orgs.iter().filter_map(|org| org["name"].as_str()).collect())
        .unwrap_or_default();
    println!("Reserve Military Organizations: {}", names.join(", "));

    Ok(())
}
