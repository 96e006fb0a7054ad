//! Resource operations
//!
//! Thin wrappers that map each REST resource onto one verb call. Optional
//! parameters are only sent when supplied.

use serde_json::Value;
use sheerid_domain::{Params, Result};
use tracing::instrument;
use urlencoding::encode;

use super::service::{require_field, SheerId};

impl SheerId {
    // === Service ===

    /// Liveness probe; the service answers `pong`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub fn ping(&self) -> Result<String> {
        let body = self.get("/ping", Params::new())?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Submit a verification request with the given field values.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is not JSON.
    #[instrument(skip(self, fields))]
    pub fn verify(&self, fields: Params) -> Result<Option<Value>> {
        self.post_json("/verification", fields)
    }

    // === Reference data ===

    pub fn list_affiliation_types(&self) -> Result<Option<Value>> {
        self.get_json("/affiliationType", Params::new())
    }

    pub fn list_asset_types(&self) -> Result<Option<Value>> {
        self.get_json("/assetType", Params::new())
    }

    /// Fields which can be supplied to [`SheerId::verify`].
    pub fn list_fields(&self) -> Result<Option<Value>> {
        self.get_json("/field", Params::new())
    }

    pub fn list_organization_types(&self) -> Result<Option<Value>> {
        self.get_json("/organizationType", Params::new())
    }

    pub fn list_verification_types(&self) -> Result<Option<Value>> {
        self.get_json("/verificationType", Params::new())
    }

    /// List organizations filtered by name and type. Both filters are always
    /// sent; pass empty strings for no filtering.
    pub fn list_organizations(&self, name: &str, org_type: &str) -> Result<Option<Value>> {
        self.get_json("/organization", Params::new().with("name", name).with("type", org_type))
    }

    // === Assets ===

    /// Asset metadata.
    pub fn retrieve_asset(&self, asset_id: &str) -> Result<Option<Value>> {
        self.get_json(&format!("/asset/{}", encode(asset_id)), Params::new())
    }

    /// Asset content in its original format.
    pub fn get_asset_data(&self, asset_id: &str) -> Result<Option<Value>> {
        self.get_json(&format!("/asset/{}/raw", encode(asset_id)), Params::new())
    }

    /// Issue an upload token for a verification request
    ///
    /// # Arguments
    ///
    /// * `request_id` - Verification request the upload belongs to
    /// * `lifespan` - Token lifetime in seconds, service default if `None`
    ///
    /// # Errors
    ///
    /// `Decode` if the response carries no `token`, plus any request error.
    #[instrument(skip(self))]
    pub fn issue_token(&self, request_id: &str, lifespan: Option<i64>) -> Result<String> {
        let mut params = Params::new().with("requestId", request_id);
        params.insert_opt("lifespan", lifespan);
        let response = self.post_json("/asset/token", params)?;
        require_field(response.as_ref(), "token", "asset token")
    }

    // === Reward pools ===

    pub fn list_reward_pools(&self) -> Result<Option<Value>> {
        self.get_json("/rewardPool", Params::new())
    }

    pub fn retrieve_reward_pool(&self, pool_id: &str) -> Result<Option<Value>> {
        self.get_json(&format!("/rewardPool/{}", encode(pool_id)), Params::new())
    }

    // === Rewards ===

    pub fn list_rewards(&self) -> Result<Option<Value>> {
        self.get_json("/reward", Params::new())
    }

    pub fn retrieve_reward(&self, reward_id: &str) -> Result<Option<Value>> {
        self.get_json(&format!("/reward/{}", encode(reward_id)), Params::new())
    }

    /// Create a single reward handed out on successful verification
    ///
    /// # Arguments
    ///
    /// * `name` - Reward name
    /// * `reward_code` - Code given to the verified user
    /// * `product_key_name` - Parameter name the code is sent under
    /// * `instructions` - Optional redemption instructions
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self, reward_code, instructions))]
    pub fn create_unpooled_reward(
        &self,
        name: &str,
        reward_code: &str,
        product_key_name: &str,
        instructions: Option<&str>,
    ) -> Result<Option<Value>> {
        let mut params = Params::new().with("name", name).with(product_key_name, reward_code);
        params.insert_opt("instructions", instructions);
        self.post_json("/reward", params)
    }

    /// Create a reward whose codes are drawn from a reward pool
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self, instructions))]
    pub fn create_pooled_reward(
        &self,
        name: &str,
        pool_id: &str,
        product_key_name: &str,
        instructions: Option<&str>,
    ) -> Result<Option<Value>> {
        let mut params =
            Params::new().with("name", name).with(product_key_name, format!("pooled:{pool_id}"));
        params.insert_opt("instructions", instructions);
        self.post_json("/reward", params)
    }

    // === Verifications ===

    /// Person entries of a verification request. Requires elevated
    /// privileges.
    pub fn get_person(&self, request_id: &str) -> Result<Option<Value>> {
        self.get_json(&format!("/verification/{}/person", encode(request_id)), Params::new())
    }

    /// Search requests by first and last name. Without elevated privileges
    /// the service scopes the search to the caller's own account.
    pub fn search_name(
        &self,
        account_id: Option<&str>,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Value>> {
        let mut params = Params::new().with("first_name", first_name).with("last_name", last_name);
        params.insert_opt("accountId", account_id);
        self.get_json("/verification/search", params)
    }

    /// Search requests by email address.
    pub fn search_email(&self, account_id: Option<&str>, email: &str) -> Result<Option<Value>> {
        let mut params = Params::new().with("email", email);
        params.insert_opt("accountId", account_id);
        self.get_json("/verification/search", params)
    }

    /// Search requests by metadata; each pair is sent as `metadata.<key>`.
    pub fn search_metadata(
        &self,
        account_id: Option<&str>,
        metadata: &[(&str, &str)],
    ) -> Result<Option<Value>> {
        let mut params: Params =
            metadata.iter().map(|(key, value)| (format!("metadata.{key}"), *value)).collect();
        params.insert_opt("accountId", account_id);
        self.get_json("/verification/search", params)
    }
}
