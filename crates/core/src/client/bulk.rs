//! Chunked reward-pool entry submission
//!
//! Large entry lists are split into chunks of [`ENTRY_CHUNK_SIZE`] and each
//! chunk is posted as repeated `entry` parameters. Chunks go out strictly in
//! order and the first failure stops the upload. Chunks already accepted by
//! the service are not rolled back.

use serde_json::Value;
use sheerid_domain::constants::{ENTRY_CHUNK_SIZE, ENTRY_PARAM};
use sheerid_domain::{ParamValue, Params, Result, SheerIdError};
use tracing::{debug, info, instrument, warn};
use urlencoding::encode;

use super::service::{field_text, require_field, SheerId};

/// Sequential chunked uploader bound to one client.
pub struct BulkUploader<'a> {
    client: &'a SheerId,
}

impl<'a> BulkUploader<'a> {
    pub fn new(client: &'a SheerId) -> Self {
        Self { client }
    }

    /// Post `entries` to the pool in chunks
    ///
    /// # Returns
    ///
    /// Number of chunks submitted (zero for an empty list)
    ///
    /// # Errors
    ///
    /// `BulkUploadInterrupted` wrapping the first failing chunk's error.
    #[instrument(skip(self, entries), fields(count = entries.len()))]
    pub fn upload(&self, pool_id: &str, entries: &[ParamValue]) -> Result<usize> {
        let resource = format!("/rewardPool/{}", encode(pool_id));
        let total_chunks = entries.len().div_ceil(ENTRY_CHUNK_SIZE);

        for (idx, chunk) in entries.chunks(ENTRY_CHUNK_SIZE).enumerate() {
            let mut params = Params::new();
            for entry in chunk {
                params.append(ENTRY_PARAM, entry.clone());
            }

            debug!(chunk = idx + 1, total_chunks, size = chunk.len(), "submitting entry chunk");
            if let Err(err) = self.client.post(&resource, params) {
                warn!(
                    submitted_chunks = idx,
                    total_chunks,
                    error = %err,
                    "entry upload interrupted"
                );
                return Err(SheerIdError::BulkUploadInterrupted {
                    submitted_chunks: idx,
                    total_chunks,
                    source: Box::new(err),
                });
            }
        }

        info!(pool_id, entries = entries.len(), total_chunks, "entries uploaded");
        Ok(total_chunks)
    }
}

impl SheerId {
    /// Add entries to a reward pool, 500 per request
    ///
    /// # Errors
    ///
    /// See [`BulkUploader::upload`]. Earlier chunks stay on the server.
    pub fn add_entries<I, V>(&self, pool_id: &str, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        let entries: Vec<ParamValue> = entries.into_iter().map(Into::into).collect();
        BulkUploader::new(self).upload(pool_id, &entries)
    }

    /// Find or create a reward pool by name, then add `entries` to it
    ///
    /// An existing pool with the same name is reused (first match wins).
    ///
    /// # Returns
    ///
    /// The pool id
    ///
    /// # Errors
    ///
    /// `Decode` if the pool list is not an array or the created pool has no
    /// `id`; request and upload errors otherwise.
    #[instrument(skip(self, entries))]
    pub fn create_reward_pool<I, V>(
        &self,
        name: &str,
        entries: I,
        warn_threshold: Option<i64>,
    ) -> Result<String>
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        let pool_id = match self.find_reward_pool(name)? {
            Some(id) => {
                debug!(pool_id = %id, "reusing existing reward pool");
                id
            }
            None => {
                let mut params = Params::new().with("name", name);
                params.insert_opt("warnThreshold", warn_threshold);
                let created = self.post_json("/rewardPool", params)?;
                let id = require_field(created.as_ref(), "id", "reward pool creation")?;
                info!(pool_id = %id, "reward pool created");
                id
            }
        };

        self.add_entries(&pool_id, entries)?;
        Ok(pool_id)
    }

    fn find_reward_pool(&self, name: &str) -> Result<Option<String>> {
        let pools = match self.list_reward_pools()? {
            None => return Ok(None),
            Some(Value::Array(pools)) => pools,
            Some(other) => {
                return Err(SheerIdError::Decode(format!(
                    "reward pool list is not an array: {other}"
                )))
            }
        };

        let Some(pool) = pools.iter().find(|p| p.get("name").and_then(Value::as_str) == Some(name))
        else {
            return Ok(None);
        };
        field_text(pool, "id")
            .map(Some)
            .ok_or_else(|| SheerIdError::Decode(format!("reward pool '{name}' has no 'id' field")))
    }
}
