//! Cache of decoded vehicle attributes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

/// Sentinel the decode service supplies for fields with no data.
const NOT_APPLICABLE: &str = "Not Applicable";

/// An error merging a decode-service response into the cache.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The response held no `Results` array with a leading object.
    #[error("Decode response did not match the expected shape.")]
    DataInvalid,
    /// The response was not valid JSON.
    #[error("Decode response was not valid JSON: {0}.")]
    Json(#[from] serde_json::Error),
}

/// A single decoded attribute, identified by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub name: String,
    pub value: String,
}

/// Cache of decoded attributes with a key-sorted detail view.
///
/// The cache is repopulated wholesale, never merged partially: both
/// [`restore`](Self::restore) and
/// [`merge_decode_result`](Self::merge_decode_result) clear it before
/// inserting, and leave it untouched when their input cannot be parsed. The
/// detail view is regenerated after every repopulation and always lists the
/// attributes in ascending key order.
#[derive(Debug, Default)]
pub struct AttributeStore {
    attributes: BTreeMap<String, String>,
    details: Vec<Detail>,
}

impl AttributeStore {
    /// The cached attributes, keyed by name.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// The cached attributes as a key-sorted sequence of details.
    pub fn details(&self) -> &[Detail] {
        &self.details
    }

    /// Look up a single attribute by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the cache holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Replace the cache with a previously serialized attribute blob.
    ///
    /// The blob must be a flat JSON object of string values, as produced by
    /// [`serialize`](Self::serialize). On a parse or shape failure the cache
    /// is left untouched and `None` is returned. Unlike the merge path, this
    /// is a faithful round trip: no values are filtered.
    pub fn restore(&mut self, blob: &[u8]) -> Option<BTreeMap<String, String>> {
        let parsed: BTreeMap<String, String> = match serde_json::from_slice(blob) {
            Ok(parsed) => parsed,
            Err(err) => {
                error!("attribute restore failed: {err}");
                return None;
            }
        };

        self.attributes = parsed.clone();
        self.rebuild_details();

        Some(parsed)
    }

    /// Serialize the cache to a flat JSON object of string values.
    ///
    /// Returns `None` only on an encoding failure.
    pub fn serialize(&self) -> Option<Vec<u8>> {
        match serde_json::to_vec(&self.attributes) {
            Ok(blob) => Some(blob),
            Err(err) => {
                error!("attribute serialize failed: {err}");
                None
            }
        }
    }

    /// Replace the cache with the first entry of a decode-service response.
    ///
    /// The response must hold a `Results` array whose first element is an
    /// object; anything else fails with [`DecodeError`] and leaves the cache
    /// untouched. Of that object, only string values that are non-empty and
    /// not the literal "Not Applicable" are retained.
    pub fn merge_decode_result(&mut self, body: &[u8]) -> Result<(), DecodeError> {
        let response: Value = serde_json::from_slice(body)?;
        let first = response
            .get("Results")
            .and_then(Value::as_array)
            .and_then(|results| results.first())
            .and_then(Value::as_object)
            .ok_or(DecodeError::DataInvalid)?;

        self.attributes.clear();
        for (name, value) in first {
            if let Value::String(text) = value
                && !text.is_empty()
                && text != NOT_APPLICABLE
            {
                self.attributes.insert(name.clone(), text.clone());
            }
        }
        self.rebuild_details();

        Ok(())
    }

    /// Regenerate the detail view. Iterating the map yields ascending keys.
    fn rebuild_details(&mut self) {
        self.details = self
            .attributes
            .iter()
            .map(|(name, value)| Detail {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();
    }
}
