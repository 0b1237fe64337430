//! A mutable VIN with derived validity and a decoded-attribute cache.
//!
//! [`VinRecord`] composes the pure functions of [`crate::check`] and
//! [`crate::year`] around a single owned VIN string. Validity is recomputed
//! on every mutation; it can never be set directly, so
//! `record.is_valid() == check::validate(record.vin())` holds at all times.

pub mod store;

use std::collections::BTreeMap;

use chrono::{Datelike, Local};

use crate::{check, year};
use store::{AttributeStore, DecodeError};

/// A VIN, its derived validity, and its decoded-attribute cache.
#[derive(Debug, Default)]
pub struct VinRecord {
    vin: String,
    is_valid: bool,
    store: AttributeStore,
}

impl VinRecord {
    /// Create a record, optionally restoring a serialized attribute blob.
    ///
    /// Construction never fails: a malformed blob leaves an empty cache.
    /// When the blob restores successfully, carries a `VIN` attribute, and
    /// `vin` is empty, the restored value is adopted as the record's VIN.
    pub fn new(vin: impl Into<String>, blob: Option<&[u8]>) -> Self {
        let vin = vin.into();
        let mut record = Self {
            is_valid: check::validate(&vin),
            vin,
            store: AttributeStore::default(),
        };

        if let Some(blob) = blob {
            record.restore(blob);
        }

        record
    }

    /// The current VIN.
    pub fn vin(&self) -> &str {
        &self.vin
    }

    /// Whether the current VIN passes check-digit verification.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// The decoded-attribute cache.
    pub fn store(&self) -> &AttributeStore {
        &self.store
    }

    /// Replace the VIN, recomputing validity.
    pub fn set_vin(&mut self, vin: impl Into<String>) {
        self.vin = vin.into();
        self.is_valid = check::validate(&self.vin);
    }

    /// Replace a wrong check digit with the calculated one.
    ///
    /// Returns `true` only when a correction was applied. A VIN that is
    /// already valid, or that is beyond correction (wrong length, invalid
    /// characters), is left untouched and yields `false`.
    pub fn correct_check_code(&mut self) -> bool {
        let (valid, fixed) = check::corrected(&self.vin);
        if !valid && let Some(fixed) = fixed {
            self.set_vin(fixed);
            return true;
        }
        false
    }

    /// The model year derived from the VIN's year code, resolved against the
    /// current calendar year. Recomputed on every access; `0` when the VIN or
    /// its year code is unrecognized.
    pub fn model_year(&self) -> i32 {
        year::resolve_model_year(&self.vin, Local::now().year())
    }

    /// Replace the attribute cache from a previously serialized blob.
    ///
    /// Returns the restored attributes, or `None` on a malformed blob, in
    /// which case the cache is left untouched. When the record's VIN is empty
    /// and the blob carries a `VIN` attribute, that value is adopted
    /// (re-validating as with any mutation).
    pub fn restore(&mut self, blob: &[u8]) -> Option<BTreeMap<String, String>> {
        let restored = self.store.restore(blob)?;

        if self.vin.is_empty()
            && let Some(detail_vin) = restored.get("VIN")
        {
            self.set_vin(detail_vin.clone());
        }

        Some(restored)
    }

    /// Serialize the attribute cache to its persisted form.
    pub fn serialize_details(&self) -> Option<Vec<u8>> {
        self.store.serialize()
    }

    /// Replace the attribute cache with a decode-service response body.
    ///
    /// See [`AttributeStore::merge_decode_result`] for the expected shape and
    /// the value filter applied.
    pub fn merge_decode_result(&mut self, body: &[u8]) -> Result<(), DecodeError> {
        self.store.merge_decode_result(body)
    }
}
