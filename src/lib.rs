//! Validation, normalization, and decoding support for the 17-character
//! Vehicle Identification Number format.
//!
//! Chassis verifies the check digit a VIN embeds at position nine ([`check`]),
//! derives a candidate model year from the year code at position ten
//! ([`year`]), and wraps both in a mutable record holding a cache of decoded
//! vehicle attributes ([`record`]).
//!
//! The pure functions in [`check`] and [`year`] hold no state and are safe to
//! call concurrently. [`record::VinRecord`] and its attribute cache are
//! single-owner mutable state; share them across threads only under external
//! synchronization.
//!
//! Decoded attributes can be populated locally, by restoring a previously
//! serialized blob, or remotely, by handing a decode-service response to the
//! record's merge routine. The [`fetch`] module provides a single-shot client
//! for the NHTSA decode service filling that role.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `fetch`: enable the HTTP retrieval module (default).

pub mod check;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod record;
pub mod year;
