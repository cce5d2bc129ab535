//! Instrument parts and their identity
//!
//! - [`InstrumentPart`]: a reconciled part with a 1-indexed inclusive page range
//! - [`InstrumentRecord`]: the loosely-typed form parts arrive in (oracle JSON,
//!   caller-supplied lists); [`InstrumentRecord::normalize`] is the one place
//!   where a record becomes a part
//! - [`IdentityKey`]: the merge key used across replicas

pub mod entities;
pub mod identity;
pub mod record;

pub use entities::InstrumentPart;
pub use identity::{IdentityKey, is_absent_voice, normalize_name, normalize_voice};
pub use record::InstrumentRecord;
