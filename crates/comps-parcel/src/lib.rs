//! NYC parcel lookups.
//!
//! Resolves a street address to a borough-block-lot key through GeoClient,
//! then pulls the public records filed against that lot from NYC Open Data:
//! the PLUTO land-use row, DOB violations, ACRIS documents and their
//! parties, and HPD registration contacts.

pub mod bbl;
pub mod error;
pub mod geoclient;
pub mod open_data;
pub mod types;

mod de;

pub use bbl::{Bbl, Borough};
pub use error::ParcelError;
pub use geoclient::{GeoAddress, GeoClient};
pub use open_data::OpenDataClient;
pub use types::{DobViolation, DocumentParty, HpdContact, ParcelReport, PlutoLot, PropertyDocument};
