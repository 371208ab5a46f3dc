//! NYC Open Data row types.

use serde::{Deserialize, Serialize};

use crate::de;

/// A PLUTO land-use row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlutoLot {
    #[serde(deserialize_with = "de::string")]
    pub bbl: String,
    /// Land-use category code (`01`–`11`).
    #[serde(rename = "landuse", default, deserialize_with = "de::opt_string")]
    pub land_use: Option<String>,
    /// Square feet.
    #[serde(rename = "lotarea", default, deserialize_with = "de::opt_string")]
    pub lot_area: Option<String>,
    #[serde(rename = "bldgarea", default, deserialize_with = "de::opt_string")]
    pub building_area: Option<String>,
    #[serde(rename = "yearbuilt", default, deserialize_with = "de::opt_string")]
    pub year_built: Option<String>,
    #[serde(rename = "unitsres", default, deserialize_with = "de::opt_string")]
    pub residential_units: Option<String>,
    #[serde(rename = "unitstotal", default, deserialize_with = "de::opt_string")]
    pub total_units: Option<String>,
    #[serde(rename = "zonedist1", default, deserialize_with = "de::opt_string")]
    pub zoning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DobViolation {
    #[serde(rename = "isn_dob_violation", deserialize_with = "de::string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub issue_date: Option<String>,
    #[serde(
        rename = "violation_type_code",
        default,
        deserialize_with = "de::opt_string"
    )]
    pub violation_type: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub violation_status: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub description: Option<String>,
}

impl DobViolation {
    /// Open while the status carries `ACTIVE`; resolved rows read like
    /// `V*-DOB VIOLATION - DISMISSED`.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.violation_status
            .as_deref()
            .is_some_and(|s| s.to_uppercase().contains("ACTIVE"))
    }
}

/// An ACRIS real-property record for a lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDocument {
    pub document_id: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub record_type: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub property_type: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub street_number: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub street_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub good_through_date: Option<String>,
}

/// A party named on an ACRIS document (grantor, grantee, lender, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentParty {
    pub document_id: String,
    #[serde(rename = "name")]
    pub party_name: String,
    #[serde(deserialize_with = "de::string")]
    pub party_type: String,
}

/// An HPD registration contact (owner, agent, officer, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HpdContact {
    #[serde(deserialize_with = "de::string")]
    pub bbl: String,
    #[serde(rename = "type")]
    pub contact_type: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub phone: Option<String>,
}

/// Everything on file for one lot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParcelReport {
    pub lot: Option<PlutoLot>,
    pub violations: Vec<DobViolation>,
    pub documents: Vec<PropertyDocument>,
    pub parties: Vec<DocumentParty>,
    pub contacts: Vec<HpdContact>,
}

impl ParcelReport {
    #[must_use]
    pub fn open_violation_count(&self) -> usize {
        self.violations.iter().filter(|v| v.is_open()).count()
    }
}
