use serde::{Deserialize, Deserializer, Serialize};

/// A business returned by a directory search.
///
/// Deserializes directly from the directory wire shape, where the street
/// address lives under `location.address1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessCandidate {
    /// Directory-assigned identifier, unique within one search response.
    pub id: String,
    pub name: String,
    pub review_count: u32,
    /// Star rating in `[0.0, 5.0]`.
    pub rating: f64,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub phone: Option<String>,
    #[serde(
        default,
        rename(deserialize = "location"),
        deserialize_with = "address_from_location"
    )]
    pub address: Option<String>,
}

#[derive(Deserialize)]
struct WireLocation {
    #[serde(default)]
    address1: Option<String>,
}

/// The directory sends `""` for businesses without a listed phone.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

fn address_from_location<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let location = Option::<WireLocation>::deserialize(deserializer)?;
    Ok(location
        .and_then(|l| l.address1)
        .filter(|s| !s.trim().is_empty()))
}
