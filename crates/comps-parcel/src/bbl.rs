//! Borough-block-lot keys.

use std::str::FromStr;

use crate::error::ParcelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Borough {
    Manhattan,
    Bronx,
    Brooklyn,
    Queens,
    StatenIsland,
}

impl Borough {
    /// Numeric borough code used in BBLs (1–5).
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Borough::Manhattan => 1,
            Borough::Bronx => 2,
            Borough::Brooklyn => 3,
            Borough::Queens => 4,
            Borough::StatenIsland => 5,
        }
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Borough::Manhattan),
            2 => Some(Borough::Bronx),
            3 => Some(Borough::Brooklyn),
            4 => Some(Borough::Queens),
            5 => Some(Borough::StatenIsland),
            _ => None,
        }
    }

    /// Name in the form GeoClient expects.
    #[must_use]
    pub fn geoclient_name(self) -> &'static str {
        match self {
            Borough::Manhattan => "MANHATTAN",
            Borough::Bronx => "BRONX",
            Borough::Brooklyn => "BROOKLYN",
            Borough::Queens => "QUEENS",
            Borough::StatenIsland => "STATEN ISLAND",
        }
    }

    /// Strict name match: borough or county names, case-insensitive.
    /// Anything containing "New York" or "Manhattan" is Manhattan.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_uppercase();
        if normalized.contains("NEW YORK") || normalized.contains("MANHATTAN") {
            return Some(Borough::Manhattan);
        }
        match normalized.as_str() {
            "BRONX" | "THE BRONX" | "BRONX COUNTY" => Some(Borough::Bronx),
            "BROOKLYN" | "KINGS COUNTY" => Some(Borough::Brooklyn),
            "QUEENS" | "QUEENS COUNTY" => Some(Borough::Queens),
            "STATEN ISLAND" | "RICHMOND COUNTY" => Some(Borough::StatenIsland),
            _ => None,
        }
    }

    /// Maps a reverse-geocoder place name ("Kings County", "The Bronx",
    /// "New York") onto a borough.
    ///
    /// Unrecognised names fall back to Manhattan.
    #[must_use]
    pub fn from_place_name(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::warn!(place = name, "unknown borough name; assuming Manhattan");
            Borough::Manhattan
        })
    }
}

impl std::fmt::Display for Borough {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.geoclient_name())
    }
}

/// A tax lot: borough, block (≤ 5 digits), lot (≤ 4 digits).
///
/// Displays as the canonical 10-digit key, e.g. `1008350041`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bbl {
    pub borough: Borough,
    pub block: u32,
    pub lot: u32,
}

impl Bbl {
    /// # Errors
    ///
    /// Returns [`ParcelError::InvalidBbl`] if `block` or `lot` is zero or has
    /// too many digits.
    pub fn new(borough: Borough, block: u32, lot: u32) -> Result<Self, ParcelError> {
        let invalid = |reason: &str| ParcelError::InvalidBbl {
            input: format!("{}/{block}/{lot}", borough.code()),
            reason: reason.to_string(),
        };
        if block == 0 || block > 99_999 {
            return Err(invalid("block must be 1-99999"));
        }
        if lot == 0 || lot > 9_999 {
            return Err(invalid("lot must be 1-9999"));
        }
        Ok(Self {
            borough,
            block,
            lot,
        })
    }

    /// Builds a BBL from the separate string parts GeoClient returns.
    ///
    /// # Errors
    ///
    /// Returns [`ParcelError::InvalidBbl`] if any part is non-numeric or out
    /// of range.
    pub fn from_parts(borough: &str, block: &str, lot: &str) -> Result<Self, ParcelError> {
        let input = format!("{borough}/{block}/{lot}");
        let invalid = |reason: &str| ParcelError::InvalidBbl {
            input: input.clone(),
            reason: reason.to_string(),
        };
        let borough = borough
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(Borough::from_code)
            .ok_or_else(|| invalid("borough code must be 1-5"))?;
        let block = block
            .trim()
            .parse::<u32>()
            .map_err(|_| invalid("block is not numeric"))?;
        let lot = lot
            .trim()
            .parse::<u32>()
            .map_err(|_| invalid("lot is not numeric"))?;
        Self::new(borough, block, lot)
    }

    /// Block zero-padded to 5 digits.
    #[must_use]
    pub fn padded_block(&self) -> String {
        format!("{:05}", self.block)
    }

    /// Lot zero-padded to 4 digits.
    #[must_use]
    pub fn padded_lot(&self) -> String {
        format!("{:04}", self.lot)
    }
}

impl std::fmt::Display for Bbl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.borough.code(),
            self.padded_block(),
            self.padded_lot()
        )
    }
}

impl FromStr for Bbl {
    type Err = ParcelError;

    /// Parses the 10-digit key. A trailing `.00000000` (as PLUTO exports
    /// it) is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .split_once('.')
            .map_or(trimmed, |(whole, _)| whole);
        if digits.len() != 10 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParcelError::InvalidBbl {
                input: s.to_string(),
                reason: "expected 10 digits".to_string(),
            });
        }
        Self::from_parts(&digits[..1], &digits[1..6], &digits[6..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_ten_digits() {
        let bbl = Bbl::new(Borough::Manhattan, 835, 41).unwrap();
        assert_eq!(bbl.to_string(), "1008350041");
        assert_eq!(bbl.padded_block(), "00835");
        assert_eq!(bbl.padded_lot(), "0041");
    }

    #[test]
    fn parses_ten_digit_key() {
        let bbl: Bbl = "3012340056".parse().unwrap();
        assert_eq!(bbl.borough, Borough::Brooklyn);
        assert_eq!(bbl.block, 1234);
        assert_eq!(bbl.lot, 56);
    }

    #[test]
    fn parses_pluto_decimal_export() {
        let bbl: Bbl = "1008350041.00000000".parse().unwrap();
        assert_eq!(bbl.to_string(), "1008350041");
    }

    #[test]
    fn rejects_bad_keys() {
        assert!("100835004".parse::<Bbl>().is_err());
        assert!("6008350041".parse::<Bbl>().is_err());
        assert!("1abc350041".parse::<Bbl>().is_err());
        assert!("1000000041".parse::<Bbl>().is_err());
    }

    #[test]
    fn from_parts_accepts_geoclient_strings() {
        let bbl = Bbl::from_parts("4", "01234", "0005").unwrap();
        assert_eq!(bbl.borough, Borough::Queens);
        assert_eq!(bbl.to_string(), "4012340005");
    }

    #[test]
    fn borough_codes_round_trip() {
        for code in 1..=5 {
            assert_eq!(Borough::from_code(code).unwrap().code(), code);
        }
        assert!(Borough::from_code(0).is_none());
    }

    #[test]
    fn place_names_map_to_boroughs() {
        assert_eq!(Borough::from_place_name("New York County"), Borough::Manhattan);
        assert_eq!(Borough::from_place_name("manhattan"), Borough::Manhattan);
        assert_eq!(Borough::from_place_name("The Bronx"), Borough::Bronx);
        assert_eq!(Borough::from_place_name("Kings County"), Borough::Brooklyn);
        assert_eq!(Borough::from_place_name("Queens County"), Borough::Queens);
        assert_eq!(
            Borough::from_place_name("Richmond County"),
            Borough::StatenIsland
        );
    }

    #[test]
    fn strict_name_match_rejects_unknown_names() {
        assert_eq!(Borough::from_name("Brooklyn"), Some(Borough::Brooklyn));
        assert_eq!(Borough::from_name(" the bronx "), Some(Borough::Bronx));
        assert_eq!(Borough::from_name("Brokyln"), None);
        assert_eq!(Borough::from_name(""), None);
    }

    #[test]
    fn unknown_place_defaults_to_manhattan() {
        assert_eq!(Borough::from_place_name("Hoboken"), Borough::Manhattan);
    }
}
