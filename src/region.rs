//! Closed vocabulary of German federal-state region codes.
//!
//! MIT License
//!
//! Copyright (c) 2026 buerotage contributors
//!
//! Permission is hereby granted, free of charge, to any person obtaining a copy
//! of this software and associated documentation files (the "Software"), to deal
//! in the Software without restriction, including without limitation the rights
//! to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
//! copies of the Software, and to permit persons to whom the Software is
//! furnished to do so, subject to the following conditions:
//!
//! The above copyright notice and this permission notice shall be included in all
//! copies or substantial portions of the Software.
//!
//! THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
//! IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//! FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//! AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//! LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
//! OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
//! SOFTWARE.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Two-letter codes of the sixteen German federal states
///
/// The holiday provider is keyed by these codes; the set is closed, so a new
/// subdivision requires a compile-time-checked update everywhere it is
/// matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "UPPER")]
pub enum Region {
    BW,
    BY,
    BE,
    BB,
    HB,
    HH,
    HE,
    MV,
    NI,
    NW,
    RP,
    SL,
    SN,
    ST,
    SH,
    TH,
}

/// All sixteen region codes, in the order they are presented to the user
pub const ALL_REGIONS: [Region; 16] = [
    Region::BW,
    Region::BY,
    Region::BE,
    Region::BB,
    Region::HB,
    Region::HH,
    Region::HE,
    Region::MV,
    Region::NI,
    Region::NW,
    Region::RP,
    Region::SL,
    Region::SN,
    Region::ST,
    Region::SH,
    Region::TH,
];

impl Region {
    /// Returns the two-letter code sent to the holiday provider
    pub fn code(&self) -> &'static str {
        match self {
            Region::BW => "BW",
            Region::BY => "BY",
            Region::BE => "BE",
            Region::BB => "BB",
            Region::HB => "HB",
            Region::HH => "HH",
            Region::HE => "HE",
            Region::MV => "MV",
            Region::NI => "NI",
            Region::NW => "NW",
            Region::RP => "RP",
            Region::SL => "SL",
            Region::SN => "SN",
            Region::ST => "ST",
            Region::SH => "SH",
            Region::TH => "TH",
        }
    }

    /// Returns the human-readable state name
    pub fn label(&self) -> &'static str {
        match self {
            Region::BW => "Baden-Württemberg",
            Region::BY => "Bayern",
            Region::BE => "Berlin",
            Region::BB => "Brandenburg",
            Region::HB => "Bremen",
            Region::HH => "Hamburg",
            Region::HE => "Hessen",
            Region::MV => "Mecklenburg-Vorpommern",
            Region::NI => "Niedersachsen",
            Region::NW => "Nordrhein-Westfalen",
            Region::RP => "Rheinland-Pfalz",
            Region::SL => "Saarland",
            Region::SN => "Sachsen",
            Region::ST => "Sachsen-Anhalt",
            Region::SH => "Schleswig-Holstein",
            Region::TH => "Thüringen",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_regions_lists_sixteen_distinct_codes() {
        let mut codes: Vec<&str> = ALL_REGIONS.iter().map(|region| region.code()).collect();
        codes.sort();
        codes.dedup();

        assert_eq!(codes.len(), 16);
    }

    #[test]
    fn test_codes_are_two_letters() {
        for region in ALL_REGIONS {
            assert_eq!(region.code().len(), 2);
        }
    }

    #[test]
    fn test_display_matches_code() {
        assert_eq!(Region::NW.to_string(), "NW");
        assert_eq!(Region::BW.to_string(), "BW");
    }

    #[test]
    fn test_labels_are_nonempty() {
        for region in ALL_REGIONS {
            assert!(!region.label().is_empty());
        }
    }

    #[test]
    fn test_serde_round_trip() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            region: Region,
        }

        let parsed: Wrapper = toml::from_str("region = \"BY\"").unwrap();
        assert_eq!(parsed.region, Region::BY);

        let serialized = toml::to_string(&Wrapper { region: Region::BY }).unwrap();
        assert_eq!(serialized.trim(), "region = \"BY\"");
    }
}
