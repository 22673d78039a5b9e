//! Command-line interface parser for the office day calculator.
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

use std::path::{Path, PathBuf};

use clap::{builder::TypedValueParser, Parser};

use crate::region::Region;
use crate::section::InputSection;

/// Help message for the section value format
const SECTION_HELP: &str = "Section format: [+|-]<amount><d|w>:<work|trip|holiday|sick>, e.g. \"20d:work\" or \"-1w:holiday\"";

/// Default file remembering the last-used inputs
const DEFAULT_STORE_FILE: &str = "buerotage.toml";

/// Command-line interface structure
#[derive(Parser)]
#[command(
    version(env!("CARGO_PKG_VERSION")),
    author(env!("CARGO_PKG_AUTHORS")),
    about(env!("CARGO_PKG_DESCRIPTION")),
    long_about = "Calculates how many days per period must be spent in the \
                 office, from entered work/absence/travel sections and the \
                 public holiday calendar of a German federal state."
)]
pub struct Cli {
    /// Federal state whose public holidays apply
    ///
    /// Falls back to the persisted choice, then to NW.
    #[arg(long, short, value_enum)]
    region: Option<Region>,

    /// Four-digit calendar year
    ///
    /// Falls back to the persisted choice, then to the current year.
    #[arg(long, short, value_parser = YearParser)]
    year: Option<i32>,

    /// Contracted weekly working hours
    ///
    /// Falls back to the persisted value, then to 40. Contracts of 35 hours
    /// or more count as full time for the office-day quota.
    #[arg(long, short = 'w')]
    weekly_hours: Option<f64>,

    /// Work, absence or travel section; may be given multiple times
    ///
    /// The first section always adds; later sections honor their sign.
    #[arg(
        long = "section",
        short = 's',
        allow_hyphen_values = true,
        value_parser = SectionParser,
        help = SECTION_HELP
    )]
    sections: Vec<InputSection>,

    /// Seed the first section with this month's working days (1-12)
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Print the per-month working-day table for the chosen year
    #[arg(long)]
    months: bool,

    /// Settings file remembering the last-used inputs
    #[arg(long, default_value = DEFAULT_STORE_FILE)]
    store: PathBuf,

    /// Do not read or update the settings file
    #[arg(long)]
    no_store: bool,
}

impl Cli {
    /// Returns the chosen region, if given
    pub fn region(&self) -> Option<Region> {
        self.region
    }

    /// Returns the chosen year, if given
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Returns the entered weekly working hours, if given
    pub fn weekly_hours(&self) -> Option<f64> {
        self.weekly_hours
    }

    /// Returns the entered sections in command-line order
    pub fn sections(&self) -> &[InputSection] {
        &self.sections
    }

    /// Returns the month whose working days seed the first section
    pub fn month(&self) -> Option<u32> {
        self.month
    }

    /// Returns whether the per-month table was requested
    pub fn months(&self) -> bool {
        self.months
    }

    /// Returns the settings file path
    pub fn store(&self) -> &Path {
        &self.store
    }

    /// Returns whether the settings file should be left untouched
    pub fn no_store(&self) -> bool {
        self.no_store
    }
}

/// Custom parser for four-digit year values
#[derive(Clone)]
struct YearParser;

impl TypedValueParser for YearParser {
    type Value = i32;

    /// Parses and validates a four-digit year
    ///
    /// # Arguments
    /// * `value` - String value from command line
    ///
    /// # Returns
    /// * `Result<i32, clap::Error>` - Year in 1000..=9999 or error
    fn parse_ref(
        &self,
        _cmd: &clap::Command,
        _arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let Some(value_str) = value.to_str() else {
            return Err(clap::Error::new(clap::error::ErrorKind::DisplayHelp));
        };

        match value_str.parse::<i32>() {
            Ok(year) if (1000..=9999).contains(&year) => Ok(year),
            _ => Err(clap::Error::raw(
                clap::error::ErrorKind::InvalidValue,
                format!("'{}' is not a four-digit year", value_str),
            )),
        }
    }
}

/// Custom parser for section values
#[derive(Clone)]
struct SectionParser;

impl TypedValueParser for SectionParser {
    type Value = InputSection;

    /// Parses a compact section description
    ///
    /// # Supported Formats
    /// * `20d:work` - twenty working days, added
    /// * `-1w:holiday` - one week of vacation, subtracted
    /// * `3d:trip` - three business-trip days
    fn parse_ref(
        &self,
        _cmd: &clap::Command,
        _arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let Some(value_str) = value.to_str() else {
            return Err(clap::Error::new(clap::error::ErrorKind::DisplayHelp));
        };

        value_str
            .parse::<InputSection>()
            .map_err(|_| clap::Error::raw(clap::error::ErrorKind::InvalidValue, SECTION_HELP))
    }
}
