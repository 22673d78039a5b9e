//! Input sections and the signed multi-section aggregation engine.
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
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::calendar::days_from_quantity;

/// Unit a section quantity is entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Plain working days
    Days,
    /// Weeks of exactly five working days each
    Weeks,
}

/// Kind of time a section describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Regular working time
    WorkingDay,
    /// Travel that substitutes for office presence
    BusinessTrip,
    /// Vacation
    Holiday,
    /// Sick leave
    Sick,
}

/// Whether a section adds to or subtracts from the running total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Add,
    Subtract,
}

/// Monotonic source for section identifiers, never reused within a run
static NEXT_SECTION_ID: AtomicU64 = AtomicU64::new(1);

/// One user-entered period of work, absence or travel
#[derive(Debug, Clone)]
pub struct InputSection {
    /// Opaque stable identifier, assigned once at creation
    id: String,
    /// Entered amount, `None` while the field is unset
    pub quantity: Option<f64>,
    /// Entered unit, `None` while the field is unset
    pub unit: Option<Unit>,
    /// What kind of time the section stands for
    pub category: Category,
    /// Stored sign; the first section of a sequence is always treated as add
    pub sign: Sign,
}

impl InputSection {
    /// Creates a section and assigns it a fresh identifier
    pub fn new(quantity: Option<f64>, unit: Option<Unit>, category: Category, sign: Sign) -> Self {
        let id = NEXT_SECTION_ID.fetch_add(1, Ordering::Relaxed);

        InputSection {
            id: format!("section-{}", id),
            quantity,
            unit,
            category,
            sign,
        }
    }

    /// Returns the section's stable identifier
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Totals produced by one pass over a section sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregation {
    /// Signed working-day total; fractional quantities stay fractional
    pub working_days: f64,
    /// Business-trip total, invariant to sign and position
    pub business_trip_days: f64,
}

/// Reduces an ordered section sequence to working-day and trip totals
///
/// # Arguments
/// * `sections` - User-authored sections in entry order
///
/// # Returns
/// * `Aggregation` totals; never fails, malformed quantities count as 0
///
/// # Algorithm
/// The first section is exempt from sign handling and always adds. Sections
/// with a subtract sign reduce the working-day total unless they are
/// business trips, which are deducted from the resulting office days
/// instead. Holidays and sick leave are never added to the working days.
pub fn aggregate(sections: &[InputSection]) -> Aggregation {
    let mut working_days = 0.0;
    let mut business_trip_days = 0.0;

    for (index, section) in sections.iter().enumerate() {
        let days_from_section = days_from_quantity(section.quantity, section.unit);

        if index != 0 && section.sign == Sign::Subtract {
            match section.category {
                // Business trips are deducted from the office days later on
                Category::BusinessTrip => {}
                Category::WorkingDay | Category::Holiday | Category::Sick => {
                    working_days -= days_from_section;
                }
            }
        } else {
            match section.category {
                // Sick leave and holidays are not added to the working days
                Category::Holiday | Category::Sick => {}
                Category::WorkingDay | Category::BusinessTrip => {
                    working_days += days_from_section;
                }
            }
        }

        if section.category == Category::BusinessTrip {
            business_trip_days += days_from_section;
        }
    }

    Aggregation {
        working_days,
        business_trip_days,
    }
}

/// Failure to read a section from its text form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid section '{input}': expected [+|-]<amount><d|w>:<work|trip|holiday|sick>")]
pub struct ParseSectionError {
    input: String,
}

impl FromStr for InputSection {
    type Err = ParseSectionError;

    /// Parses the compact text form used on the command line and in the
    /// settings file
    ///
    /// # Supported Formats
    /// * `10d:work` - ten working days, added
    /// * `-2w:holiday` - two weeks of vacation, subtracted
    /// * `3d:trip` - three business-trip days
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSectionError {
            input: s.to_string(),
        };

        let (sign, rest) = match s.strip_prefix('-') {
            Some(rest) => (Sign::Subtract, rest),
            None => (Sign::Add, s.strip_prefix('+').unwrap_or(s)),
        };

        let (amount, category) = rest.split_once(':').ok_or_else(err)?;

        let category = match category {
            "work" | "working-day" => Category::WorkingDay,
            "trip" | "business-trip" => Category::BusinessTrip,
            "holiday" => Category::Holiday,
            "sick" => Category::Sick,
            _ => return Err(err()),
        };

        let (quantity, unit) = if let Some(quantity) = amount.strip_suffix(['d', 'D']) {
            (quantity, Unit::Days)
        } else if let Some(quantity) = amount.strip_suffix(['w', 'W']) {
            (quantity, Unit::Weeks)
        } else {
            // A bare number defaults to days, matching the form's default unit
            (amount, Unit::Days)
        };

        let quantity = quantity.parse::<f64>().map_err(|_| err())?;
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(err());
        }

        Ok(InputSection::new(
            Some(quantity),
            Some(unit),
            category,
            sign,
        ))
    }
}

impl fmt::Display for InputSection {
    /// Writes the compact text form accepted by `FromStr`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign == Sign::Subtract {
            write!(f, "-")?;
        }

        match self.quantity {
            Some(quantity) => write!(f, "{}", quantity)?,
            None => write!(f, "0")?,
        }

        match self.unit {
            Some(Unit::Weeks) => write!(f, "w")?,
            Some(Unit::Days) | None => write!(f, "d")?,
        }

        let category = match self.category {
            Category::WorkingDay => "work",
            Category::BusinessTrip => "trip",
            Category::Holiday => "holiday",
            Category::Sick => "sick",
        };

        write!(f, ":{}", category)
    }
}
