//! Office day calculator against German public holiday calendars.
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

use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use tracing::warn;

use crate::calendar::{count_working_days_in_month, working_days_to_office_days};
use crate::holiday::{FeiertageApi, HolidayCalendar, HolidayError, HolidayRecord};
use crate::region::Region;
use crate::section::{aggregate, Category, InputSection, Sign, Unit};
use crate::store::Settings;

mod calendar;
mod cli;
mod holiday;
mod region;
mod section;
mod store;

/// Month names in the fixed output locale
const MONTH_NAMES: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Weekly hours assumed when neither the command line nor the settings
/// file provides a value
const DEFAULT_WEEKLY_HOURS: f64 = 40.0;

/// Main entry point for the office day calculator
///
/// # Usage Examples
/// ```bash
/// # Office days for 20 entered working days, full time, NRW holidays
/// buerotage -r NW -y 2024 -s 20d:work
///
/// # Seed the first section from March and subtract a week of vacation
/// buerotage -m 3 -s 0d:work -s -1w:holiday
///
/// # Just the per-month working-day table
/// buerotage -r BY -y 2025 --months
/// ```
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command-line arguments
    let cli = cli::Cli::parse();

    // Merge persisted choices under the command-line values
    let settings = if cli.no_store() {
        Settings::default()
    } else {
        Settings::load(cli.store())
    };

    let region = cli.region().or(settings.region).unwrap_or(Region::NW);
    let year = cli
        .year()
        .or(settings.year)
        .unwrap_or_else(|| Local::now().year());
    let weekly_hours = cli
        .weekly_hours()
        .or(settings.weekly_working_hours)
        .unwrap_or(DEFAULT_WEEKLY_HOURS);

    let mut sections: Vec<InputSection> = if cli.sections().is_empty() {
        restore_sections(settings.sections.as_deref().unwrap_or(&[]))
    } else {
        cli.sections().to_vec()
    };

    // Fetch and enrich the holiday calendar
    let holiday_calendar = HolidayCalendar::new(FeiertageApi::new());

    let holidays = match holiday_calendar.refresh(region, year).await {
        Ok(true) => holiday_calendar.latest().unwrap_or_default(),
        // A single request cannot be superseded, but the guard is explicit
        Ok(false) => Vec::new(),
        Err(HolidayError::EmptyHolidaySet { .. }) => {
            // Not a hard error, the calculation just runs without holidays
            warn!(region = %region, year, "provider reported no holidays");
            Vec::new()
        }
        Err(error) => return Err(error.into()),
    };

    let holiday_dates: Vec<NaiveDate> = holidays.iter().map(|holiday| holiday.date).collect();

    // Seed the first section from the selected month's working days
    if let Some(month) = cli.month() {
        let working_days = count_working_days_in_month(year, month, &holiday_dates);
        let seed = InputSection::new(
            Some(working_days as f64),
            Some(Unit::Days),
            Category::WorkingDay,
            Sign::Add,
        );

        if sections.is_empty() {
            sections.push(seed);
        } else {
            sections[0] = seed;
        }
    }

    if cli.months() {
        print_month_table(year, &holiday_dates);
    }

    if !holidays.is_empty() {
        print_holidays(region, year, &holidays);
    }

    // Aggregate the sections and convert to office days
    let totals = aggregate(&sections);
    let office_days = working_days_to_office_days(
        totals.working_days,
        totals.business_trip_days,
        Some(weekly_hours),
    );

    println!();
    println!("Arbeitstage: {}", totals.working_days);
    println!("Reisetage:   {}", totals.business_trip_days);
    println!("Bürotage:    {}", office_days);

    // Remember the inputs for the next run
    if !cli.no_store() {
        let settings = Settings {
            region: Some(region),
            year: Some(year),
            weekly_working_hours: Some(weekly_hours),
            sections: Some(sections.iter().map(|section| section.to_string()).collect()),
        };

        if let Err(error) = settings.save(cli.store()) {
            warn!(%error, "could not persist settings");
        }
    }

    Ok(())
}

/// Rebuilds sections from their persisted text form
///
/// Malformed entries are dropped with a warning rather than failing the run.
fn restore_sections(stored: &[String]) -> Vec<InputSection> {
    stored
        .iter()
        .filter_map(|text| match text.parse::<InputSection>() {
            Ok(section) => Some(section),
            Err(error) => {
                warn!(%error, "skipping persisted section");
                None
            }
        })
        .collect()
}

/// Prints the working-day count of every month of the year
fn print_month_table(year: i32, holiday_dates: &[NaiveDate]) {
    println!();
    println!("Arbeitstage {}", year);

    for (index, name) in MONTH_NAMES.iter().enumerate() {
        let month = index as u32 + 1;
        let working_days = count_working_days_in_month(year, month, holiday_dates);

        println!("  {:<10} {:>2}", name, working_days);
    }
}

/// Prints the enriched holiday list with closure and bridge-day markers
fn print_holidays(region: Region, year: i32, holidays: &[HolidayRecord]) {
    println!();
    println!("Feiertage {} ({})", year, region.label());

    for holiday in holidays {
        let mut markers = String::new();

        if holiday.employer_specific {
            markers.push_str(" *");
        }
        if holiday.half_day {
            markers.push_str(" (halber Tag)");
        }
        if holiday.bridge_day {
            markers.push_str(" (Brückentag möglich)");
        }

        println!(
            "  {}  {}{}",
            holiday.date.format("%d.%m.%Y"),
            holiday.name,
            markers
        );
    }
}
