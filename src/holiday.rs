//! Holiday acquisition, enrichment and bridge-day determination.
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

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;
use tracing::debug;

use crate::calendar::{is_same_calendar_day, move_to_weekday};
use crate::region::Region;

/// Base URL of the public holiday provider
const API_BASE_URL: &str = "https://feiertage-api.de/api/";

/// Date format used by the provider's `datum` field
const DATE_FMT: &str = "%Y-%m-%d";

/// Holiday name for New Year's Eve
const NAME_SILVESTER: &str = "Silvester";
/// Holiday name for New Year's Day
const NAME_NEUJAHR: &str = "Neujahrstag";
/// Holiday name for Christmas Eve
const NAME_HEILIGABEND: &str = "Heiligabend";

/// One enriched holiday entry of a (region, year) calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayRecord {
    /// Holiday name, unique within one year's result set
    pub name: String,
    /// Calendar date; comparisons are by year/month/day only
    pub date: NaiveDate,
    /// True for the two fixed closures injected locally rather than
    /// returned by the provider
    pub employer_specific: bool,
    /// True only for employer-specific closures flagged as half-day
    pub half_day: bool,
    /// True when the holiday's work-week offers a bridge-day opportunity
    pub bridge_day: bool,
}

/// Failures of the holiday determination service
#[derive(Debug, thiserror::Error)]
pub enum HolidayError {
    /// The provider call itself failed: network error, non-success status
    #[error("holiday provider request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The provider payload carried an unreadable date
    #[error("holiday provider returned unreadable date {value:?} for '{name}'")]
    MalformedDate { name: String, value: String },

    /// The provider answered but knows no holidays for the key; surfaced
    /// distinctly from `Fetch` so the caller can word it differently
    #[error("no public holidays reported for {region} in {year}")]
    EmptyHolidaySet { region: Region, year: i32 },
}

/// Raw provider entry; the response maps holiday names to these objects
#[derive(Debug, Clone, Deserialize)]
pub struct RawHoliday {
    /// Holiday date in `YYYY-MM-DD` form
    pub datum: String,
}

/// Source of raw regional holiday records
pub trait HolidayProvider {
    /// Requests the raw holiday set for one (region, year) key
    fn fetch(
        &self,
        region: Region,
        year: i32,
    ) -> impl Future<Output = Result<HashMap<String, RawHoliday>, HolidayError>>;
}

/// HTTP client for feiertage-api.de
pub struct FeiertageApi {
    client: reqwest::Client,
}

impl FeiertageApi {
    /// Creates a provider with a fresh HTTP client
    pub fn new() -> Self {
        FeiertageApi {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for FeiertageApi {
    fn default() -> Self {
        Self::new()
    }
}

impl HolidayProvider for FeiertageApi {
    /// Requests `?jahr=<year>&nur_land=<region>` and decodes the JSON map
    async fn fetch(
        &self,
        region: Region,
        year: i32,
    ) -> Result<HashMap<String, RawHoliday>, HolidayError> {
        debug!(region = %region, year, "requesting holidays from provider");

        let response = self
            .client
            .get(API_BASE_URL)
            .query(&[("jahr", year.to_string().as_str()), ("nur_land", region.code())])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

/// Determines whether a work-week offers a bridge-day opportunity
///
/// # Arguments
/// * `reference_date` - Any date within the week under inspection
/// * `holiday_dates` - All holiday dates of the calendar under inspection
///
/// # Returns
/// * `true` if the week contains a single working day sandwiched between a
///   holiday and either another holiday or the weekend
///
/// # Algorithm
/// Scans Monday through Friday with one owned cursor. Each iteration moves
/// the cursor to that weekday within its *current* week; the moves are
/// cumulative, so a cursor that crossed a month boundary stays crossed for
/// the following iterations. A holiday hit right after exactly one
/// non-holiday day means that day is bridgeable; a trailing count of
/// exactly one means Friday bridges into the weekend.
pub fn is_bridge_day_candidate(reference_date: NaiveDate, holiday_dates: &[NaiveDate]) -> bool {
    let mut counter_date = reference_date;
    let mut working_days_counter = 0;

    for weekday_index in 1..6 {
        counter_date = move_to_weekday(counter_date, weekday_index);

        let is_holiday = holiday_dates
            .iter()
            .any(|holiday| is_same_calendar_day(*holiday, counter_date));

        if is_holiday {
            if working_days_counter == 1 {
                return true;
            }

            working_days_counter = 0;
        } else {
            working_days_counter += 1;
        }
    }

    // A lone Friday right after a holiday bridges into the weekend
    working_days_counter == 1
}

/// Builds the two fixed employer closures for a year
///
/// Dec 24 and Dec 31 are company rest days in addition to the public
/// holidays; neither is flagged as half-day.
fn employer_specific_closures(year: i32) -> Vec<HolidayRecord> {
    [(NAME_HEILIGABEND, 24), (NAME_SILVESTER, 31)]
        .into_iter()
        .filter_map(|(name, day)| {
            let date = NaiveDate::from_ymd_opt(year, 12, day)?;

            Some(HolidayRecord {
                name: name.to_string(),
                date,
                employer_specific: true,
                half_day: false,
                bridge_day: false,
            })
        })
        .collect()
}

/// Fetches and enriches the holiday calendar for one (region, year) key
///
/// # Arguments
/// * `provider` - Source of the raw regional holiday records
/// * `region` - Federal state whose holidays apply
/// * `year` - Four-digit calendar year
///
/// # Returns
/// * Records sorted ascending by date, with unique names, employer
///   closures appended and bridge-day flags computed
///
/// # Errors
/// * `HolidayError::Fetch` when the provider call fails
/// * `HolidayError::MalformedDate` when a payload date is unreadable
/// * `HolidayError::EmptyHolidaySet` when the provider knows no holidays
///   for the key
pub async fn load_holidays<P: HolidayProvider>(
    provider: &P,
    region: Region,
    year: i32,
) -> Result<Vec<HolidayRecord>, HolidayError> {
    let raw_holidays = provider.fetch(region, year).await?;

    if raw_holidays.is_empty() {
        return Err(HolidayError::EmptyHolidaySet { region, year });
    }

    let mut holidays = Vec::with_capacity(raw_holidays.len() + 2);

    for (name, raw) in raw_holidays {
        let date = NaiveDate::parse_from_str(&raw.datum, DATE_FMT).map_err(|_| {
            HolidayError::MalformedDate {
                name: name.clone(),
                value: raw.datum.clone(),
            }
        })?;

        holidays.push(HolidayRecord {
            name,
            date,
            employer_specific: false,
            half_day: false,
            bridge_day: false,
        });
    }

    // Append the employer closures, skipping names the provider already sent
    for closure in employer_specific_closures(year) {
        if !holidays.iter().any(|holiday| holiday.name == closure.name) {
            holidays.push(closure);
        }
    }

    let holiday_dates: Vec<NaiveDate> = holidays.iter().map(|holiday| holiday.date).collect();

    for holiday in &mut holidays {
        // The neighbouring years are not part of the data set, so the
        // turn-of-year holidays get their flag from the weekday alone
        holiday.bridge_day = match holiday.name.as_str() {
            NAME_SILVESTER => holiday.date.weekday() == Weekday::Tue,
            NAME_NEUJAHR => holiday.date.weekday() == Weekday::Thu,
            _ => is_bridge_day_candidate(holiday.date, &holiday_dates),
        };
    }

    holidays.sort_by_key(|holiday| holiday.date);

    debug!(region = %region, year, count = holidays.len(), "holiday calendar ready");

    Ok(holidays)
}

/// Ticket identifying one fetch attempt; only the latest one may apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Caller-owned latest holiday calendar with stale-response suppression
///
/// Requests are never cancelled; a superseded request's result is simply
/// discarded at apply time. Single-threaded by design, so interior
/// mutability is enough.
pub struct HolidayCalendar<P> {
    /// Source of raw holiday records
    provider: P,
    /// Generation counter; a ticket not matching it is stale
    generation: Cell<u64>,
    /// Most recently applied holiday set
    latest: RefCell<Option<Vec<HolidayRecord>>>,
}

impl<P: HolidayProvider> HolidayCalendar<P> {
    /// Creates an empty calendar over the given provider
    pub fn new(provider: P) -> Self {
        HolidayCalendar {
            provider,
            generation: Cell::new(0),
            latest: RefCell::new(None),
        }
    }

    /// Starts a new fetch attempt, superseding any ticket handed out before
    pub fn begin(&self) -> FetchTicket {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        FetchTicket(generation)
    }

    /// Checks whether a ticket still belongs to the latest fetch attempt
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.generation.get()
    }

    /// Applies a fetch result if its ticket is still the latest
    ///
    /// # Returns
    /// * `true` if the result was stored
    /// * `false` if the ticket was superseded and the result discarded
    pub fn apply(&self, ticket: FetchTicket, holidays: Vec<HolidayRecord>) -> bool {
        if !self.is_current(ticket) {
            debug!("discarding superseded holiday fetch result");
            return false;
        }

        self.latest.replace(Some(holidays));
        true
    }

    /// Fetches, enriches and applies the calendar for one (region, year) key
    ///
    /// # Returns
    /// * `Ok(true)` when the result was applied
    /// * `Ok(false)` when a newer refresh superseded this one while it was
    ///   in flight; neither its result nor its error is surfaced
    pub async fn refresh(&self, region: Region, year: i32) -> Result<bool, HolidayError> {
        let ticket = self.begin();

        let outcome = load_holidays(&self.provider, region, year).await;

        // Checked right before applying: a superseded response must never
        // overwrite state set by a more recent request
        if !self.is_current(ticket) {
            return Ok(false);
        }

        Ok(self.apply(ticket, outcome?))
    }

    /// Returns a copy of the most recently applied holiday set
    pub fn latest(&self) -> Option<Vec<HolidayRecord>> {
        self.latest.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Provider serving a fixed in-memory response
    struct StubProvider {
        entries: Vec<(&'static str, &'static str)>,
    }

    impl HolidayProvider for StubProvider {
        async fn fetch(
            &self,
            _region: Region,
            _year: i32,
        ) -> Result<HashMap<String, RawHoliday>, HolidayError> {
            Ok(self
                .entries
                .iter()
                .map(|(name, datum)| {
                    (
                        name.to_string(),
                        RawHoliday {
                            datum: datum.to_string(),
                        },
                    )
                })
                .collect())
        }
    }

    #[test]
    fn test_bridge_day_midweek_isolation() {
        // 2024-04-02 is a Tuesday holiday; Monday is the lone working day
        let holidays = vec![date(2024, 4, 2)];

        assert!(is_bridge_day_candidate(date(2024, 4, 2), &holidays));
    }

    #[test]
    fn test_bridge_day_trailing_friday_isolation() {
        // 2024-04-04 is a Thursday holiday; Friday bridges into the weekend
        let holidays = vec![date(2024, 4, 4)];

        assert!(is_bridge_day_candidate(date(2024, 4, 4), &holidays));
    }

    #[test]
    fn test_bridge_day_no_isolation() {
        // A lone Wednesday holiday leaves two working days on either side
        let holidays = vec![date(2024, 4, 3)];
        assert!(!is_bridge_day_candidate(date(2024, 4, 3), &holidays));

        // A lone Monday holiday leaves four working days after it
        let holidays = vec![date(2024, 4, 1)];
        assert!(!is_bridge_day_candidate(date(2024, 4, 1), &holidays));
    }

    #[test]
    fn test_bridge_day_between_two_holidays() {
        // Tuesday and Thursday holidays isolate Wednesday
        let holidays = vec![date(2024, 4, 2), date(2024, 4, 4)];

        assert!(is_bridge_day_candidate(date(2024, 4, 2), &holidays));
    }

    #[test]
    fn test_bridge_day_same_week_shares_result() {
        // Both holidays of the week get the identical flag outcome
        let holidays = vec![date(2024, 4, 2), date(2024, 4, 4)];

        assert_eq!(
            is_bridge_day_candidate(date(2024, 4, 2), &holidays),
            is_bridge_day_candidate(date(2024, 4, 4), &holidays)
        );
    }

    #[test]
    fn test_bridge_day_scan_crosses_month_boundary() {
        // 2024-03-01 is a Friday; its week starts on 2024-02-26. A Tuesday
        // holiday in February isolates that week's Monday.
        let holidays = vec![date(2024, 2, 27), date(2024, 3, 1)];

        assert!(is_bridge_day_candidate(date(2024, 3, 1), &holidays));
    }

    #[test]
    fn test_employer_closures_fixed_dates() {
        let closures = employer_specific_closures(2024);

        assert_eq!(closures.len(), 2);
        assert_eq!(closures[0].name, NAME_HEILIGABEND);
        assert_eq!(closures[0].date, date(2024, 12, 24));
        assert_eq!(closures[1].name, NAME_SILVESTER);
        assert_eq!(closures[1].date, date(2024, 12, 31));

        for closure in &closures {
            assert!(closure.employer_specific);
            assert!(!closure.half_day);
            assert!(!closure.bridge_day);
        }
    }

    #[tokio::test]
    async fn test_load_holidays_sorted_with_closures() {
        let provider = StubProvider {
            entries: vec![
                ("Tag der Deutschen Einheit", "2024-10-03"),
                ("Neujahrstag", "2024-01-01"),
                ("1. Weihnachtstag", "2024-12-25"),
            ],
        };

        let holidays = load_holidays(&provider, Region::NW, 2024).await.unwrap();

        let names: Vec<&str> = holidays.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Neujahrstag",
                "Tag der Deutschen Einheit",
                "Heiligabend",
                "1. Weihnachtstag",
                "Silvester",
            ]
        );

        // Sorted ascending by date
        for pair in holidays.windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }

        // Provider entries are not employer-specific
        assert!(!holidays[0].employer_specific);
        assert!(holidays.iter().any(|h| h.employer_specific));
    }

    #[tokio::test]
    async fn test_load_holidays_bridge_day_flags() {
        let provider = StubProvider {
            entries: vec![
                ("Neujahrstag", "2024-01-01"),
                ("Tag der Deutschen Einheit", "2024-10-03"),
                ("1. Weihnachtstag", "2024-12-25"),
            ],
        };

        let holidays = load_holidays(&provider, Region::NW, 2024).await.unwrap();
        let flag = |name: &str| {
            holidays
                .iter()
                .find(|h| h.name == name)
                .unwrap()
                .bridge_day
        };

        // 2024-01-01 is a Monday, not the special-cased Thursday
        assert!(!flag("Neujahrstag"));
        // A Thursday holiday leaves Friday as the lone bridge into the weekend
        assert!(flag("Tag der Deutschen Einheit"));
        // 2024-12-24 is a Tuesday closure with a free Monday before it
        assert!(flag("Heiligabend"));
        // Same week as Heiligabend, so Christmas Day shares the outcome
        assert!(flag("1. Weihnachtstag"));
        // 2024-12-31 is a Tuesday, the special-cased Silvester weekday
        assert!(flag("Silvester"));
    }

    #[tokio::test]
    async fn test_load_holidays_new_year_thursday_rule() {
        let provider = StubProvider {
            entries: vec![("Neujahrstag", "2026-01-01")],
        };

        let holidays = load_holidays(&provider, Region::BY, 2026).await.unwrap();
        let new_year = holidays.iter().find(|h| h.name == NAME_NEUJAHR).unwrap();

        // 2026-01-01 is a Thursday, so the prior year's Silvester is assumed
        // to isolate a bridge day
        assert!(new_year.bridge_day);
    }

    #[tokio::test]
    async fn test_load_holidays_unique_names() {
        let provider = StubProvider {
            entries: vec![("Silvester", "2024-12-31"), ("Neujahrstag", "2024-01-01")],
        };

        let holidays = load_holidays(&provider, Region::BE, 2024).await.unwrap();

        let mut names: Vec<&str> = holidays.iter().map(|h| h.name.as_str()).collect();
        names.sort();
        let before = names.len();
        names.dedup();

        assert_eq!(names.len(), before);
    }

    #[tokio::test]
    async fn test_load_holidays_empty_set_is_distinct() {
        let provider = StubProvider { entries: vec![] };

        let result = load_holidays(&provider, Region::SN, 2024).await;

        assert!(matches!(
            result,
            Err(HolidayError::EmptyHolidaySet {
                region: Region::SN,
                year: 2024
            })
        ));
    }

    #[tokio::test]
    async fn test_load_holidays_malformed_date() {
        let provider = StubProvider {
            entries: vec![("Neujahrstag", "not-a-date")],
        };

        let result = load_holidays(&provider, Region::HH, 2024).await;

        assert!(matches!(
            result,
            Err(HolidayError::MalformedDate { .. })
        ));
    }

    #[test]
    fn test_superseded_ticket_never_applies() {
        let calendar = HolidayCalendar::new(StubProvider { entries: vec![] });

        let record = HolidayRecord {
            name: "Neujahrstag".to_string(),
            date: date(2024, 1, 1),
            employer_specific: false,
            half_day: false,
            bridge_day: false,
        };

        let slow = calendar.begin();
        let fast = calendar.begin();

        assert!(!calendar.is_current(slow));
        assert!(calendar.is_current(fast));

        // The slower, earlier request resolves last but must not win
        assert!(calendar.apply(fast, vec![record.clone()]));
        assert!(!calendar.apply(slow, vec![]));

        assert_eq!(calendar.latest(), Some(vec![record]));
    }

    #[tokio::test]
    async fn test_refresh_applies_latest() {
        let calendar = HolidayCalendar::new(StubProvider {
            entries: vec![("Neujahrstag", "2024-01-01")],
        });

        assert!(calendar.refresh(Region::NW, 2024).await.unwrap());

        let holidays = calendar.latest().unwrap();
        assert_eq!(holidays.len(), 3);
    }
}
