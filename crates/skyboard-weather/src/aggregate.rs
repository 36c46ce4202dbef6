//! Reduce a 3-hour forecast to one representative entry per calendar date.
//!
//! Entries are grouped by the date of their timestamp in the viewer's time
//! zone, and the first entry of each group stands in for the whole day.
//! Groups come out in the order their date was first seen in the input.
//! No min/max/average is computed.

use std::collections::HashMap;

use chrono::{Local, NaiveDate, TimeZone};

use crate::types::{ForecastDay, ForecastEntry};

/// Forecast entries keyed by calendar date, in first-encountered date order.
#[derive(Debug, Default)]
pub struct DateGroups<'a> {
    groups: Vec<(NaiveDate, Vec<&'a ForecastEntry>)>,
    index: HashMap<NaiveDate, usize>,
}

impl<'a> DateGroups<'a> {
    fn push(&mut self, date: NaiveDate, entry: &'a ForecastEntry) {
        match self.index.get(&date) {
            Some(&i) => self.groups[i].1.push(entry),
            None => {
                self.index.insert(date, self.groups.len());
                self.groups.push((date, vec![entry]));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Dates in first-encountered order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.groups.iter().map(|(date, _)| *date)
    }

    /// Entries for `date`, in input order
    pub fn get(&self, date: &NaiveDate) -> Option<&[&'a ForecastEntry]> {
        self.index.get(date).map(|&i| self.groups[i].1.as_slice())
    }

    /// First entry of each date group
    pub fn representatives(&self) -> Vec<&'a ForecastEntry> {
        self.groups
            .iter()
            .filter_map(|(_, entries)| entries.first().copied())
            .collect()
    }
}

/// Partition `entries` by their calendar date in `tz`.
///
/// Entries whose timestamp is out of chrono's range are skipped.
pub fn group_by_date<'a, Tz: TimeZone>(entries: &'a [ForecastEntry], tz: &Tz) -> DateGroups<'a> {
    let mut groups = DateGroups::default();

    for entry in entries {
        match entry.date_in(tz) {
            Some(date) => groups.push(date, entry),
            None => tracing::debug!("Skipping forecast entry with invalid timestamp {}", entry.dt),
        }
    }

    groups
}

/// One forecast day per distinct date in `tz`, first entry of each date.
pub fn daily_forecast<Tz: TimeZone>(entries: &[ForecastEntry], tz: &Tz) -> Vec<ForecastDay> {
    group_by_date(entries, tz)
        .representatives()
        .into_iter()
        .map(ForecastDay::from)
        .collect()
}

/// [`daily_forecast`] in the machine's local time zone.
pub fn daily_forecast_local(entries: &[ForecastEntry]) -> Vec<ForecastDay> {
    daily_forecast(entries, &Local)
}
