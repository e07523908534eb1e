use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;

use crate::{dates::month_key, error::QueryError, rentals::Rental};

/// How many entries `longest_rentals` reports when the caller has no preference.
pub const DEFAULT_LONGEST: usize = 3;

/**
 * Map that remembers the order keys first showed up in. Writing to an
 * existing key keeps its original slot, so ties can be broken by first
 * appearance.
 */
#[derive(Default)]
struct OrderedTally<'a, V> {
    index: HashMap<&'a str, usize>,
    entries: Vec<(&'a str, V)>,
}

impl<'a, V: Default> OrderedTally<'a, V> {
    fn entry(&mut self, key: &'a str) -> &mut V {
        let entries = &mut self.entries;
        let position = *self.index.entry(key).or_insert_with(|| {
            entries.push((key, V::default()));
            entries.len() - 1
        });
        &mut self.entries[position].1
    }

    fn into_entries(self) -> Vec<(&'a str, V)> {
        self.entries
    }
}

/**
 * Billing of the rental running exactly from `start` to `end`.
 *
 * Matching rentals are not added up: the last one in file order wins.
 * A missing bound never equals a real date, so `None` on either side
 * always yields 0.0.
 */
pub fn total_billed(rentals: &[Rental], start: Option<NaiveDate>, end: Option<NaiveDate>) -> f64 {
    rentals
        .iter()
        .rev()
        .find(|rental| Some(rental.start_date) == start && Some(rental.end_date) == end)
        .map_or(0.0, Rental::billed)
}

/**
 * Up to `n` customers with the longest rental, longest first.
 *
 * Each name keeps the duration of its last rental only, not its longest
 * or its total. Equal durations stay in first-appearance order.
 */
pub fn longest_rentals(rentals: &[Rental], n: usize) -> Vec<(String, i64)> {
    let mut durations: OrderedTally<i64> = OrderedTally::default();
    for rental in rentals {
        *durations.entry(&rental.customer_name) = rental.duration_days();
    }

    let mut longest = durations.into_entries();
    longest.sort_by(|a, b| b.1.cmp(&a.1));
    longest.truncate(n);
    longest
        .into_iter()
        .map(|(name, days)| (name.to_string(), days))
        .collect()
}

/**
 * Customer id with the highest billing, summed over their rentals.
 *
 * With `services`, only rentals offering every one of those services count.
 * On a tie the customer seen first wins. Fails when nothing is left to
 * compare, either because there are no rentals or the filter excluded them all.
 */
pub fn top_billing_customer(
    rentals: &[Rental],
    services: Option<&HashSet<&str>>,
) -> Result<(String, f64), QueryError> {
    let mut totals: OrderedTally<f64> = OrderedTally::default();
    for rental in rentals {
        let included = services.map_or(true, |required| {
            let offered: HashSet<&str> = rental.services.iter().map(String::as_str).collect();
            required.is_subset(&offered)
        });
        if included {
            *totals.entry(&rental.customer_id) += rental.billed();
        }
    }

    totals
        .into_entries()
        .into_iter()
        .fold(None, |best: Option<(&str, f64)>, (id, total)| match best {
            Some((_, best_total)) if best_total >= total => best,
            _ => Some((id, total)),
        })
        .map(|(id, total)| (id.to_string(), total))
        .ok_or(QueryError::EmptyInput)
}

/**
 * Most hired service per `YYYY-MM` of the start date.
 *
 * A service counts once per rental. Empty tags are skipped, and a month
 * with nothing left to count is left out. Ties go to the alphabetically
 * first service.
 */
pub fn top_service_by_month(
    rentals: &[Rental],
    stations: Option<&HashSet<&str>>,
) -> BTreeMap<String, String> {
    let mut counts: BTreeMap<String, BTreeMap<&str, usize>> = BTreeMap::new();
    for rental in rentals {
        if let Some(stations) = stations {
            if !stations.contains(rental.station.as_str()) {
                continue;
            }
        }

        let hired: BTreeSet<&str> = rental
            .services
            .iter()
            .map(String::as_str)
            .filter(|service| !service.is_empty())
            .collect();
        if hired.is_empty() {
            continue;
        }

        let month = counts.entry(month_key(rental.start_date)).or_default();
        for service in hired {
            *month.entry(service).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .filter_map(|(month, tally)| {
            tally
                .into_iter()
                .fold(None, |best: Option<(&str, usize)>, (service, count)| match best {
                    Some((_, best_count)) if best_count >= count => best,
                    _ => Some((service, count)),
                })
                .map(|(service, _)| (month, service.to_string()))
        })
        .collect()
}

/// Mean gap in days between consecutive start dates.
pub fn mean_days_between_rentals(rentals: &[Rental]) -> Result<f64, QueryError> {
    if rentals.len() < 2 {
        return Err(QueryError::NotEnoughRentals {
            found: rentals.len(),
        });
    }

    let mut starts: Vec<NaiveDate> = rentals.iter().map(|rental| rental.start_date).collect();
    starts.sort();

    let total_gap: i64 = starts
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days())
        .sum();
    Ok(total_gap as f64 / (starts.len() - 1) as f64)
}

pub fn index_by_station(rentals: &[Rental]) -> BTreeMap<&str, Vec<&Rental>> {
    let mut index: BTreeMap<&str, Vec<&Rental>> = BTreeMap::new();
    for rental in rentals {
        index.entry(rental.station.as_str()).or_default().push(rental);
    }
    index
}
