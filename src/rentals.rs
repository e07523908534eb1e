use std::{fs::File, path::Path};

use chrono::NaiveDate;
use csv::StringRecord;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    dates::parse_date,
    error::{LoadError, ParseError},
};

/// Position of the services cell. Anything past it belongs to the services
/// list too, since unquoted `gps,lock` spills over into extra cells.
const SERVICES_COLUMN: usize = 7;
const SERVICE_SEPARATOR: &str = ",";

#[derive(Debug, Deserialize)]
struct DeserializedRental {
    name: String,
    id: String,
    start_date: String,
    end_date: String,
    station: String,
    bike_type: String,
    price_per_day: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rental {
    pub customer_name: String,
    pub customer_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub station: String,
    pub bike_type: String,
    pub price_per_day: f64,
    pub services: Vec<String>,
}

impl Rental {
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// What the rental costs: whole days times the daily price.
    pub fn billed(&self) -> f64 {
        self.duration_days() as f64 * self.price_per_day
    }
}

impl TryFrom<&StringRecord> for Rental {
    type Error = ParseError;
    fn try_from(record: &StringRecord) -> Result<Self, Self::Error> {
        if record.len() <= SERVICES_COLUMN {
            return Err(ParseError::MissingFields {
                found: record.len(),
            });
        }

        let head: StringRecord = record.iter().take(SERVICES_COLUMN).collect();
        let deserialized: DeserializedRental = head.deserialize(None)?;

        // An empty cell still splits into one empty tag.
        let services = record
            .iter()
            .skip(SERVICES_COLUMN)
            .collect::<Vec<_>>()
            .join(SERVICE_SEPARATOR)
            .split(SERVICE_SEPARATOR)
            .map(String::from)
            .collect();

        Ok(Rental {
            start_date: parse_date(&deserialized.start_date)?,
            end_date: parse_date(&deserialized.end_date)?,
            customer_name: deserialized.name,
            customer_id: deserialized.id,
            station: deserialized.station,
            bike_type: deserialized.bike_type,
            price_per_day: deserialized.price_per_day,
            services,
        })
    }
}

/**
 * Reads every rental in `path`, in file order. The first row is a header and
 * is skipped without looking at it. The first bad row aborts the whole load.
 */
pub fn load_rentals(path: impl AsRef<Path>) -> Result<Vec<Rental>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let mut rentals = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |position| position.line());
        let rental = Rental::try_from(&record).map_err(|source| LoadError::Row { line, source })?;

        if rental.end_date < rental.start_date {
            warn!(
                line,
                customer = %rental.customer_id,
                "rental ends before it starts, duration will be negative"
            );
        }
        rentals.push(rental);
    }

    debug!(count = rentals.len(), path = %path.display(), "loaded rentals");
    Ok(rentals)
}
