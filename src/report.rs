use std::{collections::BTreeSet, fmt::Display};

use crate::{
    rentals::Rental,
    stats::{
        index_by_station, longest_rentals, mean_days_between_rentals, top_billing_customer,
        top_service_by_month, total_billed, DEFAULT_LONGEST,
    },
};

/// Plain-text summary of every query over a loaded dataset.
pub struct Report<'a> {
    rentals: &'a [Rental],
}

impl<'a> Report<'a> {
    pub fn new(rentals: &'a [Rental]) -> Self {
        Report { rentals }
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "rentals: {}", self.rentals.len())?;

        // No bounds would always print 0.0, so use the first rental's own range.
        if let Some(first) = self.rentals.first() {
            writeln!(
                f,
                "total billed {}..{}: {:.2}",
                first.start_date,
                first.end_date,
                total_billed(self.rentals, Some(first.start_date), Some(first.end_date))
            )?;
        }

        writeln!(f, "longest rentals:")?;
        for (name, days) in longest_rentals(self.rentals, DEFAULT_LONGEST) {
            writeln!(f, "  {}: {} days", name, days)?;
        }

        match top_billing_customer(self.rentals, None) {
            Ok((id, total)) => writeln!(f, "top billing customer: {} ({:.2})", id, total)?,
            Err(err) => writeln!(f, "top billing customer: {}", err)?,
        }

        writeln!(f, "top service per month:")?;
        for (month, service) in top_service_by_month(self.rentals, None) {
            writeln!(f, "  {}: {}", month, service)?;
        }

        match mean_days_between_rentals(self.rentals) {
            Ok(mean) => writeln!(f, "mean days between rentals: {:.2}", mean)?,
            Err(err) => writeln!(f, "mean days between rentals: {}", err)?,
        }

        writeln!(f, "rentals per station:")?;
        for (station, rentals) in index_by_station(self.rentals) {
            let bike_types: BTreeSet<&str> = rentals
                .iter()
                .map(|rental| rental.bike_type.as_str())
                .collect();
            writeln!(
                f,
                "  {}: {} ({})",
                station,
                rentals.len(),
                bike_types.into_iter().collect::<Vec<_>>().join(", ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rental(name: &str, id: &str, start: (u32, u32), end: (u32, u32), station: &str) -> Rental {
        let day = |(month, day): (u32, u32)| NaiveDate::from_ymd_opt(2024, month, day).unwrap();
        Rental {
            customer_name: name.to_string(),
            customer_id: id.to_string(),
            start_date: day(start),
            end_date: day(end),
            station: station.to_string(),
            bike_type: "Urban".to_string(),
            price_per_day: 5.0,
            services: vec!["gps".to_string()],
        }
    }

    #[test]
    fn renders_every_query() {
        let rentals = [
            rental("Ana", "123", (1, 1), (1, 4), "Central"),
            rental("Luis", "456", (1, 5), (1, 11), "Norte"),
        ];

        let report = Report::new(&rentals).to_string();

        assert!(report.contains("rentals: 2\n"));
        assert!(report.contains("total billed 2024-01-01..2024-01-04: 15.00\n"));
        assert!(report.contains("  Luis: 6 days\n  Ana: 3 days\n"));
        assert!(report.contains("top billing customer: 456 (30.00)\n"));
        assert!(report.contains("  2024-01: gps\n"));
        assert!(report.contains("mean days between rentals: 4.00\n"));
        assert!(report.contains("  Central: 1 (Urban)\n  Norte: 1 (Urban)\n"));
    }

    #[test]
    fn empty_dataset_reports_errors_inline() {
        let report = Report::new(&[]).to_string();

        assert!(report.contains("rentals: 0\n"));
        assert!(!report.contains("total billed"));
        assert!(report.contains("top billing customer: no rentals to aggregate\n"));
        assert!(report.contains("mean days between rentals: need at least two rentals, found 0\n"));
    }
}
