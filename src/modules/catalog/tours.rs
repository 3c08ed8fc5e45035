use itertools::Itertools;

use crate::CURRENCY;

/// A single tour package: destination name and price per ticket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tour {
    pub destination: &'static str,
    pub price: f64,
}

/// The fixed package list, numbered 1 to 10 in this order
pub const TOUR_CATALOG: [Tour; 10] = [
    Tour { destination: "Paris, France", price: 400_000.0 },
    Tour { destination: "Tokyo, Japan", price: 600_000.0 },
    Tour { destination: "Bangkok, Thailand", price: 250_000.0 },
    Tour { destination: "Abu Dhabi, UAE", price: 380_000.0 },
    Tour { destination: "Miami, USA", price: 120_000.0 },
    Tour { destination: "Rome, Italy", price: 100_000.0 },
    Tour { destination: "Munich, Germany", price: 300_000.0 },
    Tour { destination: "Madrid, Spain", price: 320_000.0 },
    Tour { destination: "Istanbul, Turkey", price: 450_000.0 },
    Tour { destination: "Gilgit, Pakistan", price: 75_000.0 },
];

/// Look up a tour by its 1-based menu number
pub fn find_by_number(number: i64) -> Option<&'static Tour> {
    if number < 1 {
        return None;
    }
    let index = usize::try_from(number - 1).ok()?;
    TOUR_CATALOG.get(index)
}

/// Whether a place string names one of the catalog destinations
pub fn is_catalog_place(place: &str) -> bool {
    TOUR_CATALOG.iter().any(|tour| tour.destination == place)
}

/// Render the catalog as a numbered menu
pub fn format_catalog() -> String {
    let width = TOUR_CATALOG
        .iter()
        .map(|tour| tour.destination.len())
        .max()
        .unwrap_or(0);

    TOUR_CATALOG
        .iter()
        .enumerate()
        .map(|(i, tour)| {
            format!(
                "{:>2}. {:<width$} - {} {:.0}",
                i + 1,
                tour.destination,
                CURRENCY,
                tour.price,
                width = width
            )
        })
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_bounds() {
        assert!(find_by_number(0).is_none());
        assert!(find_by_number(-3).is_none());
        assert!(find_by_number(11).is_none());
        // Would wrap to tour 1 if the index were truncated to 32 bits
        assert!(find_by_number((1_i64 << 32) + 1).is_none());
        assert!(find_by_number(i64::MAX).is_none());

        let first = find_by_number(1).unwrap();
        assert_eq!(first.destination, "Paris, France");
        assert_eq!(first.price, 400_000.0);

        let last = find_by_number(10).unwrap();
        assert_eq!(last.destination, "Gilgit, Pakistan");
        assert_eq!(last.price, 75_000.0);
    }

    #[test]
    fn test_bangkok_is_third() {
        let tour = find_by_number(3).unwrap();
        assert_eq!(tour.destination, "Bangkok, Thailand");
        assert_eq!(tour.price, 250_000.0);
    }

    #[test]
    fn test_catalog_place_membership() {
        assert!(is_catalog_place("Abu Dhabi, UAE"));
        assert!(!is_catalog_place("abu dhabi, uae"));
        assert!(!is_catalog_place(crate::NO_BOOKING));
        assert!(!is_catalog_place(""));
    }

    #[test]
    fn test_catalog_rendering() {
        let rendered = format_catalog();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with(" 1. Paris, France"));
        assert!(lines[0].ends_with("Rs 400000"));
        assert!(lines[9].starts_with("10. Gilgit, Pakistan"));
        assert!(lines[9].ends_with("Rs 75000"));
    }
}
