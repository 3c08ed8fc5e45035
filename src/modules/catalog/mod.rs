pub mod tours;

pub use tours::{find_by_number, format_catalog, is_catalog_place, Tour, TOUR_CATALOG};
