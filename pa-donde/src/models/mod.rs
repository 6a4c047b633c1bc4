//! Domain records

mod place;

pub use place::{ContactInfo, Coordinates, Place, PlaceFields, PriceRange};
