pub mod item;
pub mod record;

pub use item::*;
pub use record::*;

/// Wildcard option shown first in every filter select.
pub const WILDCARD: &str = "All";

/// Inline image shown once every candidate URL for a picture has failed.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='640' height='400' viewBox='0 0 640 400'><rect width='640' height='400' fill='%23eeeeee'/><text x='50%25' y='50%25' fill='%23999999' font-family='sans-serif' font-size='24' text-anchor='middle'>Image coming soon</text></svg>";

pub const DEFAULT_BRANDS: &[&str] = &[
    "Toyota",
    "Honda",
    "Nissan",
    "Mazda",
    "Subaru",
    "Mitsubishi",
    "Suzuki",
    "Daihatsu",
    "Isuzu",
    "Hino",
    "Lexus",
];

pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Sedan",
    "Hatchback",
    "SUV",
    "Truck",
    "Van",
    "Wagon",
    "Coupe",
    "Convertible",
    "Hybrid/EV",
    "Machinery",
    "Agricultural",
];
