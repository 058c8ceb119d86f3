pub mod fees;
pub mod grid;
pub mod slider;

pub use fees::fees_table;
pub use grid::{CatalogGrid, Filter, GridSelection, GridView};
pub use slider::{SlideItem, Slider, SliderEffect, SliderInput, SliderState};
