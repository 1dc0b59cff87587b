pub mod coordinate;
pub mod layer;
pub mod style;
