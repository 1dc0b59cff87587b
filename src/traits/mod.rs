mod elevation;

pub use elevation::ElevationSource;
