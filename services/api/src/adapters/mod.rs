pub mod nominatim;

pub use nominatim::NominatimAdapter;
