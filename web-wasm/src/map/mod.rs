pub mod leaflet;

pub use leaflet::{load_leaflet, LeafletBackend};
