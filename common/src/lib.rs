//! GeoDais Common Library
//!
//! CLIとWeb(WASM)で共有される型とリアクティブな中核部分

pub mod types;
pub mod config;
pub mod error;
pub mod environment;
pub mod observable;
pub mod store;
pub mod lightbox;
pub mod geo;
pub mod map_view;
pub mod headless;

pub use types::{Foto, Registro, format_fecha};
pub use config::{BaseLayer, BoundaryStyle, DashboardConfig, LatLng, MapConfig, PointMarker, DEFAULT_API_BASE};
pub use error::{Error, Result};
pub use environment::Environment;
pub use observable::{Observable, SubscriptionId};
pub use store::{DataStore, RecordSource};
pub use lightbox::Lightbox;
pub use geo::Bounds;
pub use map_view::{MapBackend, MapView, follow_selection};
pub use headless::HeadlessMap;
