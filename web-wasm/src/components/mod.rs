pub mod header;
pub mod loading_indicator;
pub mod record_list;
pub mod map_panel;
pub mod photo_lightbox;
