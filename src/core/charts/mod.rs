pub mod chart_service;
pub mod metadata;

pub use chart_service::{ChartService, ChordChart};
pub use metadata::SongMetadata;
