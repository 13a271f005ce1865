//! Scene selection over remote imagery archives
//!
//! An [`ImageryArchive`] answers two questions about a [`SceneQuery`]: how
//! many scenes match, and what the least-cloudy match looks like rendered as
//! a PNG. [`fetch_least_cloudy`] runs the primary/backup selection on top.

pub mod archive;
pub mod collection;
pub mod pipeline;

pub use archive::{ImageryArchive, SceneQuery};
pub use collection::{
    Collection, Visualization, LANDSAT_8_L2, MAX_PRIMARY_CLOUD_COVER, SENTINEL_2_SR,
};
pub use pipeline::{fetch_least_cloudy, RenderedImage, Selection};
