use std::future::Future;

use bytes::Bytes;

use super::collection::Collection;
use crate::geo::SearchRegion;
use crate::types::DateRange;
use crate::Result;

/// Filters applied to one collection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneQuery {
    pub collection: Collection,
    pub region: SearchRegion,
    pub dates: DateRange,
    /// Exclusive upper bound on the collection's cloud-cover property
    pub max_cloud_cover: Option<f64>,
}

impl SceneQuery {
    pub fn new(collection: Collection, region: SearchRegion, dates: DateRange) -> Self {
        Self {
            collection,
            region,
            dates,
            max_cloud_cover: None,
        }
    }

    pub fn with_max_cloud_cover(mut self, percent: f64) -> Self {
        self.max_cloud_cover = Some(percent);
        self
    }
}

/// A remote imagery archive.
///
/// Implementations are shared read-only across concurrent requests.
pub trait ImageryArchive: Send + Sync + 'static {
    /// Number of scenes matching `query`
    fn count_scenes(&self, query: &SceneQuery) -> impl Future<Output = Result<u64>> + Send;

    /// Renders the scene with the lowest cloud cover as a PNG whose longest
    /// side is `max_dimension` pixels
    fn render_least_cloudy(
        &self,
        query: &SceneQuery,
        max_dimension: u32,
    ) -> impl Future<Output = Result<Bytes>> + Send;
}
