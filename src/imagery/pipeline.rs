use bytes::Bytes;
use tracing::info;

use super::archive::{ImageryArchive, SceneQuery};
use super::collection::{Collection, LANDSAT_8_L2, MAX_PRIMARY_CLOUD_COVER, SENTINEL_2_SR};
use crate::geo::SearchRegion;
use crate::types::DateRange;
use crate::Result;

/// A rendered scene and the archive it came from
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImage {
    pub collection: Collection,
    pub bytes: Bytes,
}

/// Outcome of a scene search that reached the archive successfully
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Found(RenderedImage),
    NotFound,
}

/// Renders the least-cloudy scene over `region` within `dates`.
///
/// Sentinel-2 scenes under the cloud threshold are preferred. When none
/// match, Landsat 8 is searched with the same region and dates and no cloud
/// filter. Emptiness is decided by counting scenes before rendering.
pub async fn fetch_least_cloudy<A: ImageryArchive>(
    archive: &A,
    region: SearchRegion,
    dates: DateRange,
    max_dimension: u32,
) -> Result<Selection> {
    let primary = SceneQuery::new(SENTINEL_2_SR, region, dates)
        .with_max_cloud_cover(MAX_PRIMARY_CLOUD_COVER);
    let backup = SceneQuery::new(LANDSAT_8_L2, region, dates);

    for query in [primary, backup] {
        let count = archive.count_scenes(&query).await?;
        if count == 0 {
            info!(collection = query.collection.id, "No matching scenes, trying next collection");
            continue;
        }

        info!(collection = query.collection.id, scenes = count, "Rendering least cloudy scene");
        let bytes = archive.render_least_cloudy(&query, max_dimension).await?;
        return Ok(Selection::Found(RenderedImage {
            collection: query.collection,
            bytes,
        }));
    }

    Ok(Selection::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::Error;
    use std::sync::Mutex;

    /// In-memory archive with a fixed scene count per collection id
    struct FakeArchive {
        sentinel: u64,
        landsat: u64,
        fail_render: bool,
        queries: Mutex<Vec<SceneQuery>>,
    }

    impl FakeArchive {
        fn new(sentinel: u64, landsat: u64) -> Self {
            Self { sentinel, landsat, fail_render: false, queries: Mutex::new(Vec::new()) }
        }
    }

    impl ImageryArchive for FakeArchive {
        async fn count_scenes(&self, query: &SceneQuery) -> Result<u64> {
            self.queries.lock().unwrap().push(*query);
            Ok(if query.collection == SENTINEL_2_SR { self.sentinel } else { self.landsat })
        }

        async fn render_least_cloudy(
            &self,
            query: &SceneQuery,
            max_dimension: u32,
        ) -> Result<Bytes> {
            if self.fail_render {
                return Err(Error::Upstream { status: 500, message: "render failed".into() });
            }
            Ok(Bytes::from(format!("{}@{}", query.collection.id, max_dimension)))
        }
    }

    fn region() -> SearchRegion {
        SearchRegion::around(Coordinate::from_lonlat(-114.0719, 51.0447), 100.0, 1.1).unwrap()
    }

    fn dates() -> DateRange {
        DateRange::parse("2023-01-01", "2025-03-20").unwrap()
    }

    #[tokio::test]
    async fn test_primary_collection_preferred() {
        let archive = FakeArchive::new(3, 7);
        let selection = fetch_least_cloudy(&archive, region(), dates(), 1024).await.unwrap();

        match selection {
            Selection::Found(image) => {
                assert_eq!(image.collection, SENTINEL_2_SR);
                assert_eq!(image.bytes, Bytes::from("COPERNICUS/S2_SR_HARMONIZED@1024"));
            }
            Selection::NotFound => panic!("expected a scene"),
        }

        let queries = archive.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].max_cloud_cover, Some(MAX_PRIMARY_CLOUD_COVER));
    }

    #[tokio::test]
    async fn test_falls_back_to_backup_collection() {
        let archive = FakeArchive::new(0, 1);
        let selection = fetch_least_cloudy(&archive, region(), dates(), 512).await.unwrap();

        let Selection::Found(image) = selection else {
            panic!("expected backup scene");
        };
        assert_eq!(image.collection, LANDSAT_8_L2);
        assert_eq!(image.bytes, Bytes::from("LANDSAT/LC08/C02/T1_L2@512"));

        let queries = archive.queries.lock().unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1].max_cloud_cover, None);
        assert_eq!(queries[1].region, queries[0].region);
        assert_eq!(queries[1].dates, queries[0].dates);
    }

    #[tokio::test]
    async fn test_both_collections_empty() {
        let archive = FakeArchive::new(0, 0);
        let selection = fetch_least_cloudy(&archive, region(), dates(), 1024).await.unwrap();
        assert_eq!(selection, Selection::NotFound);
    }

    #[tokio::test]
    async fn test_render_failure_propagates() {
        let mut archive = FakeArchive::new(2, 0);
        archive.fail_render = true;
        let result = fetch_least_cloudy(&archive, region(), dates(), 1024).await;
        assert!(matches!(result, Err(Error::Upstream { .. })));
    }
}
