//! Archive definitions and their true-color rendering recipes

/// Band selection and contrast stretch for a displayable RGB rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visualization {
    pub bands: [&'static str; 3],
    pub min: f64,
    pub max: f64,
    pub gamma: f64,
}

/// A queryable archive of timestamped scenes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collection {
    /// Asset id on the imagery platform
    pub id: &'static str,
    /// Per-scene cloud-cover percentage property used for ranking
    pub cloud_property: &'static str,
    pub visualization: Visualization,
}

/// Scenes above this cloud cover are ignored in the primary archive
pub const MAX_PRIMARY_CLOUD_COVER: f64 = 20.0;

/// Sentinel-2 surface reflectance, harmonized processing baseline
pub const SENTINEL_2_SR: Collection = Collection {
    id: "COPERNICUS/S2_SR_HARMONIZED",
    cloud_property: "CLOUDY_PIXEL_PERCENTAGE",
    visualization: Visualization {
        bands: ["B4", "B3", "B2"],
        min: 0.0,
        max: 3000.0,
        gamma: 1.4,
    },
};

/// Landsat 8 Collection 2 Tier 1 Level-2 surface reflectance.
///
/// Stretch spans the same 0 to 0.3 reflectance as the Sentinel-2 recipe,
/// expressed in Landsat's scaled units (`dn * 2.75e-5 - 0.2`).
pub const LANDSAT_8_L2: Collection = Collection {
    id: "LANDSAT/LC08/C02/T1_L2",
    cloud_property: "CLOUD_COVER",
    visualization: Visualization {
        bands: ["SR_B4", "SR_B3", "SR_B2"],
        min: 7273.0,
        max: 18182.0,
        gamma: 1.4,
    },
};
