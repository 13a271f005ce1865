//! Earth Engine computation graphs
//!
//! A computation is sent as an [`Expression`]: a map of named value nodes
//! plus the name of the node holding the result. Nodes are either constants
//! or function invocations whose arguments are themselves nodes, nested
//! inline.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::geo::SearchRegion;
use crate::imagery::SceneQuery;

const RESULT_NODE: &str = "0";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueNode {
    ConstantValue(Value),
    FunctionInvocationValue(FunctionInvocation),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInvocation {
    pub function_name: String,
    pub arguments: BTreeMap<String, ValueNode>,
}

impl ValueNode {
    pub fn constant(value: impl Into<Value>) -> Self {
        ValueNode::ConstantValue(value.into())
    }

    pub fn invoke<I, K>(function_name: &str, arguments: I) -> Self
    where
        I: IntoIterator<Item = (K, ValueNode)>,
        K: Into<String>,
    {
        ValueNode::FunctionInvocationValue(FunctionInvocation {
            function_name: function_name.to_string(),
            arguments: arguments.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expression {
    pub result: String,
    pub values: BTreeMap<String, ValueNode>,
}

impl Expression {
    pub fn new(root: ValueNode) -> Self {
        let mut values = BTreeMap::new();
        values.insert(RESULT_NODE.to_string(), root);
        Self {
            result: RESULT_NODE.to_string(),
            values,
        }
    }
}

/// Circle of `radius_m` meters around the region center
pub fn region_geometry(region: &SearchRegion) -> ValueNode {
    let point = ValueNode::invoke(
        "GeometryConstructors.Point",
        [("coordinates", ValueNode::constant(json!([region.center.lon(), region.center.lat()])))],
    );
    ValueNode::invoke(
        "Geometry.buffer",
        [
            ("geometry", point),
            ("distance", ValueNode::constant(region.radius_m())),
        ],
    )
}

fn filter(collection: ValueNode, filter: ValueNode) -> ValueNode {
    ValueNode::invoke("Collection.filter", [("collection", collection), ("filter", filter)])
}

/// The query's collection narrowed by region, dates and cloud cover
pub fn filtered_collection(query: &SceneQuery) -> ValueNode {
    let loaded = ValueNode::invoke(
        "ImageCollection.load",
        [("id", ValueNode::constant(query.collection.id))],
    );

    let bounds = ValueNode::invoke(
        "Filter.intersects",
        [
            ("leftField", ValueNode::constant(".all")),
            ("rightValue", region_geometry(&query.region)),
        ],
    );

    let date_range = ValueNode::invoke(
        "DateRange",
        [
            ("start", ValueNode::constant(query.dates.start_str())),
            ("end", ValueNode::constant(query.dates.end_str())),
        ],
    );
    let dates = ValueNode::invoke(
        "Filter.dateRangeContains",
        [
            ("leftValue", date_range),
            ("rightField", ValueNode::constant("system:time_start")),
        ],
    );

    let mut collection = filter(filter(loaded, bounds), dates);

    if let Some(max_cloud_cover) = query.max_cloud_cover {
        let clouds = ValueNode::invoke(
            "Filter.lessThan",
            [
                ("leftField", ValueNode::constant(query.collection.cloud_property)),
                ("rightValue", ValueNode::constant(max_cloud_cover)),
            ],
        );
        collection = filter(collection, clouds);
    }

    collection
}

/// Number of scenes matching the query
pub fn scene_count(query: &SceneQuery) -> Expression {
    Expression::new(ValueNode::invoke(
        "Collection.size",
        [("collection", filtered_collection(query))],
    ))
}

/// True-color PNG of the least-cloudy matching scene, clipped to the region.
///
/// Scenes sharing the minimum cloud cover keep the archive's own order, so
/// the first of them wins.
pub fn least_cloudy_thumbnail(query: &SceneQuery, max_dimension: u32) -> Expression {
    let sorted = ValueNode::invoke(
        "Collection.limit",
        [
            ("collection", filtered_collection(query)),
            ("key", ValueNode::constant(query.collection.cloud_property)),
            ("ascending", ValueNode::constant(true)),
        ],
    );
    let first = ValueNode::invoke("Collection.first", [("collection", sorted)]);

    let vis = query.collection.visualization;
    let visualized = ValueNode::invoke(
        "Image.visualize",
        [
            ("image", first),
            ("bands", ValueNode::constant(json!(vis.bands))),
            ("min", ValueNode::constant(vis.min)),
            ("max", ValueNode::constant(vis.max)),
            ("gamma", ValueNode::constant(vis.gamma)),
        ],
    );

    Expression::new(ValueNode::invoke(
        "Image.clipToBoundsAndScale",
        [
            ("input", visualized),
            ("geometry", region_geometry(&query.region)),
            ("maxDimension", ValueNode::constant(max_dimension)),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{Coordinate, SearchRegion};
    use crate::imagery::{LANDSAT_8_L2, SENTINEL_2_SR};
    use crate::types::DateRange;

    fn query() -> SceneQuery {
        let region = SearchRegion {
            center: Coordinate::from_lonlat(-123.1207, 49.2827),
            radius_km: 0.5,
        };
        let dates = DateRange::parse("2023-01-01", "2025-03-20").unwrap();
        SceneQuery::new(SENTINEL_2_SR, region, dates)
    }

    fn root(expression: &Expression) -> Value {
        let value = serde_json::to_value(expression).unwrap();
        assert_eq!(value["result"], "0");
        value["values"]["0"].clone()
    }

    #[test]
    fn test_node_serialization() {
        let node =
            ValueNode::invoke("Collection.first", [("collection", ValueNode::constant("x"))]);
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "functionInvocationValue": {
                    "functionName": "Collection.first",
                    "arguments": { "collection": { "constantValue": "x" } }
                }
            })
        );
    }

    #[test]
    fn test_region_geometry() {
        let value = serde_json::to_value(region_geometry(&query().region)).unwrap();
        let buffer = &value["functionInvocationValue"];
        assert_eq!(buffer["functionName"], "Geometry.buffer");
        assert_eq!(buffer["arguments"]["distance"]["constantValue"], json!(500.0));

        let point = &buffer["arguments"]["geometry"]["functionInvocationValue"];
        assert_eq!(point["functionName"], "GeometryConstructors.Point");
        assert_eq!(point["arguments"]["coordinates"]["constantValue"], json!([-123.1207, 49.2827]));
    }

    #[test]
    fn test_scene_count_with_cloud_filter() {
        let expression = scene_count(&query().with_max_cloud_cover(20.0));
        let size = root(&expression);
        assert_eq!(size["functionInvocationValue"]["functionName"], "Collection.size");

        let outer =
            &size["functionInvocationValue"]["arguments"]["collection"]["functionInvocationValue"];
        assert_eq!(outer["functionName"], "Collection.filter");
        let cloud = &outer["arguments"]["filter"]["functionInvocationValue"];
        assert_eq!(cloud["functionName"], "Filter.lessThan");
        assert_eq!(cloud["arguments"]["leftField"]["constantValue"], "CLOUDY_PIXEL_PERCENTAGE");
        assert_eq!(cloud["arguments"]["rightValue"]["constantValue"], json!(20.0));
    }

    #[test]
    fn test_backup_has_no_cloud_filter() {
        let mut backup = query();
        backup.collection = LANDSAT_8_L2;
        let text = serde_json::to_string(&scene_count(&backup)).unwrap();
        assert!(!text.contains("Filter.lessThan"));
        assert!(text.contains("LANDSAT/LC08/C02/T1_L2"));
        assert!(text.contains("Filter.dateRangeContains"));
        assert!(text.contains("2025-03-20"));
    }

    #[test]
    fn test_thumbnail_expression() {
        let expression = least_cloudy_thumbnail(&query(), 1024);
        let clip = root(&expression);
        let clip = &clip["functionInvocationValue"];
        assert_eq!(clip["functionName"], "Image.clipToBoundsAndScale");
        assert_eq!(clip["arguments"]["maxDimension"]["constantValue"], json!(1024));

        let vis = &clip["arguments"]["input"]["functionInvocationValue"];
        assert_eq!(vis["functionName"], "Image.visualize");
        assert_eq!(vis["arguments"]["bands"]["constantValue"], json!(["B4", "B3", "B2"]));
        assert_eq!(vis["arguments"]["max"]["constantValue"], json!(3000.0));
        assert_eq!(vis["arguments"]["gamma"]["constantValue"], json!(1.4));

        let first = &vis["arguments"]["image"]["functionInvocationValue"];
        assert_eq!(first["functionName"], "Collection.first");
        let sort = &first["arguments"]["collection"]["functionInvocationValue"];
        assert_eq!(sort["functionName"], "Collection.limit");
        assert_eq!(sort["arguments"]["key"]["constantValue"], "CLOUDY_PIXEL_PERCENTAGE");
        assert_eq!(sort["arguments"]["ascending"]["constantValue"], json!(true));
    }
}
