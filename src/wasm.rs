use crate::geometry::Point;
use crate::io::{polygon_from_geojson, triangulation_to_geojson};
use crate::locator::PointLocator;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// JavaScript handle on a built [`PointLocator`].
#[wasm_bindgen]
pub struct WasmLocator {
    inner: PointLocator,
}

#[wasm_bindgen]
impl WasmLocator {
    /// Builds a locator from a GeoJSON Polygon (or the first Polygon of a Feature/FeatureCollection).
    #[wasm_bindgen(constructor)]
    pub fn new(geojson_str: &str) -> Result<WasmLocator, JsValue> {
        let points = polygon_from_geojson(geojson_str)
            .map_err(|e| JsValue::from_str(&format!("Failed to read polygon: {}", e)))?;
        let inner = PointLocator::new(&points)
            .map_err(|e| JsValue::from_str(&format!("Failed to build locator: {}", e)))?;
        Ok(WasmLocator { inner })
    }

    /// JS numbers arrive as `f64`; they must hold integers.
    pub fn query(&self, x: f64, y: f64) -> Result<bool, JsValue> {
        Ok(self.inner.query(to_point(x, y)?))
    }

    /// Takes an array of `[x, y]` pairs and returns an array of booleans.
    #[wasm_bindgen(js_name = queryMany)]
    pub fn query_many(&self, points: JsValue) -> Result<JsValue, JsValue> {
        let pairs: Vec<(i64, i64)> = serde_wasm_bindgen::from_value(points)?;
        let points: Vec<Point> = pairs.into_iter().map(Point::from).collect();
        Ok(serde_wasm_bindgen::to_value(&self.inner.query_all(&points))?)
    }

    /// The initial triangulation as a GeoJSON Feature string.
    pub fn triangulation(&self) -> String {
        triangulation_to_geojson(&self.inner)
    }

    pub fn rounds(&self) -> usize {
        self.inner.rounds()
    }
}

fn to_point(x: f64, y: f64) -> Result<Point, JsValue> {
    if x.fract() != 0.0 || y.fract() != 0.0 || !x.is_finite() || !y.is_finite() {
        return Err(JsValue::from_str(&format!("query point ({}, {}) must be integral", x, y)));
    }
    Ok(Point::new(x as i64, y as i64))
}
