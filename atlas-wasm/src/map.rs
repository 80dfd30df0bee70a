//! Map Adapter: wraps the MapLibre widget behind the narrow surface the
//! rest of the application uses. Marker state (visibility, highlight) is
//! tracked in the core registry and pushed onto the marker elements in a
//! sync pass; the widget itself is never reached into beyond its public
//! marker/camera/control API.

use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement, Response, Window};

use atlas_core::model::{FeatureCollection, Leader, parse_feature_collection};
use atlas_core::registry::MarkerRegistry;

use crate::constants::{DEFAULT_CENTER, DEFAULT_ZOOM, OSM_ATTRIBUTION, OSM_TILE_URL};
use crate::maplibre;
use crate::utils::log;

/// Camera snapshot/target: center is (lng, lat).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Camera {
    pub center: [f64; 2],
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            pitch: 0.0,
            bearing: 0.0,
        }
    }
}

pub struct MapAdapter {
    map: maplibre::Map,
    markers: MarkerRegistry<maplibre::Marker, Leader>,
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value)?;
    Ok(())
}

fn apply_camera(options: &Object, camera: &Camera) -> Result<(), JsValue> {
    let center = js_sys::Array::of2(
        &JsValue::from(camera.center[0]),
        &JsValue::from(camera.center[1]),
    );
    set(options, "center", center.as_ref())?;
    set(options, "zoom", &JsValue::from(camera.zoom))?;
    set(options, "pitch", &JsValue::from(camera.pitch))?;
    set(options, "bearing", &JsValue::from(camera.bearing))?;
    Ok(())
}

// Fixed base style: one OSM raster source with attribution.
fn base_style() -> String {
    serde_json::json!({
        "version": 8,
        "sources": {
            "osm": {
                "type": "raster",
                "tiles": [OSM_TILE_URL],
                "tileSize": 256,
                "attribution": OSM_ATTRIBUTION
            }
        },
        "layers": [
            {
                "id": "osm-tiles",
                "type": "raster",
                "source": "osm",
                "minzoom": 0,
                "maxzoom": 19
            }
        ]
    })
    .to_string()
}

impl MapAdapter {
    /// Construct the widget in the given container with the base style,
    /// globe projection, antialiasing and standard controls.
    pub fn new(document: &Document, container_id: &str, camera: Camera) -> Result<MapAdapter, JsValue> {
        if document.get_element_by_id(container_id).is_none() {
            return Err(JsValue::from_str(&format!(
                "map container #{container_id} not found"
            )));
        }

        let options = Object::new();
        set(&options, "container", &JsValue::from_str(container_id))?;
        set(&options, "style", &js_sys::JSON::parse(&base_style())?)?;
        apply_camera(&options, &camera)?;
        set(&options, "projection", &JsValue::from_str("globe"))?;
        set(&options, "antialias", &JsValue::TRUE)?;
        let map = maplibre::Map::new(&options);

        let nav = Object::new();
        set(&nav, "visualizePitch", &JsValue::TRUE)?;
        map.add_control_at(maplibre::NavigationControl::new(&nav).as_ref(), "top-left");

        let scale = Object::new();
        set(&scale, "maxWidth", &JsValue::from(100.0))?;
        set(&scale, "unit", &JsValue::from_str("metric"))?;
        map.add_control(maplibre::ScaleControl::new(&scale).as_ref());

        let on_load = Closure::<dyn FnMut()>::wrap(Box::new(|| log("Map loaded successfully")));
        map.on("load", on_load.as_ref().unchecked_ref());
        on_load.forget();

        Ok(MapAdapter {
            map,
            markers: MarkerRegistry::new(),
        })
    }

    /// Animate a camera transition with ease-out-quad timing. The motion
    /// is marked essential, so it plays under prefers-reduced-motion; the
    /// camera flight is the content here, not decoration.
    pub fn fly_to(&self, camera: Camera, duration_ms: f64) -> Result<(), JsValue> {
        let options = Object::new();
        apply_camera(&options, &camera)?;
        set(&options, "duration", &JsValue::from(duration_ms))?;
        set(&options, "essential", &JsValue::TRUE)?;
        let easing = Closure::<dyn Fn(f64) -> f64>::wrap(Box::new(|t| t * (2.0 - t)));
        set(&options, "easing", easing.as_ref())?;
        // Leaked deliberately: flights happen a handful of times per session.
        easing.forget();
        self.map.fly_to(&options);
        Ok(())
    }

    /// Bind an already-built marker element to the widget and retain it
    /// with its source properties for later filtering.
    pub fn add_marker(
        &mut self,
        lng_lat: [f64; 2],
        element: &HtmlElement,
        properties: Leader,
    ) -> Result<(), JsValue> {
        let options = Object::new();
        set(&options, "element", element.as_ref())?;
        set(&options, "anchor", &JsValue::from_str("center"))?;
        let position = js_sys::Array::of2(&JsValue::from(lng_lat[0]), &JsValue::from(lng_lat[1]));
        let marker = maplibre::Marker::new(&options)
            .set_lng_lat(position.as_ref())
            .add_to(&self.map);
        self.markers.add(marker, properties);
        Ok(())
    }

    /// Remove every marker from the widget and drop the handles.
    pub fn clear_markers(&mut self) {
        for entry in self.markers.drain() {
            entry.handle.remove();
        }
    }

    /// Show/hide markers from the predicate; markers are never removed,
    /// only their visibility toggles.
    pub fn filter_markers(&mut self, predicate: impl Fn(&Leader) -> bool) {
        self.markers.filter(predicate);
        self.sync_styles();
    }

    /// Emphasize matching markers (full opacity, 1.2x scale, highlighted
    /// class) and de-emphasize the rest.
    pub fn highlight_markers(&mut self, predicate: impl Fn(&Leader) -> bool) {
        self.markers.highlight(predicate);
        self.sync_styles();
    }

    /// Restore every marker to the default visual state.
    pub fn reset_markers(&mut self) {
        self.markers.reset();
        self.sync_styles();
    }

    /// Snapshot of the current camera, detached from the live widget.
    pub fn camera_position(&self) -> Camera {
        let center = self.map.get_center();
        Camera {
            center: [center.lng(), center.lat()],
            zoom: self.map.get_zoom(),
            pitch: self.map.get_pitch(),
            bearing: self.map.get_bearing(),
        }
    }

    // Push registry styles onto the marker elements.
    fn sync_styles(&self) {
        for entry in self.markers.entries() {
            let element = entry.handle.get_element();
            let css = element.style();
            let style = &entry.style;
            let _ = css.set_property("display", if style.visible { "block" } else { "none" });
            let _ = css.set_property("opacity", &format!("{}", style.opacity));
            let _ = css.set_property("transform", &format!("scale({})", style.scale));
            let classes = element.class_list();
            if style.highlighted {
                let _ = classes.add_1("highlighted");
            } else {
                let _ = classes.remove_1("highlighted");
            }
        }
    }
}

/// Fetch and parse the leaders data file. Non-2xx responses and parse
/// failures surface as errors; the caller treats them as startup-fatal.
pub async fn load_geojson(window: &Window, url: &str) -> Result<FeatureCollection, JsValue> {
    let resp_value = JsFuture::from(window.fetch_with_str(url)).await?;
    let resp: Response = resp_value.dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "Failed to load GeoJSON: {} {}",
            resp.status(),
            resp.status_text()
        )));
    }
    let text = JsFuture::from(resp.text()?).await?.as_string().unwrap_or_default();
    let data = parse_feature_collection(&text)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse GeoJSON: {e}")))?;
    log(&format!("Loaded {} features from GeoJSON", data.features.len()));
    Ok(data)
}
