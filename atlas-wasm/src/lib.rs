//! Atlas of Leadership: plots one petal-shaped marker per leader record
//! from a GeoJSON file onto a MapLibre globe, and opens a detail panel on
//! marker activation. Startup is strictly sequential (map, data, markers,
//! UI); any failure lands in a terminal error state with a user-visible
//! message. A small camera/filter/highlight surface is exported for the
//! host page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, KeyboardEvent};

use atlas_core::model::{FeatureCollection, Leader};

mod constants;
mod map;
mod maplibre;
mod marker;
mod state;
mod ui;
mod utils;

use constants::{DEFAULT_FLY_DURATION_MS, LEADERS_GEOJSON};
use map::{Camera, MapAdapter};
use state::{STATE, State, with_state};
use utils::{asset_url, error, log, warn};

#[wasm_bindgen(start)]
pub fn start() {
    wasm_bindgen_futures::spawn_local(async {
        if let Err(err) = init().await {
            error(&format!("Failed to initialize application: {err:?}"));
            if let Some(window) = web_sys::window()
                && let Some(document) = window.document()
            {
                ui::show_error(&document, "Failed to load application. Please refresh the page.");
            }
        }
    });
}

async fn init() -> Result<(), JsValue> {
    log("Initializing Atlas of Leadership...");
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let mut adapter = MapAdapter::new(&document, "map", Camera::default())?;

    let leaders = map::load_geojson(&window, &asset_url(LEADERS_GEOJSON)).await?;
    log(&format!("Loaded {} leaders", leaders.features.len()));

    render_markers(&document, &mut adapter, &leaders);

    ui::setup_ui(&document)?;

    STATE.with(|st| {
        st.replace(Some(Rc::new(RefCell::new(State {
            document,
            adapter,
            leaders,
        }))))
    });

    log("Atlas of Leadership initialized successfully");
    Ok(())
}

/// Place one marker per feature. Records without coordinates and records
/// whose marker synthesis fails are logged and counted, never fatal.
fn render_markers(document: &Document, adapter: &mut MapAdapter, leaders: &FeatureCollection) {
    log("Rendering markers...");
    let mut success_count = 0u32;
    let mut error_count = 0u32;

    for feature in &leaders.features {
        let leader = &feature.properties;
        let Some(lng_lat) = feature.lng_lat() else {
            warn(&format!(
                "Missing coordinates for: {}",
                leader.title.as_deref().unwrap_or("<untitled>")
            ));
            error_count += 1;
            continue;
        };
        match place_marker(document, adapter, lng_lat, leader) {
            Ok(()) => success_count += 1,
            Err(err) => {
                error(&format!(
                    "Error rendering marker for: {} {err:?}",
                    leader.title.as_deref().unwrap_or("<untitled>")
                ));
                error_count += 1;
            }
        }
    }

    log(&format!("Rendered {success_count} markers ({error_count} errors)"));
}

fn place_marker(
    document: &Document,
    adapter: &mut MapAdapter,
    lng_lat: [f64; 2],
    leader: &Leader,
) -> Result<(), JsValue> {
    let element = marker::generate(document, leader)?;

    let doc = document.clone();
    let record = leader.clone();
    let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        ui::show_leader_detail(&doc, &record);
    }));
    element.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
    onclick.forget();

    let doc = document.clone();
    let record = leader.clone();
    let onkeydown = Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |e: KeyboardEvent| {
        let key = e.key();
        if key == "Enter" || key == " " {
            ui::show_leader_detail(&doc, &record);
        }
    }));
    element.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())?;
    onkeydown.forget();

    adapter.add_marker(lng_lat, &element, leader.clone())
}

// Host-page control surface. Each call is a no-op until initialization
// has completed.

/// Show only markers whose region matches exactly; the rest are hidden
/// but remain registered.
#[wasm_bindgen(js_name = filterByRegion)]
pub fn filter_by_region(region: String) {
    with_state(|s| {
        s.adapter
            .filter_markers(|l| l.region.as_deref() == Some(region.as_str()));
    });
}

/// Emphasize markers whose academic field list contains the given label.
#[wasm_bindgen(js_name = highlightByField)]
pub fn highlight_by_field(field: String) {
    with_state(|s| {
        s.adapter.highlight_markers(|l| {
            l.academic_field
                .as_deref()
                .is_some_and(|f| f.split(',').any(|token| token.trim() == field))
        });
    });
}

/// Restore all markers to the default visual state.
#[wasm_bindgen(js_name = resetMarkers)]
pub fn reset_markers() {
    with_state(|s| s.adapter.reset_markers());
}

/// Drop every marker and rebuild the set from the loaded data.
#[wasm_bindgen(js_name = reloadMarkers)]
pub fn reload_markers() {
    with_state(|s| {
        s.adapter.clear_markers();
        let State {
            document,
            adapter,
            leaders,
        } = s;
        render_markers(document, adapter, leaders);
    });
}

/// Fly the camera to a new center and zoom, keeping the current pitch and
/// bearing.
#[wasm_bindgen(js_name = flyTo)]
pub fn fly_to(lng: f64, lat: f64, zoom: f64) {
    with_state(|s| {
        let camera = Camera {
            center: [lng, lat],
            zoom,
            ..s.adapter.camera_position()
        };
        if let Err(err) = s.adapter.fly_to(camera, DEFAULT_FLY_DURATION_MS) {
            error(&format!("flyTo failed: {err:?}"));
        }
    });
}

/// Current camera as `{ center: [lng, lat], zoom, pitch, bearing }`.
#[wasm_bindgen(js_name = cameraPosition)]
pub fn camera_position() -> JsValue {
    let mut out = JsValue::NULL;
    with_state(|s| {
        let camera = s.adapter.camera_position();
        if let Ok(json) = serde_json::to_string(&camera)
            && let Ok(value) = js_sys::JSON::parse(&json)
        {
            out = value;
        }
    });
    out
}
