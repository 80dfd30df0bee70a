//! Marker Factory, DOM half: computes the encoding for one leader record
//! and wraps the generated SVG in a focusable, activatable container.

use std::cell::Cell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use atlas_core::encoding;
use atlas_core::model::Leader;
use atlas_core::petal;

use crate::constants::PORTRAITS_DIR;
use crate::utils::asset_url;

thread_local! {
    static CLIP_SEQ: Cell<u64> = const { Cell::new(0) };
}

// Clip ids only need page-wide uniqueness; a counter is enough.
fn next_clip_id() -> String {
    CLIP_SEQ.with(|c| {
        let n = c.get();
        c.set(n + 1);
        format!("petal-clip-{n}")
    })
}

/// Build the marker element for one leader record. The visual encoding is
/// a pure function of the record's generation, academic field and gender.
pub fn generate(document: &Document, leader: &Leader) -> Result<HtmlElement, JsValue> {
    let petals = encoding::petal_count(leader.generation.as_deref());
    let colors = encoding::field_colors(leader.academic_field.as_deref());
    let rotation = encoding::rotation(leader.gender.as_deref());

    let portrait = leader.icon_url.as_deref().unwrap_or_default();
    let href = asset_url(&format!("{PORTRAITS_DIR}/{portrait}"));
    let svg = petal::marker_svg(petals, &colors, rotation, &href, &next_clip_id());

    let container: HtmlElement = document.create_element("div")?.dyn_into()?;
    container.set_class_name("marker-container");
    container.set_attribute("role", "button")?;
    container.set_attribute("tabindex", "0")?;
    container.set_attribute("aria-label", &leader.aria_label())?;
    container.set_inner_html(&svg);
    Ok(container)
}
