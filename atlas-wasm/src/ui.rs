//! Detail modal, legend toggle and the fatal-error panel. All wiring is
//! best-effort: when the host page omits one of the expected elements the
//! corresponding feature is silently skipped.

use std::fmt::Write;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, KeyboardEvent};

use atlas_core::model::Leader;

use crate::constants::PORTRAITS_DIR;
use crate::utils::asset_url;

/// Wire the legend toggle and the modal close paths (backdrop click,
/// Escape key).
pub fn setup_ui(document: &Document) -> Result<(), JsValue> {
    if let (Some(toggle), Some(panel)) = (
        document.get_element_by_id("legend-toggle"),
        document.get_element_by_id("legend-panel"),
    ) {
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let _ = panel.class_list().toggle("collapsed");
        }));
        toggle.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    if let Some(modal) = document.get_element_by_id("detail-modal") {
        if let Ok(Some(backdrop)) = modal.query_selector(".modal-backdrop") {
            let doc = document.clone();
            let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || hide_modal(&doc)));
            backdrop.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
            onclick.forget();
        }

        let doc = document.clone();
        let onkeydown = Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |e: KeyboardEvent| {
            if e.key() == "Escape" && modal.class_list().contains("visible") {
                hide_modal(&doc);
            }
        }));
        document.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())?;
        onkeydown.forget();
    }

    Ok(())
}

/// Populate and reveal the detail modal for one leader record.
pub fn show_leader_detail(document: &Document, leader: &Leader) {
    let Some(modal) = document.get_element_by_id("detail-modal") else {
        return;
    };
    let Ok(Some(content)) = modal.query_selector(".modal-content") else {
        return;
    };

    let portrait = leader.icon_url.as_deref().unwrap_or_default();
    let href = asset_url(&format!("{PORTRAITS_DIR}/{portrait}"));
    content.set_inner_html(&detail_html(leader, &href));

    // The close button is recreated with the content on every open, so it
    // gets a fresh handler each time.
    if let Ok(Some(close)) = content.query_selector(".close-btn") {
        let doc = document.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || hide_modal(&doc)));
        let _ = close.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref());
        onclick.forget();
    }

    let _ = modal.class_list().add_1("visible");
}

/// Close the detail modal. A no-op when already closed or absent.
pub fn hide_modal(document: &Document) {
    if let Some(modal) = document.get_element_by_id("detail-modal") {
        let _ = modal.class_list().remove_1("visible");
    }
}

/// Terminal error state: replace the main content area with a message.
pub fn show_error(document: &Document, message: &str) {
    if let Some(container) = document.get_element_by_id("narrative-container") {
        container.set_inner_html(&format!(
            "<div class=\"error-message\"><h2>Error</h2><p>{message}</p></div>"
        ));
    }
}

fn detail_html(leader: &Leader, portrait_href: &str) -> String {
    let name = leader.head_of_state.as_deref().unwrap_or("");
    let country = leader.title.as_deref().unwrap_or("");
    let generation = leader.generation.as_deref().unwrap_or("");

    let mut body = String::new();
    let _ = write!(
        body,
        "<p><strong>Region:</strong> {}</p>",
        leader.region.as_deref().unwrap_or("")
    );
    match &leader.birth_year {
        Some(year) => {
            let _ = write!(body, "<p><strong>Generation:</strong> {generation} (Born {year})</p>");
        }
        None => {
            let _ = write!(body, "<p><strong>Generation:</strong> {generation}</p>");
        }
    }
    let _ = write!(
        body,
        "<p><strong>Gender:</strong> {}</p>",
        leader.gender.as_deref().unwrap_or("")
    );
    let _ = write!(
        body,
        "<p><strong>Academic Field:</strong> {}</p>",
        leader.display_field()
    );
    if let Some(profession) = &leader.profession {
        let _ = write!(body, "<p><strong>Profession:</strong> {profession}</p>");
    }
    if let Some(university) = &leader.university {
        let _ = write!(body, "<p><strong>University:</strong> {university}</p>");
    }

    format!(
        "<button class=\"close-btn\" aria-label=\"Close\">&times;</button>\
         <div class=\"modal-header\">\
         <img class=\"modal-portrait\" src=\"{portrait_href}\" alt=\"{name}\" />\
         <h2>{name}</h2><h3>{country}</h3></div>\
         <div class=\"modal-body\">{body}</div>"
    )
}
