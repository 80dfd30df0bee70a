use std::cell::RefCell;
use std::rc::Rc;

use web_sys::Document;

use atlas_core::model::FeatureCollection;

use crate::map::MapAdapter;

/// Application state kept alive for the lifetime of the page and shared
/// across the WASM callbacks behind an `Rc<RefCell<_>>`.
pub struct State {
    pub document: Document,
    pub adapter: MapAdapter,
    pub leaders: FeatureCollection,
}

thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}

/// Run `f` against the live state, if initialization has completed.
pub fn with_state(f: impl FnOnce(&mut State)) {
    STATE.with(|st| {
        if let Some(state) = st.borrow().as_ref() {
            f(&mut state.borrow_mut());
        }
    });
}
