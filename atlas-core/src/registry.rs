//! Marker lifecycle state, kept separate from the rendering widget so the
//! filter/highlight/reset rules can be exercised without a browser. The
//! registry owns one entry per placed marker: the widget handle, the
//! source record's properties, and the current visual style. Styles are
//! mutated here and pushed to the widget by the adapter in a sync pass.

/// Visual state applied to a marker element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    pub opacity: f64,
    pub scale: f64,
    pub visible: bool,
    pub highlighted: bool,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        MarkerStyle {
            opacity: 1.0,
            scale: 1.0,
            visible: true,
            highlighted: false,
        }
    }
}

impl MarkerStyle {
    /// Emphasized state for highlighted markers. Visibility is untouched.
    fn emphasize(&mut self) {
        self.opacity = 1.0;
        self.scale = 1.2;
        self.highlighted = true;
    }

    /// De-emphasized state for non-matching markers during a highlight.
    fn dim(&mut self) {
        self.opacity = 0.4;
        self.scale = 1.0;
        self.highlighted = false;
    }
}

pub struct MarkerEntry<H, P> {
    pub handle: H,
    pub properties: P,
    pub style: MarkerStyle,
}

/// Registry of placed markers, generic over the widget handle type `H`
/// and the stored property type `P`.
pub struct MarkerRegistry<H, P> {
    entries: Vec<MarkerEntry<H, P>>,
}

impl<H, P> Default for MarkerRegistry<H, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, P> MarkerRegistry<H, P> {
    pub fn new() -> Self {
        MarkerRegistry { entries: Vec::new() }
    }

    /// Retain a placed marker with its source properties and the default
    /// style.
    pub fn add(&mut self, handle: H, properties: P) {
        self.entries.push(MarkerEntry {
            handle,
            properties,
            style: MarkerStyle::default(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MarkerEntry<H, P>] {
        &self.entries
    }

    /// Remove and yield every entry; used when clearing markers so the
    /// caller can release the widget handles.
    pub fn drain(&mut self) -> impl Iterator<Item = MarkerEntry<H, P>> + '_ {
        self.entries.drain(..)
    }

    /// Toggle visibility from the predicate. Properties and the other
    /// style fields are untouched, so a later reset restores the marker
    /// fully interactive.
    pub fn filter<F: Fn(&P) -> bool>(&mut self, predicate: F) {
        for entry in &mut self.entries {
            entry.style.visible = predicate(&entry.properties);
        }
    }

    /// Emphasize matching markers and dim the rest.
    pub fn highlight<F: Fn(&P) -> bool>(&mut self, predicate: F) {
        for entry in &mut self.entries {
            if predicate(&entry.properties) {
                entry.style.emphasize();
            } else {
                entry.style.dim();
            }
        }
    }

    /// Restore every marker to the default style, whatever the prior
    /// filter/highlight history.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.style = MarkerStyle::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MarkerRegistry<u32, &'static str> {
        let mut registry = MarkerRegistry::new();
        registry.add(0, "Europe");
        registry.add(1, "Africa");
        registry.add(2, "Europe");
        registry
    }

    #[test]
    fn filter_only_toggles_visibility() {
        let mut registry = sample();
        registry.filter(|region| *region == "Europe");
        assert_eq!(registry.len(), 3);
        let styles: Vec<bool> = registry.entries().iter().map(|e| e.style.visible).collect();
        assert_eq!(styles, vec![true, false, true]);
        for entry in registry.entries() {
            assert_eq!(entry.style.opacity, 1.0);
            assert_eq!(entry.style.scale, 1.0);
            assert!(!entry.style.highlighted);
        }
        // Properties survive filtering.
        assert_eq!(registry.entries()[1].properties, "Africa");
    }

    #[test]
    fn highlight_emphasizes_matches_and_dims_the_rest() {
        let mut registry = sample();
        registry.highlight(|region| *region == "Africa");
        let highlighted = &registry.entries()[1].style;
        assert_eq!(highlighted.opacity, 1.0);
        assert_eq!(highlighted.scale, 1.2);
        assert!(highlighted.highlighted);
        let dimmed = &registry.entries()[0].style;
        assert_eq!(dimmed.opacity, 0.4);
        assert_eq!(dimmed.scale, 1.0);
        assert!(!dimmed.highlighted);
    }

    #[test]
    fn highlight_does_not_change_visibility() {
        let mut registry = sample();
        registry.filter(|region| *region == "Europe");
        registry.highlight(|_| true);
        let visible: Vec<bool> = registry.entries().iter().map(|e| e.style.visible).collect();
        assert_eq!(visible, vec![true, false, true]);
    }

    #[test]
    fn reset_restores_defaults_after_any_predicate() {
        let mut registry = sample();
        registry.filter(|_| false);
        registry.highlight(|region| *region == "Europe");
        registry.reset();
        for entry in registry.entries() {
            assert_eq!(entry.style, MarkerStyle::default());
        }
    }

    #[test]
    fn drain_yields_handles_and_empties_the_registry() {
        let mut registry = sample();
        let handles: Vec<u32> = registry.drain().map(|e| e.handle).collect();
        assert_eq!(handles, vec![0, 1, 2]);
        assert!(registry.is_empty());
    }
}
