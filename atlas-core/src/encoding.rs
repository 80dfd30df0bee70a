//! Deterministic mapping from a leader's categorical attributes to the
//! visual encoding of their marker: colors, petal count and rotation.
//! Every function here is total; unknown or missing input falls into a
//! documented default branch.

/// Fallback color used for "no diploma" and any unrecognized field label.
pub const DEFAULT_FIELD_COLOR: &str = "#95A5A6";

// Academic field to marker color.
const FIELD_COLORS: [(&str, &str); 4] = [
    ("Humanities and social sciences", "#F4A460"),
    ("Natural sciences", "#2ECC71"),
    ("Formal sciences", "#00CED1"),
    ("Professions and applied sciences", "#9B59B6"),
];

// Generation label to petal count.
const GENERATION_PETALS: [(&str, u8); 6] = [
    ("Silent Generation", 4),      // 1928-1945
    ("Baby Boomers", 3),           // 1946-1964
    ("Generation X", 2),           // 1965-1980
    ("Millennials", 1),            // 1981-1996
    ("Generation Y - Millennials", 1),
    ("Generation Y", 1),
];

/// Marker colors for an academic field value. Multiple fields may be
/// given as a comma-separated list; the returned order follows the input
/// order. Note that the same set of fields listed in a different order
/// yields a visually different gradient; this matches the source data's
/// insertion-order convention.
pub fn field_colors(field: Option<&str>) -> Vec<&'static str> {
    let field = match field {
        Some(f) if !f.is_empty() && f != "no diploma" => f,
        _ => return vec![DEFAULT_FIELD_COLOR],
    };
    field
        .split(',')
        .map(|token| {
            let token = token.trim();
            FIELD_COLORS
                .iter()
                .find(|(label, _)| *label == token)
                .map(|(_, color)| *color)
                .unwrap_or(DEFAULT_FIELD_COLOR)
        })
        .collect()
}

/// Petal count for a generation label; unrecognized labels get a single
/// petal (a plain circle).
pub fn petal_count(generation: Option<&str>) -> u8 {
    generation
        .and_then(|g| {
            GENERATION_PETALS
                .iter()
                .find(|(label, _)| *label == g)
                .map(|(_, count)| *count)
        })
        .unwrap_or(1)
}

/// Marker rotation in degrees. The comparison is case-sensitive by design;
/// the source data uses exactly "Female".
pub fn rotation(gender: Option<&str>) -> u32 {
    if gender == Some("Female") { 180 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn petal_counts_for_recognized_generations() {
        assert_eq!(petal_count(Some("Silent Generation")), 4);
        assert_eq!(petal_count(Some("Baby Boomers")), 3);
        assert_eq!(petal_count(Some("Generation X")), 2);
        assert_eq!(petal_count(Some("Millennials")), 1);
        assert_eq!(petal_count(Some("Generation Y - Millennials")), 1);
        assert_eq!(petal_count(Some("Generation Y")), 1);
    }

    #[test]
    fn petal_count_defaults_to_one() {
        assert_eq!(petal_count(Some("Generation Z")), 1);
        assert_eq!(petal_count(Some("")), 1);
        assert_eq!(petal_count(None), 1);
    }

    #[test]
    fn rotation_is_180_only_for_exact_female() {
        assert_eq!(rotation(Some("Female")), 180);
        assert_eq!(rotation(Some("Male")), 0);
        assert_eq!(rotation(Some("female")), 0);
        assert_eq!(rotation(Some("")), 0);
        assert_eq!(rotation(None), 0);
    }

    #[test]
    fn missing_or_no_diploma_field_is_single_gray() {
        assert_eq!(field_colors(None), vec![DEFAULT_FIELD_COLOR]);
        assert_eq!(field_colors(Some("")), vec![DEFAULT_FIELD_COLOR]);
        assert_eq!(field_colors(Some("no diploma")), vec![DEFAULT_FIELD_COLOR]);
    }

    #[test]
    fn multiple_fields_keep_input_order() {
        let colors = field_colors(Some("Natural sciences, Formal sciences"));
        assert_eq!(colors, vec!["#2ECC71", "#00CED1"]);
        let reversed = field_colors(Some("Formal sciences, Natural sciences"));
        assert_eq!(reversed, vec!["#00CED1", "#2ECC71"]);
    }

    #[test]
    fn unknown_field_falls_back_to_gray() {
        assert_eq!(field_colors(Some("Unknown label")), vec![DEFAULT_FIELD_COLOR]);
        let mixed = field_colors(Some("Natural sciences, Astrology"));
        assert_eq!(mixed, vec!["#2ECC71", DEFAULT_FIELD_COLOR]);
    }
}
