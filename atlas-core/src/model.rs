use serde::{Deserialize, Serialize};
use std::fmt;

/// A GeoJSON-shaped collection of leader features. Only the parts of the
/// format this application consumes are modeled; everything else in the
/// file is ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Leader,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub coordinates: Option<[f64; 2]>,
}

/// One leader record as stored in the data file. Field names mirror the
/// source file verbatim, including the trailing space in "Birth year ".
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Leader {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Head of state")]
    pub head_of_state: Option<String>,
    #[serde(rename = "Academic field")]
    pub academic_field: Option<String>,
    #[serde(rename = "Profession")]
    pub profession: Option<String>,
    #[serde(rename = "University")]
    pub university: Option<String>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "Birth year ")]
    pub birth_year: Option<BirthYear>,
    #[serde(rename = "Generation")]
    pub generation: Option<String>,
    #[serde(rename = "iconUrl")]
    pub icon_url: Option<String>,
    #[serde(rename = "Region")]
    pub region: Option<String>,
}

/// Birth years appear both as numbers and as strings in the data.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BirthYear {
    Year(i64),
    Text(String),
}

impl fmt::Display for BirthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BirthYear::Year(y) => write!(f, "{y}"),
            BirthYear::Text(t) => f.write_str(t),
        }
    }
}

impl Feature {
    /// Marker anchor point as (longitude, latitude), if the feature
    /// carries a usable geometry.
    pub fn lng_lat(&self) -> Option<[f64; 2]> {
        self.geometry.as_ref().and_then(|g| g.coordinates)
    }
}

impl Leader {
    /// Accessible label for the marker control.
    pub fn aria_label(&self) -> String {
        format!(
            "{}, {}",
            self.head_of_state.as_deref().unwrap_or(""),
            self.title.as_deref().unwrap_or("")
        )
    }

    /// Academic field for display, with the documented fallback.
    pub fn display_field(&self) -> &str {
        self.academic_field
            .as_deref()
            .filter(|f| !f.is_empty())
            .unwrap_or("No diploma")
    }
}

pub fn parse_feature_collection(text: &str) -> Result<FeatureCollection, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [2.35, 48.85] },
                "properties": {
                    "Title": "France",
                    "Head of state": "Some Leader",
                    "Academic field": "Formal sciences",
                    "Gender": "Female",
                    "Birth year ": 1968,
                    "Generation": "Generation X",
                    "iconUrl": "leader.jpg",
                    "Region": "Europe"
                }
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": { "Title": "Atlantis", "Birth year ": "c. 1950" }
            }
        ]
    }"#;

    #[test]
    fn parses_leader_fields_including_odd_keys() {
        let data = parse_feature_collection(SAMPLE).unwrap();
        assert_eq!(data.features.len(), 2);
        let leader = &data.features[0].properties;
        assert_eq!(leader.title.as_deref(), Some("France"));
        assert_eq!(leader.generation.as_deref(), Some("Generation X"));
        assert_eq!(leader.birth_year.as_ref().unwrap().to_string(), "1968");
        let other = &data.features[1].properties;
        assert_eq!(other.birth_year.as_ref().unwrap().to_string(), "c. 1950");
    }

    #[test]
    fn lng_lat_is_none_without_geometry() {
        let data = parse_feature_collection(SAMPLE).unwrap();
        assert_eq!(data.features[0].lng_lat(), Some([2.35, 48.85]));
        assert_eq!(data.features[1].lng_lat(), None);
    }

    #[test]
    fn placement_counts_split_valid_and_skipped() {
        let data = parse_feature_collection(SAMPLE).unwrap();
        let placed = data.features.iter().filter(|f| f.lng_lat().is_some()).count();
        let skipped = data.features.len() - placed;
        assert_eq!(placed, 1);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn display_field_falls_back_to_no_diploma() {
        let leader = Leader {
            academic_field: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(leader.display_field(), "No diploma");
        assert_eq!(Leader::default().display_field(), "No diploma");
    }

    #[test]
    fn aria_label_joins_name_and_title() {
        let leader = Leader {
            head_of_state: Some("Some Leader".to_string()),
            title: Some("France".to_string()),
            ..Default::default()
        };
        assert_eq!(leader.aria_label(), "Some Leader, France");
    }
}
