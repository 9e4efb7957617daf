/// Marker reconciliation against a rendering surface
///
/// The core never draws anything. It pushes markers at whatever surface it
/// is given: clear everything, add one marker per mappable record in the
/// projection, render once. Full teardown instead of diffing - record
/// counts are in the low thousands, so rebuilding is cheap and can't leave
/// stale markers behind.

use crate::store::{AgeCategory, Record};
use serde::{Deserialize, Serialize};

/// Gray sentinel used for Unknown age
pub const UNKNOWN_COLOR: &str = "#95a5a6";

/// A rendering surface the core pushes markers to.
///
/// The core only writes: it never queries the surface for its contents.
pub trait MarkerSurface {
    fn clear(&mut self);
    fn add_marker(&mut self, marker: Marker);
    fn render(&mut self);
}

/// One point marker: position, fill color, popup label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    pub color: String,
    pub label: String,
}

/// Keeps a marker surface consistent with a filtered projection
pub struct MarkerSync;

impl MarkerSync {
    /// Replace the surface's contents with markers for the projection.
    ///
    /// Records missing either coordinate are skipped. 0.0 is a valid
    /// coordinate here; only genuinely absent values exclude a record.
    /// After this call the surface exactly reflects the projection.
    pub fn reconcile<S: MarkerSurface>(surface: &mut S, projection: &[Record]) {
        surface.clear();

        for record in projection {
            let Some((latitude, longitude)) = record.position() else {
                continue;
            };

            surface.add_marker(Marker {
                latitude,
                longitude,
                color: Self::color_for(record.age_category).to_string(),
                label: Self::label_for(record),
            });
        }

        surface.render();
    }

    /// Fill color for an age bucket
    pub fn color_for(category: AgeCategory) -> &'static str {
        match category {
            AgeCategory::Under5 => "#2ecc71",
            AgeCategory::FiveToTen => "#f1c40f",
            AgeCategory::TenToTwenty => "#e67e22",
            AgeCategory::TwentyPlus => "#e74c3c",
            AgeCategory::Unknown => UNKNOWN_COLOR,
        }
    }

    fn label_for(record: &Record) -> String {
        format!(
            "{}\nYear: {}\nAge: {}",
            record.scientific_name,
            record.year_label(),
            record.age_category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test double that records what the core pushed at it
    #[derive(Default)]
    struct RecordingSurface {
        markers: Vec<Marker>,
        clears: usize,
        renders: usize,
    }

    impl MarkerSurface for RecordingSurface {
        fn clear(&mut self) {
            self.markers.clear();
            self.clears += 1;
        }

        fn add_marker(&mut self, marker: Marker) {
            self.markers.push(marker);
        }

        fn render(&mut self) {
            self.renders += 1;
        }
    }

    fn record(name: &str, lat: Option<f64>, lon: Option<f64>, year: Option<i32>, category: AgeCategory) -> Record {
        Record {
            scientific_name: name.to_string(),
            latitude: lat,
            longitude: lon,
            year,
            age_category: category,
            notes: None,
            id: None,
            created_by: None,
            created_at: None,
        }
    }

    #[test]
    fn test_reconcile_replaces_surface_contents() {
        let mut surface = RecordingSurface::default();
        surface.markers.push(Marker {
            latitude: 0.0,
            longitude: 0.0,
            color: "stale".to_string(),
            label: "stale".to_string(),
        });

        let projection = vec![record(
            "Banksia serrata",
            Some(-33.0),
            Some(151.0),
            Some(2024),
            AgeCategory::Under5,
        )];

        MarkerSync::reconcile(&mut surface, &projection);

        assert_eq!(surface.clears, 1);
        assert_eq!(surface.renders, 1);
        assert_eq!(surface.markers.len(), 1);
        assert_eq!(surface.markers[0].color, "#2ecc71");
        assert_eq!(surface.markers[0].latitude, -33.0);
    }

    #[test]
    fn test_unmappable_records_are_skipped() {
        let mut surface = RecordingSurface::default();
        let projection = vec![
            record("Has both", Some(-37.5), Some(145.1), None, AgeCategory::Unknown),
            record("Missing lon", Some(-37.5), None, None, AgeCategory::Unknown),
            record("Missing both", None, None, None, AgeCategory::Unknown),
        ];

        MarkerSync::reconcile(&mut surface, &projection);

        assert_eq!(surface.markers.len(), 1);
        assert_eq!(surface.markers[0].label.lines().next(), Some("Has both"));
    }

    #[test]
    fn test_zero_coordinates_still_map() {
        // Regression for the old truthiness check that dropped equatorial points
        let mut surface = RecordingSurface::default();
        let projection = vec![record(
            "Avicennia marina",
            Some(0.0),
            Some(0.0),
            Some(2020),
            AgeCategory::Under5,
        )];

        MarkerSync::reconcile(&mut surface, &projection);

        assert_eq!(surface.markers.len(), 1);
        assert_eq!(surface.markers[0].latitude, 0.0);
        assert_eq!(surface.markers[0].longitude, 0.0);
    }

    #[test]
    fn test_unknown_age_gets_gray_sentinel() {
        assert_eq!(MarkerSync::color_for(AgeCategory::Unknown), UNKNOWN_COLOR);
    }

    #[test]
    fn test_label_contains_species_year_and_age() {
        let mut surface = RecordingSurface::default();
        let projection = vec![record(
            "Eucalyptus regnans",
            Some(-37.5),
            Some(145.1),
            Some(2010),
            AgeCategory::TenToTwenty,
        )];

        MarkerSync::reconcile(&mut surface, &projection);

        let label = &surface.markers[0].label;
        assert!(label.contains("Eucalyptus regnans"));
        assert!(label.contains("2010"));
        assert!(label.contains("10-20"));
    }

    #[test]
    fn test_missing_year_shows_unknown_in_label() {
        let mut surface = RecordingSurface::default();
        let projection = vec![record(
            "Xanthorrhoea australis",
            Some(-37.8),
            Some(144.9),
            None,
            AgeCategory::Unknown,
        )];

        MarkerSync::reconcile(&mut surface, &projection);

        assert!(surface.markers[0].label.contains("Year: Unknown"));
    }

    #[test]
    fn test_reconcile_with_empty_projection_clears_surface() {
        let mut surface = RecordingSurface::default();
        surface.markers.push(Marker {
            latitude: 1.0,
            longitude: 1.0,
            color: "stale".to_string(),
            label: "stale".to_string(),
        });

        MarkerSync::reconcile(&mut surface, &[]);

        assert!(surface.markers.is_empty());
        assert_eq!(surface.renders, 1);
    }
}
