//! Parcel inventory parsing.

use growth_sim_parcel_models::Parcel;
use growth_sim_spatial::geometry::{self, SQ_FEET_PER_ACRE};
use growth_sim_spatial::{Feature, FeatureCollection};

/// Parses every feature with usable polygon geometry into a [`Parcel`].
///
/// Features without a usable polygon or representative point are skipped
/// and logged once as a count.
#[must_use]
pub fn parse_parcels(collection: &FeatureCollection) -> Vec<Parcel> {
    let mut skipped = 0_usize;
    let parcels: Vec<Parcel> = collection
        .iter()
        .filter_map(|feature| {
            let parcel = parse_parcel(feature);
            if parcel.is_none() {
                skipped += 1;
            }
            parcel
        })
        .collect();

    if skipped > 0 {
        log::warn!("Skipped {skipped} parcel features with unusable geometry");
    }

    parcels
}

/// Parses a single parcel feature.
///
/// Returns `None` when the feature has no valid polygon geometry.
#[must_use]
pub fn parse_parcel(feature: &Feature) -> Option<Parcel> {
    let geometry = geometry::polygonal(feature.geometry.as_ref()?).ok()?;
    let centroid = geometry::centroid(&geometry)
        .ok()
        .or_else(|| geometry::first_vertex(&geometry))?;

    let acres = feature
        .property_f64("Assessed_Acres")
        .filter(|a| *a > 0.0)
        .or_else(|| {
            feature
                .property_f64("Shape__Area")
                .filter(|a| *a > 0.0)
                .map(|sq_ft| sq_ft / SQ_FEET_PER_ACRE)
        })
        .or_else(|| geometry::geodesic_acres(&geometry).ok())
        .unwrap_or(0.0);

    Some(Parcel {
        parcel_no: text_property(feature, "PARCELNO"),
        address: text_property(feature, "PropertyAddress"),
        owner: text_property(feature, "Owner"),
        school_district: text_property(feature, "SchoolDistrict"),
        acres,
        land_value: feature.property_f64("Sum_LandValue"),
        geometry,
        centroid,
    })
}

fn text_property(feature: &Feature, key: &str) -> Option<String> {
    feature
        .property_str(key)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use geo::{line_string, polygon};

    use super::*;

    fn lot() -> Feature {
        Feature::new(polygon![
            (x: -89.501, y: 43.0),
            (x: -89.500, y: 43.0),
            (x: -89.500, y: 43.001),
            (x: -89.501, y: 43.001),
        ])
    }

    #[test]
    fn assessed_acres_take_precedence() {
        let parcel = parse_parcel(
            &lot()
                .with_property("Assessed_Acres", 3.5)
                .with_property("Shape__Area", 87_120.0),
        )
        .unwrap();
        assert!((parcel.acres - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn shape_area_is_square_feet() {
        let parcel = parse_parcel(
            &lot()
                .with_property("Assessed_Acres", 0.0)
                .with_property("Shape__Area", 87_120.0),
        )
        .unwrap();
        assert!((parcel.acres - 2.0).abs() < 1e-9);
    }

    #[test]
    fn geodesic_area_is_last_resort() {
        let parcel = parse_parcel(&lot()).unwrap();
        assert!(parcel.acres > 1.8 && parcel.acres < 2.6, "got {}", parcel.acres);
    }

    #[test]
    fn attributes_are_read() {
        let parcel = parse_parcel(
            &lot()
                .with_property("PARCELNO", "0608-222-0001")
                .with_property("PropertyAddress", "5520 Lacy Rd")
                .with_property("Owner", "")
                .with_property("Sum_LandValue", 125_000.0),
        )
        .unwrap();
        assert_eq!(parcel.parcel_no.as_deref(), Some("0608-222-0001"));
        assert_eq!(parcel.address.as_deref(), Some("5520 Lacy Rd"));
        assert_eq!(parcel.owner, None, "Empty owner is treated as missing");
        assert_eq!(parcel.land_value, Some(125_000.0));
        assert!((parcel.centroid.x() + 89.5005).abs() < 1e-9);
    }

    #[test]
    fn non_polygon_features_are_skipped() {
        let collection = FeatureCollection::new(vec![
            lot(),
            Feature::new(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]),
            Feature::default(),
        ]);
        assert_eq!(parse_parcels(&collection).len(), 1);
    }
}
