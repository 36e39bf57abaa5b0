//! Geo and script queries.

use search_dsl_shared::{param_enum, DslError, DslValue, OptionsBag, Serializable};

use crate::core::{impl_plain_query, impl_query_builder, Query, Script, QUERY_CAPABILITY};

param_enum! {
    /// How the distance is computed.
    pub enum DistanceType("distance_type", "query-dsl-geo-distance-query.html", Lower) {
        Arc => "arc",
        Plane => "plane",
    }
}

param_enum! {
    /// Handling of invalid coordinates.
    pub enum GeoValidationMethod("validation_method", "query-dsl-geo-distance-query.html", Upper) {
        IgnoreMalformed => "IGNORE_MALFORMED",
        Coerce => "COERCE",
        Strict => "STRICT",
    }
}

/// A point given by latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<GeoPoint> for DslValue {
    fn from(point: GeoPoint) -> Self {
        let mut body = OptionsBag::new();
        body.set("lat", point.lat);
        body.set("lon", point.lon);
        body.into()
    }
}

/// Matches geo points within a distance of a central point.
#[derive(Debug, Clone)]
pub struct GeoDistanceQuery {
    inner: Query,
    field: String,
    point: DslValue,
}

impl GeoDistanceQuery {
    /// `distance` is a string with a unit, e.g. `200km`. `point` is a
    /// [`GeoPoint`], a geohash or `[lon, lat]`.
    pub fn new(
        field: impl Into<String>,
        distance: impl Into<String>,
        point: impl Into<DslValue>,
    ) -> Self {
        let mut inner = Query::new("geo_distance");
        inner.set("distance", distance.into());
        Self {
            inner,
            field: field.into(),
            point: point.into(),
        }
    }

    pub fn distance_type(mut self, distance_type: DistanceType) -> Self {
        self.inner.set("distance_type", distance_type);
        self
    }

    pub fn validation_method(mut self, method: GeoValidationMethod) -> Self {
        self.inner.set("validation_method", method);
        self
    }

    pub fn ignore_unmapped(mut self, ignore: bool) -> Self {
        self.inner.set("ignore_unmapped", ignore);
        self
    }
}

impl Serializable for GeoDistanceQuery {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let mut body = OptionsBag::new();
        let mut opts = self.inner.opts().iter();
        if let Some((key, value)) = opts.next() {
            body.set(key, value.clone());
        }
        body.set(self.field.as_str(), self.point.clone());
        for (key, value) in opts {
            body.set(key, value.clone());
        }
        Ok(self.inner.envelope(body))
    }

    fn capability(&self) -> &'static str {
        QUERY_CAPABILITY
    }
}

/// Filters documents with a script returning a boolean.
#[derive(Debug, Clone)]
pub struct ScriptQuery {
    inner: Query,
}

impl ScriptQuery {
    pub fn new(script: Script) -> Self {
        let mut inner = Query::new("script");
        inner.set("script", script);
        Self { inner }
    }
}

impl_query_builder!(GeoDistanceQuery);
impl_plain_query!(ScriptQuery);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QueryBuilder;
    use serde_json::json;

    #[test]
    fn test_geo_distance() {
        let query = GeoDistanceQuery::new("pin.location", "200km", GeoPoint::new(40.0, -70.0))
            .distance_type(DistanceType::Arc)
            .validation_method(GeoValidationMethod::Coerce);
        assert_eq!(
            serde_json::to_string(&query).unwrap(),
            r#"{"geo_distance":{"distance":"200km","pin.location":{"lat":40.0,"lon":-70.0},"distance_type":"arc","validation_method":"COERCE"}}"#
        );
    }

    #[test]
    fn test_geo_distance_with_geohash() {
        let query = GeoDistanceQuery::new("pin.location", "12km", "drm3btev3e86").boost(2.0);
        assert_eq!(
            query.to_json().unwrap(),
            json!({
                "geo_distance": {
                    "distance": "12km",
                    "pin.location": "drm3btev3e86",
                    "boost": 2.0
                }
            })
        );
    }

    #[test]
    fn test_validation_method_case() {
        assert_eq!(
            "ignore_malformed".parse::<GeoValidationMethod>().unwrap(),
            GeoValidationMethod::IgnoreMalformed
        );
        assert_eq!(
            "STRICT".parse::<GeoValidationMethod>().unwrap(),
            GeoValidationMethod::Strict
        );
        let err = GeoValidationMethod::parse_with("lenient", &search_dsl_shared::DslConfig::quiet())
            .unwrap_err();
        assert_eq!(err.param(), Some("validation_method"));
    }

    #[test]
    fn test_script_query() {
        let query = ScriptQuery::new(
            Script::inline("doc['num1'].value > params.param1")
                .lang("painless")
                .param("param1", 5),
        );
        assert_eq!(
            query.to_json().unwrap(),
            json!({
                "script": {
                    "script": {
                        "source": "doc['num1'].value > params.param1",
                        "lang": "painless",
                        "params": { "param1": 5 }
                    }
                }
            })
        );
    }
}
