use geojson::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The administrative place names and codes for a point on Earth.
///
/// Every field is optional; an absent attribute is the empty string. Which
/// fields are populated depends on the datasets a [`crate::Geocoder`] was
/// built from: country datasets fill the country-level fields, province
/// and city datasets add `province`, `province_code` and `city` on top.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub country_long: String,
    /// ISO 3166-1 alpha-2 code.
    pub country_code_2: String,
    /// ISO 3166-1 alpha-3 code.
    pub country_code_3: String,
    pub continent: String,
    pub region: String,
    pub sub_region: String,
    pub province: String,
    /// ISO 3166-2 code.
    pub province_code: String,
    pub city: String,
}

impl Location {
    /// Reads the recognized properties of a boundary feature.
    ///
    /// Missing keys and non-string values leave the field empty; extraction
    /// itself never fails.
    pub(crate) fn from_properties(properties: Option<&JsonObject>) -> Self {
        let Some(props) = properties else {
            return Location::default();
        };
        // Urban-area names carry a trailing "2" when the source had to
        // disambiguate duplicates.
        let mut city = string_property(props, &["name_conve"]);
        if city.ends_with('2') {
            city.pop();
        }
        Location {
            country: string_property(props, &["ADMIN", "admin"]),
            country_long: string_property(props, &["FORMAL_EN"]),
            country_code_2: string_property(props, &["ISO_A2"]),
            country_code_3: string_property(props, &["ISO_A3"]),
            continent: string_property(props, &["CONTINENT"]),
            region: string_property(props, &["REGION_UN"]),
            sub_region: string_property(props, &["SUBREGION"]),
            province: string_property(props, &["name"]),
            province_code: string_property(props, &["iso_3166_2"]),
            city,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.country.is_empty()
            && self.country_long.is_empty()
            && self.country_code_2.is_empty()
            && self.country_code_3.is_empty()
            && self.continent.is_empty()
            && self.region.is_empty()
            && self.sub_region.is_empty()
            && self.province.is_empty()
            && self.province_code.is_empty()
            && self.city.is_empty()
    }

    /// Takes every field of `other` that is still empty in `self`.
    pub(crate) fn fill_missing_from(&mut self, other: &Location) {
        fn fill(dst: &mut String, src: &str) {
            if dst.is_empty() {
                dst.push_str(src);
            }
        }
        fill(&mut self.country, &other.country);
        fill(&mut self.country_long, &other.country_long);
        fill(&mut self.country_code_2, &other.country_code_2);
        fill(&mut self.country_code_3, &other.country_code_3);
        fill(&mut self.continent, &other.continent);
        fill(&mut self.region, &other.region);
        fill(&mut self.sub_region, &other.sub_region);
        fill(&mut self.province, &other.province);
        fill(&mut self.province_code, &other.province_code);
        fill(&mut self.city, &other.city);
    }
}

/// The first key whose value is a non-empty JSON string, or empty.
fn string_property(props: &JsonObject, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| match props.get(*key) {
            Some(JsonValue::String(value)) if !value.is_empty() => Some(value.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from("<Location>");
        if !self.city.is_empty() {
            out.push(' ');
            out.push_str(&self.city);
            out.push(',');
        }
        if !self.province.is_empty() {
            out.push(' ');
            out.push_str(&self.province);
            out.push(',');
        }
        if !self.country.is_empty() {
            out.push(' ');
            out.push_str(&self.country);
        } else if !self.country_long.is_empty() {
            out.push(' ');
            out.push_str(&self.country_long);
        }
        if !self.country_code_3.is_empty() {
            out.push_str(" (");
            out.push_str(&self.country_code_3);
            out.push(')');
        } else if !self.country_code_2.is_empty() {
            out.push_str(" (");
            out.push_str(&self.country_code_2);
            out.push(')');
        }
        let scope = if !self.continent.is_empty() {
            &self.continent
        } else if !self.region.is_empty() {
            &self.region
        } else {
            &self.sub_region
        };
        if !scope.is_empty() {
            if out != "<Location>" {
                out.push(',');
            }
            out.push(' ');
            out.push_str(scope);
        }
        if out == "<Location>" {
            out.push_str(" Empty Location");
        }
        f.write_str(&out)
    }
}
