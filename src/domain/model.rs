use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_COUNTRY: &str = "Georgia";
pub const DESCRIPTION_PLACEHOLDER: &str = "Подробное описание будет добавлено позже.";

/// Vehicle identifier, kept in its string form.
///
/// The listing may carry ids as JSON numbers or strings; both deserialize to
/// the same text so `42` and `"42"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawVehicleId")]
pub struct VehicleId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVehicleId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawVehicleId> for VehicleId {
    fn from(raw: RawVehicleId) -> Self {
        match raw {
            RawVehicleId::Text(text) => Self(text),
            RawVehicleId::Number(number) => Self(number_to_id(&number)),
        }
    }
}

fn number_to_id(number: &serde_json::Number) -> String {
    if let Some(n) = number.as_i64() {
        return n.to_string();
    }
    if let Some(n) = number.as_u64() {
        return n.to_string();
    }
    match number.as_f64() {
        // 42.0 與 42 視為同一個 id
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        Some(f) => f.to_string(),
        None => number.to_string(),
    }
}

impl VehicleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, requested: &str) -> bool {
        self.0 == requested
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub odometer: u64,
    pub engine: String,
    pub drive: String,
    pub location: String,
    pub status: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub vin: String,
}

impl Vehicle {
    pub fn title(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    pub fn image_url(&self) -> &str {
        non_empty(&self.image).unwrap_or("")
    }

    pub fn country_label(&self) -> &str {
        non_empty(&self.country).unwrap_or(DEFAULT_COUNTRY)
    }

    pub fn description_text(&self) -> &str {
        non_empty(&self.description).unwrap_or(DESCRIPTION_PLACEHOLDER)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    None,
    PriceAsc,
    PriceDesc,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            other => Err(format!(
                "Unknown sort mode '{}'. Valid modes: none, price-asc, price-desc",
                other
            )),
        }
    }
}

/// Current filter and sort choices of a grid page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub brand: Option<String>,
    pub year: Option<String>,
    pub sort: SortMode,
}

impl Selection {
    /// Builds a selection from raw control values, where `""` means "any".
    pub fn from_controls(brand: &str, year: &str, sort: SortMode) -> Self {
        Self {
            brand: control_value(brand),
            year: control_value(year),
            sort,
        }
    }

    pub fn with_brand(mut self, brand: &str) -> Self {
        self.brand = control_value(brand);
        self
    }

    pub fn with_year(mut self, year: &str) -> Self {
        self.year = control_value(year);
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

pub(crate) fn control_value(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Page-identity marker choosing which flow runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Catalog,
    Car,
}

impl Page {
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Car => "car",
        }
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "catalog" => Ok(Self::Catalog),
            "car" => Ok(Self::Car),
            other => Err(format!(
                "Unknown page marker '{}'. Valid markers: catalog, car",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteOptions {
    pub grid_page: String,
    pub detail_page: String,
    pub phone_href: String,
    pub phone_label: String,
    pub messenger_href: String,
    pub messenger_label: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            grid_page: "cars.html".to_string(),
            detail_page: "car.html".to_string(),
            phone_href: "tel:+995000000000".to_string(),
            phone_label: "+995 …".to_string(),
            messenger_href: "https://t.me/your_telegram".to_string(),
            messenger_label: "@your_telegram".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle_json(id: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "brand": "Toyota",
            "model": "Camry",
            "year": 2019,
            "odometer": 45000,
            "engine": "2.5L",
            "drive": "FWD",
            "location": "Tbilisi",
            "status": "In stock",
            "price": 12000,
            "vin": "4T1B11HK5KU000001"
        })
    }

    #[test]
    fn test_numeric_and_string_ids_compare_equal() {
        let numeric: Vehicle = serde_json::from_value(vehicle_json(serde_json::json!(42))).unwrap();
        let text: Vehicle = serde_json::from_value(vehicle_json(serde_json::json!("42"))).unwrap();
        let float: Vehicle = serde_json::from_value(vehicle_json(serde_json::json!(42.0))).unwrap();

        assert_eq!(numeric.id, text.id);
        assert_eq!(numeric.id, float.id);
        assert!(numeric.id.matches("42"));
        assert_eq!(numeric.id.as_str(), "42");
    }

    #[test]
    fn test_fractional_id_keeps_decimal_form() {
        let vehicle: Vehicle =
            serde_json::from_value(vehicle_json(serde_json::json!(1.5))).unwrap();
        assert_eq!(vehicle.id.as_str(), "1.5");
    }

    #[test]
    fn test_optional_fields_fall_back_to_defaults() {
        let mut json = vehicle_json(serde_json::json!(1));
        json["country"] = serde_json::json!("");
        let vehicle: Vehicle = serde_json::from_value(json).unwrap();

        assert_eq!(vehicle.country_label(), DEFAULT_COUNTRY);
        assert_eq!(vehicle.description_text(), DESCRIPTION_PLACEHOLDER);
        assert_eq!(vehicle.image_url(), "");
        assert_eq!(vehicle.title(), "Toyota Camry");
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let mut json = vehicle_json(serde_json::json!(1));
        json.as_object_mut().unwrap().remove("price");
        assert!(serde_json::from_value::<Vehicle>(json).is_err());
    }

    #[test]
    fn test_selection_from_controls_treats_empty_as_any() {
        let selection = Selection::from_controls("", "2019", SortMode::PriceAsc);
        assert_eq!(selection.brand, None);
        assert_eq!(selection.year.as_deref(), Some("2019"));
        assert!(!selection.is_default());
        assert!(Selection::from_controls("", "", SortMode::None).is_default());
    }

    #[test]
    fn test_sort_mode_parsing() {
        assert_eq!("price-asc".parse::<SortMode>().unwrap(), SortMode::PriceAsc);
        assert_eq!("none".parse::<SortMode>().unwrap(), SortMode::None);
        assert!("cheapest".parse::<SortMode>().is_err());
        assert_eq!(SortMode::PriceDesc.as_str(), "price-desc");
    }
}
