use crate::core::loader::DEFAULT_CATALOG_LOCATION;
use crate::domain::model::{Selection, SiteOptions};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub site: SiteConfig,
    pub source: SourceConfig,
    pub selection: Option<SelectionConfig>,
    pub contacts: Option<ContactsConfig>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub page: String,
    pub grid_page: Option<String>,
    pub detail_page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub brand: Option<String>,
    pub year: Option<String>,
    pub sort: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactsConfig {
    pub phone_href: Option<String>,
    pub phone_label: Option<String>,
    pub messenger_href: Option<String>,
    pub messenger_label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_source_location("source.location", self.catalog_location())?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_page_marker("site.page", &self.site.page)?;

        if let Some(grid_page) = &self.site.grid_page {
            validation::validate_non_empty_string("site.grid_page", grid_page)?;
        }
        if let Some(detail_page) = &self.site.detail_page {
            validation::validate_non_empty_string("site.detail_page", detail_page)?;
        }
        if let Some(sort) = self.selection.as_ref().and_then(|s| s.sort.as_deref()) {
            validation::validate_sort_mode("selection.sort", sort)?;
        }

        Ok(())
    }

    pub fn catalog_location(&self) -> &str {
        self.source
            .location
            .as_deref()
            .unwrap_or(DEFAULT_CATALOG_LOCATION)
    }

    fn selection_config(&self) -> SelectionConfig {
        self.selection.clone().unwrap_or_default()
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_source(&self) -> &str {
        self.catalog_location()
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn page_marker(&self) -> &str {
        &self.site.page
    }

    fn selection(&self) -> Selection {
        let config = self.selection_config();
        // 排序值已在 validate_config 檢查過，這裡無法解析時退回不排序
        let sort = config
            .sort
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        Selection::from_controls(
            config.brand.as_deref().unwrap_or(""),
            config.year.as_deref().unwrap_or(""),
            sort,
        )
    }

    fn query(&self) -> &str {
        self.selection
            .as_ref()
            .and_then(|s| s.query.as_deref())
            .unwrap_or("")
    }

    fn site_options(&self) -> SiteOptions {
        let mut options = SiteOptions::default();
        if let Some(grid_page) = &self.site.grid_page {
            options.grid_page = grid_page.clone();
        }
        if let Some(detail_page) = &self.site.detail_page {
            options.detail_page = detail_page.clone();
        }
        if let Some(contacts) = &self.contacts {
            if let Some(v) = &contacts.phone_href {
                options.phone_href = v.clone();
            }
            if let Some(v) = &contacts.phone_label {
                options.phone_label = v.clone();
            }
            if let Some(v) = &contacts.messenger_href {
                options.messenger_href = v.clone();
            }
            if let Some(v) = &contacts.messenger_label {
                options.messenger_label = v.clone();
            }
        }
        options
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SortMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[site]
page = "catalog"

[source]
location = "https://cars.example.com/data/cars.json"

[selection]
brand = "Toyota"
sort = "price-asc"

[output]
path = "./site"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.catalog_source(), "https://cars.example.com/data/cars.json");
        assert_eq!(config.page_marker(), "catalog");
        let selection = config.selection();
        assert_eq!(selection.brand.as_deref(), Some("Toyota"));
        assert_eq!(selection.sort, SortMode::PriceAsc);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_sections_are_missing() {
        let toml_content = r#"
[site]
page = "car"

[source]

[output]
path = "./site"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.catalog_source(), DEFAULT_CATALOG_LOCATION);
        assert_eq!(config.query(), "");
        assert!(config.selection().is_default());
        assert_eq!(config.site_options(), SiteOptions::default());
    }

    #[test]
    fn test_site_and_contact_overrides() {
        let toml_content = r#"
[site]
page = "car"
grid_page = "index.html"
detail_page = "vehicle.html"

[source]
location = "data/cars.json"

[selection]
query = "?id=42"

[contacts]
phone_href = "tel:+995555123456"
phone_label = "+995 555 12 34 56"

[output]
path = "./site"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let options = config.site_options();

        assert_eq!(options.grid_page, "index.html");
        assert_eq!(options.detail_page, "vehicle.html");
        assert_eq!(options.phone_href, "tel:+995555123456");
        assert_eq!(options.messenger_label, "@your_telegram");
        assert_eq!(config.query(), "?id=42");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_CATALOG_URL", "https://test.cars.com/cars.json");

        let toml_content = r#"
[site]
page = "catalog"

[source]
location = "${TEST_CATALOG_URL}"

[output]
path = "./output"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.catalog_source(), "https://test.cars.com/cars.json");

        std::env::remove_var("TEST_CATALOG_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_page = r#"
[site]
page = "home"

[source]

[output]
path = "./output"
"#;
        let config = TomlConfig::from_toml_str(bad_page).unwrap();
        assert!(config.validate().is_err());

        let bad_source = r#"
[site]
page = "catalog"

[source]
location = "ftp://cars.example.com/cars.json"

[output]
path = "./output"
"#;
        let config = TomlConfig::from_toml_str(bad_source).unwrap();
        assert!(config.validate().is_err());

        let bad_sort = r#"
[site]
page = "catalog"

[source]

[selection]
sort = "mileage"

[output]
path = "./output"
"#;
        let config = TomlConfig::from_toml_str(bad_sort).unwrap();
        assert!(config.validate().is_err());
        assert!(config.selection().is_default());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[site]
page = "catalog"

[source]
location = "data/cars.json"

[output]
path = "./output"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.site.page, "catalog");
    }
}
