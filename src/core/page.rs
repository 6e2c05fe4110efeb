use crate::core::render::{
    self, DETAIL_LOAD_ERROR_MESSAGE, DETAIL_MISSING_ID_MESSAGE, DETAIL_NOT_FOUND_MESSAGE,
    GRID_LOAD_ERROR_MESSAGE, ID_PARAM,
};
use crate::core::view;
use crate::domain::model::{Selection, SiteOptions, SortMode, Vehicle};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{CatalogError, Result};

/// First value of `name` in a URL query string. A leading `?` is allowed.
pub fn query_param(query: &str, name: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridState {
    Loading,
    Ready,
    Error,
}

/// One catalog page session: the loaded listing plus the user's selection.
pub struct GridPage {
    state: GridState,
    listing: Vec<Vehicle>,
    selection: Selection,
    brand_options: Vec<String>,
    year_options: Vec<String>,
    visible: Vec<Vehicle>,
    container: String,
    options: SiteOptions,
}

impl GridPage {
    pub fn new(options: SiteOptions) -> Self {
        Self {
            state: GridState::Loading,
            listing: Vec::new(),
            selection: Selection::default(),
            brand_options: Vec::new(),
            year_options: Vec::new(),
            visible: Vec::new(),
            container: String::new(),
            options,
        }
    }

    pub async fn open(source: &dyn CatalogSource, options: SiteOptions) -> Self {
        let mut page = Self::new(options);
        page.load(source).await;
        page
    }

    pub async fn load(&mut self, source: &dyn CatalogSource) {
        match source.load_listing().await {
            Ok(listing) => {
                tracing::info!("Loaded {} vehicles from {}", listing.len(), source.location());
                self.ready(listing);
            }
            Err(e) => {
                tracing::error!("Catalog load from {} failed: {}", source.location(), e);
                self.state = GridState::Error;
                self.container = render::render_message(GRID_LOAD_ERROR_MESSAGE);
            }
        }
    }

    fn ready(&mut self, listing: Vec<Vehicle>) {
        self.brand_options = view::brand_options(&listing);
        self.year_options = view::year_options(&listing);
        self.listing = listing;
        self.selection = Selection::default();
        self.state = GridState::Ready;
        self.refresh();
    }

    pub fn set_brand(&mut self, brand: &str) -> &str {
        let selection = self.selection.clone().with_brand(brand);
        self.apply(selection)
    }

    pub fn set_year(&mut self, year: &str) -> &str {
        let selection = self.selection.clone().with_year(year);
        self.apply(selection)
    }

    pub fn set_sort(&mut self, sort: SortMode) -> &str {
        let selection = self.selection.clone().with_sort(sort);
        self.apply(selection)
    }

    /// Replaces the selection and re-renders the container.
    pub fn apply(&mut self, selection: Selection) -> &str {
        if self.state != GridState::Ready {
            tracing::debug!("Ignoring selection change in {:?} state", self.state);
            return &self.container;
        }
        self.selection = selection;
        self.refresh();
        &self.container
    }

    fn refresh(&mut self) {
        self.visible = view::derive_view(&self.listing, &self.selection);
        tracing::debug!(
            "Selection {:?} matched {} of {} vehicles",
            self.selection,
            self.visible.len(),
            self.listing.len()
        );
        self.container = render::render_grid(&self.visible, &self.options);
    }

    pub fn state(&self) -> GridState {
        self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn listing(&self) -> &[Vehicle] {
        &self.listing
    }

    pub fn visible(&self) -> &[Vehicle] {
        &self.visible
    }

    pub fn brand_options(&self) -> &[String] {
        &self.brand_options
    }

    pub fn year_options(&self) -> &[String] {
        &self.year_options
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Filter controls followed by the `#cars-grid` container.
    pub fn render_surface(&self) -> String {
        let filters = match self.state {
            GridState::Ready => {
                render::render_filters(&self.brand_options, &self.year_options, &self.selection)
            }
            _ => String::new(),
        };
        format!("{}\n<div id=\"cars-grid\">{}</div>\n", filters, self.container)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Shown,
    NotFound,
    MissingParam,
    Error,
}

/// One detail page session, resolved once from the URL query string.
pub struct DetailPage {
    state: DetailState,
    requested_id: Option<String>,
    vehicle: Option<Vehicle>,
    error: Option<CatalogError>,
    container: String,
}

impl DetailPage {
    pub async fn open(source: &dyn CatalogSource, query: &str, options: &SiteOptions) -> Self {
        let requested_id = query_param(query, ID_PARAM).filter(|id| !id.is_empty());
        let outcome = Self::resolve(source, requested_id.as_deref()).await;

        let mut page = Self {
            state: DetailState::Loading,
            requested_id,
            vehicle: None,
            error: None,
            container: String::new(),
        };

        match outcome {
            Ok(vehicle) => {
                tracing::debug!("Showing vehicle {}", vehicle.id);
                page.container = render::render_detail(&vehicle, options);
                page.vehicle = Some(vehicle);
                page.state = DetailState::Shown;
            }
            Err(e) => {
                let (state, message) = match &e {
                    CatalogError::MissingParameter { .. } => {
                        (DetailState::MissingParam, DETAIL_MISSING_ID_MESSAGE)
                    }
                    CatalogError::NotFound { .. } => {
                        (DetailState::NotFound, DETAIL_NOT_FOUND_MESSAGE)
                    }
                    _ => (DetailState::Error, DETAIL_LOAD_ERROR_MESSAGE),
                };
                if e.is_load_failure() {
                    tracing::error!("Catalog load from {} failed: {}", source.location(), e);
                } else {
                    tracing::info!("Car page for query '{}': {}", query, e);
                }
                page.state = state;
                page.container = render::render_message(message);
                page.error = Some(e);
            }
        }

        page
    }

    /// 沒有 id 就不載入清單；重複的 id 取第一筆
    async fn resolve(source: &dyn CatalogSource, requested_id: Option<&str>) -> Result<Vehicle> {
        let id = requested_id.ok_or_else(|| CatalogError::MissingParameter {
            name: ID_PARAM.to_string(),
        })?;
        let listing = source.load_listing().await?;
        view::find_vehicle(&listing, id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
    }

    pub fn state(&self) -> DetailState {
        self.state
    }

    pub fn requested_id(&self) -> Option<&str> {
        self.requested_id.as_deref()
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    /// Why the page shows a message instead of a vehicle.
    pub fn error(&self) -> Option<&CatalogError> {
        self.error.as_ref()
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn render_surface(&self) -> String {
        format!("<div id=\"car-container\">{}</div>\n", self.container)
    }
}
