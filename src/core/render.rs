//! HTML rendering for the catalog grid and the single-vehicle page.
//!
//! Every function here is a pure projection of its input: the same records
//! and options always give the same markup.

use crate::domain::model::{Selection, SiteOptions, SortMode, Vehicle};

pub const ID_PARAM: &str = "id";

pub const GRID_EMPTY_MESSAGE: &str = "Нет автомобилей по выбранным параметрам.";
pub const GRID_LOAD_ERROR_MESSAGE: &str = "Ошибка загрузки каталога. Попробуйте позже.";
pub const DETAIL_MISSING_ID_MESSAGE: &str = "Не указан ID автомобиля.";
pub const DETAIL_NOT_FOUND_MESSAGE: &str = "Автомобиль не найден.";
pub const DETAIL_LOAD_ERROR_MESSAGE: &str = "Ошибка загрузки данных об автомобиле.";
pub const PRICE_NOTE: &str =
    "Ориентировочная цена продажи, возможен пересчёт с учётом курса и налогов.";

const DISTANCE_UNIT: &str = "mi";

pub fn render_message(text: &str) -> String {
    format!("<p>{}</p>", escape_html(text))
}

pub fn render_grid(records: &[Vehicle], options: &SiteOptions) -> String {
    if records.is_empty() {
        return render_message(GRID_EMPTY_MESSAGE);
    }

    records
        .iter()
        .map(|vehicle| render_card(vehicle, options))
        .collect()
}

fn render_card(vehicle: &Vehicle, options: &SiteOptions) -> String {
    format!(
        r#"
    <article class="car-card">
      <div class="car-img">
        <div class="car-img-inner" style="background-image:url('{image}')"></div>
      </div>
      <div class="car-body">
        <h3 class="car-title">{title}</h3>
        <div class="car-badge">{year} • {odometer} {unit} • {engine}</div>
        <div class="car-specs">{location} • {status}</div>
        <div class="car-price-row">
          <div class="car-price">{price}</div>
          <div class="car-location">{country}</div>
        </div>
      </div>
      <div class="car-footer">
        <a class="btn btn-outline" href="{href}">Подробнее</a>
        <span class="link-small">VIN: {vin}</span>
      </div>
    </article>
  "#,
        image = escape_html(&css_url_value(vehicle.image_url())),
        title = escape_html(&vehicle.title()),
        year = vehicle.year,
        odometer = format_thousands(vehicle.odometer),
        unit = DISTANCE_UNIT,
        engine = escape_html(&vehicle.engine),
        location = escape_html(&vehicle.location),
        status = escape_html(&vehicle.status),
        price = format_price(vehicle.price),
        country = escape_html(vehicle.country_label()),
        href = escape_html(&detail_href(vehicle, options)),
        vin = escape_html(&vehicle.vin),
    )
}

/// Link from a grid card to the detail page, `car.html?id=<escaped id>`.
pub fn detail_href(vehicle: &Vehicle, options: &SiteOptions) -> String {
    format!(
        "{}?{}={}",
        options.detail_page,
        ID_PARAM,
        encode_query_value(vehicle.id.as_str())
    )
}

pub fn render_detail(vehicle: &Vehicle, options: &SiteOptions) -> String {
    let odometer = format_thousands(vehicle.odometer);
    let engine = escape_html(&vehicle.engine);
    let drive = escape_html(&vehicle.drive);

    format!(
        r#"
    <div class="car-layout">
      <div>
        <div class="car-hero">
          <div class="car-hero-main" style="background-image:url('{image}')"></div>
          <div class="car-hero-meta">
            {year} • {odometer} {unit} • {engine} • {drive}
          </div>
        </div>
        <div class="car-panel">
          <h2>Описание</h2>
          <p>{description}</p>
        </div>
      </div>
      <aside class="car-panel">
        <h2>{title}</h2>
        <div class="price-big">{price}</div>
        <div class="price-note">{note}</div>

        <ul class="list">
          <li><strong>Год:</strong> {year}</li>
          <li><strong>Пробег:</strong> {odometer} {unit}</li>
          <li><strong>Двигатель:</strong> {engine}</li>
          <li><strong>Привод:</strong> {drive}</li>
          <li><strong>Расположение:</strong> {location}</li>
          <li><strong>Статус:</strong> {status}</li>
          <li><strong>VIN:</strong> {vin}</li>
        </ul>

        <div class="contacts">
          <p><strong>Связаться по этому авто:</strong></p>
          <p>Телефон: <a href="{phone_href}">{phone_label}</a></p>
          <p>WhatsApp / Telegram: <a href="{messenger_href}" target="_blank">{messenger_label}</a></p>
        </div>

        <div style="margin-top:16px;">
          <a class="btn btn-primary" href="{grid_page}">← Вернуться к каталогу</a>
        </div>
      </aside>
    </div>
  "#,
        image = escape_html(&css_url_value(vehicle.image_url())),
        year = vehicle.year,
        odometer = odometer,
        unit = DISTANCE_UNIT,
        engine = engine,
        drive = drive,
        description = escape_html(vehicle.description_text()),
        title = escape_html(&vehicle.title()),
        price = format_price(vehicle.price),
        note = PRICE_NOTE,
        location = escape_html(&vehicle.location),
        status = escape_html(&vehicle.status),
        vin = escape_html(&vehicle.vin),
        phone_href = escape_html(&options.phone_href),
        phone_label = escape_html(&options.phone_label),
        messenger_href = escape_html(&options.messenger_href),
        messenger_label = escape_html(&options.messenger_label),
        grid_page = escape_html(&options.grid_page),
    )
}

/// Brand, year and sort controls with the current selection marked.
pub fn render_filters(brands: &[String], years: &[String], selection: &Selection) -> String {
    let sort_options = [
        (SortMode::None, "Без сортировки"),
        (SortMode::PriceAsc, "Сначала дешевле"),
        (SortMode::PriceDesc, "Сначала дороже"),
    ];

    let mut sort_markup = String::new();
    for (mode, label) in sort_options {
        sort_markup.push_str(&render_option(mode.as_str(), label, selection.sort == mode));
    }

    format!(
        r#"<div class="filters">
  <select id="filter-brand">{brands}</select>
  <select id="filter-year">{years}</select>
  <select id="sort-price">{sort}</select>
</div>"#,
        brands = render_select_options("Все марки", brands, selection.brand.as_deref()),
        years = render_select_options("Все годы", years, selection.year.as_deref()),
        sort = sort_markup,
    )
}

fn render_select_options(any_label: &str, values: &[String], current: Option<&str>) -> String {
    let mut markup = render_option("", any_label, current.is_none());
    for value in values {
        markup.push_str(&render_option(value, value, current == Some(value.as_str())));
    }
    markup
}

fn render_option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label)
    )
}

/// en-US digit grouping: `1234567` -> `1,234,567`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Whole dollars with grouping, e.g. `$25,000`.
pub fn format_price(price: f64) -> String {
    let rounded = price.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("${}{}", sign, format_thousands(rounded.abs() as u64))
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// 放進 `url('...')` 之前先把會結束 CSS 字串的字元改成百分比編碼
pub fn css_url_value(url: &str) -> String {
    url.replace('\\', "%5C")
        .replace('\'', "%27")
        .replace('"', "%22")
        .replace('(', "%28")
        .replace(')', "%29")
}

pub fn encode_query_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
