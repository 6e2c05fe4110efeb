use crate::domain::model::{Selection, SortMode, Vehicle};
use std::collections::BTreeSet;

/// Filters and sorts the listing for the given selection.
///
/// Brand and year are exact matches (year compared in its string form) and
/// both must hold. Price sorts are stable, so ties keep listing order. The
/// listing itself is never touched.
pub fn derive_view(listing: &[Vehicle], selection: &Selection) -> Vec<Vehicle> {
    let mut view: Vec<Vehicle> = listing
        .iter()
        .filter(|vehicle| matches_selection(vehicle, selection))
        .cloned()
        .collect();

    match selection.sort {
        SortMode::PriceAsc => view.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortMode::PriceDesc => view.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortMode::None => {}
    }

    view
}

pub fn matches_selection(vehicle: &Vehicle, selection: &Selection) -> bool {
    if let Some(brand) = &selection.brand {
        if vehicle.brand != *brand {
            return false;
        }
    }
    if let Some(year) = &selection.year {
        if vehicle.year.to_string() != *year {
            return false;
        }
    }
    true
}

/// Distinct brands in lexicographic order.
pub fn brand_options(listing: &[Vehicle]) -> Vec<String> {
    listing
        .iter()
        .map(|vehicle| vehicle.brand.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct years, newest first.
pub fn year_options(listing: &[Vehicle]) -> Vec<String> {
    listing
        .iter()
        .map(|vehicle| vehicle.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .map(|year| year.to_string())
        .collect()
}

// 重複 id 時取第一筆
pub fn find_vehicle<'a>(listing: &'a [Vehicle], id: &str) -> Option<&'a Vehicle> {
    listing.iter().find(|vehicle| vehicle.id.matches(id))
}
