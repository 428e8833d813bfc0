//! Category resolver: loads the two-level budget taxonomy from the store.
//!
//! The budget source exposes two logical tables: a flat list of category
//! names and a detail table mapping each category to its observed
//! sub-category descriptions. Loaded fresh per session; never written.

use releve_core::taxonomy::Taxonomy;

use crate::codec;
use crate::layout;
use crate::object_store::{ObjectStore, StoreError};

/// Header of the flat category list object.
const CATEGORY_COLUMN: &str = "Recherche catégorie budget";
/// Headers of the detail object.
const DETAIL_CATEGORY_COLUMN: &str = "Catégorie";
const DETAIL_DESCRIPTION_COLUMN: &str = "Description";

/// Read both budget objects and build the taxonomy.
pub fn load_taxonomy(store: &dyn ObjectStore, bucket: &str) -> Result<Taxonomy, StoreError> {
    let categories = read_categories(store, bucket)?;
    let details = read_details(store, bucket)?;
    Ok(Taxonomy::resolve(categories, &details))
}

fn read_categories(store: &dyn ObjectStore, bucket: &str) -> Result<Vec<String>, StoreError> {
    let key = layout::BUDGET_CATEGORIES_KEY;
    let (header, rows) = codec::decode(&store.get(bucket, key)?)?;
    let idx = column(&header, CATEGORY_COLUMN, bucket, key)?;
    Ok(rows
        .iter()
        .filter_map(|row| row.get(idx))
        .map(|cell| cell.trim().to_string())
        .filter(|cell| !cell.is_empty())
        .collect())
}

fn read_details(
    store: &dyn ObjectStore,
    bucket: &str,
) -> Result<Vec<(String, String)>, StoreError> {
    let key = layout::BUDGET_DETAILS_KEY;
    let (header, rows) = codec::decode(&store.get(bucket, key)?)?;
    let cat_idx = column(&header, DETAIL_CATEGORY_COLUMN, bucket, key)?;
    let desc_idx = column(&header, DETAIL_DESCRIPTION_COLUMN, bucket, key)?;
    Ok(rows
        .iter()
        .map(|row| {
            (
                row.get(cat_idx).map(|c| c.trim()).unwrap_or("").to_string(),
                row.get(desc_idx).map(|c| c.trim()).unwrap_or("").to_string(),
            )
        })
        .filter(|(category, description)| !category.is_empty() && !description.is_empty())
        .collect())
}

fn column(header: &[String], name: &str, bucket: &str, key: &str) -> Result<usize, StoreError> {
    header
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| StoreError::Malformed {
            bucket: bucket.to_string(),
            key: key.to_string(),
            reason: format!("missing column {name:?}"),
        })
}
