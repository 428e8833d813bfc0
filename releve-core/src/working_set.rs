//! In-memory batch of parsed rows awaiting operator classification.
//!
//! Rows are edited one at a time, by index, through explicit commands; the
//! persistent store is only touched once a commit attempt validates.

use serde::{Deserialize, Serialize};

use crate::taxonomy::Taxonomy;
use crate::transaction::Transaction;

/// One edit applied to one row of the working set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    /// Select a category. An empty string clears both classification
    /// fields. A previously chosen sub-category is kept when still allowed
    /// under the new category, cleared otherwise.
    Category(String),
    /// Select a sub-category from the chosen category's allowed set.
    SubCategory(String),
    /// Flag or unflag the row as excluded from the final commit.
    Ignore(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("row {0} is out of bounds")]
    RowOutOfBounds(usize),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("row {0} has no category selected yet")]
    NoCategorySelected(usize),
    #[error("sub-category {sub:?} is not allowed under category {category:?}")]
    SubCategoryNotAllowed { category: String, sub: String },
}

/// Commit refused: these row indices still lack a category or sub-category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} row(s) still uncategorized", .rows.len())]
pub struct IncompleteBatch {
    pub rows: Vec<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkingSet {
    rows: Vec<Transaction>,
}

impl WorkingSet {
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    /// Apply one field edit to one row. Editing a row never affects the
    /// others.
    pub fn set_field(
        &mut self,
        index: usize,
        edit: FieldEdit,
        taxonomy: &Taxonomy,
    ) -> Result<(), EditError> {
        let row = self
            .rows
            .get_mut(index)
            .ok_or(EditError::RowOutOfBounds(index))?;

        match edit {
            FieldEdit::Category(category) => {
                if category.is_empty() {
                    row.category.clear();
                    row.sub_category.clear();
                    return Ok(());
                }
                if !taxonomy.contains(&category) {
                    return Err(EditError::UnknownCategory(category));
                }
                if !row.sub_category.is_empty() && !taxonomy.allows(&category, &row.sub_category) {
                    row.sub_category.clear();
                }
                row.category = category;
            }
            FieldEdit::SubCategory(sub) => {
                if row.category.is_empty() {
                    return Err(EditError::NoCategorySelected(index));
                }
                if !taxonomy.allows(&row.category, &sub) {
                    return Err(EditError::SubCategoryNotAllowed {
                        category: row.category.clone(),
                        sub,
                    });
                }
                row.sub_category = sub;
            }
            FieldEdit::Ignore(flag) => {
                row.to_ignore = flag;
            }
        }
        Ok(())
    }

    /// Rows a commit would persist: `To Ignore` rows filtered out, every
    /// remaining row fully classified.
    ///
    /// Refusal carries the offending working-set indices and leaves the set
    /// untouched, so the operator can fix and retry. The caller persists
    /// the returned rows and only then calls [`WorkingSet::clear`].
    pub fn commit_candidates(&self) -> Result<Vec<Transaction>, IncompleteBatch> {
        let missing: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.to_ignore && !row.is_classified())
            .map(|(i, _)| i)
            .collect();
        if !missing.is_empty() {
            return Err(IncompleteBatch { rows: missing });
        }
        Ok(self
            .rows
            .iter()
            .filter(|row| !row.to_ignore)
            .cloned()
            .collect())
    }

    /// Discard the batch after a successful write.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
