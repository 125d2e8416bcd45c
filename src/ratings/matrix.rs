// The rating matrix: items on the row axis, users on the column axis.
//
// Every cell is an Option<f64>. `None` means "not rated", which is never the
// same thing as a rating of zero. Imputation only happens later, when the
// similarity engine builds user vectors, and it's an explicit choice there.

use std::collections::HashMap;

use anyhow::Result;

use crate::error::LookupError;

/// A dense item x user grid of optional ratings with identifier lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingMatrix {
    items: Vec<String>,
    users: Vec<String>,
    item_index: HashMap<String, usize>,
    user_index: HashMap<String, usize>,
    /// Row-major: `cells[item][user]`
    cells: Vec<Vec<Option<f64>>>,
}

impl RatingMatrix {
    /// Build a matrix from item ids, user ids, and one row of ratings per item.
    ///
    /// Fails on duplicate identifiers, rows whose width doesn't match the
    /// user count, or non-finite ratings.
    pub fn new(
        items: Vec<String>,
        users: Vec<String>,
        cells: Vec<Vec<Option<f64>>>,
    ) -> Result<Self> {
        let item_index = index_of(&items, "item")?;
        let user_index = index_of(&users, "user")?;

        if cells.len() != items.len() {
            anyhow::bail!(
                "rating matrix has {} item ids but {} rows",
                items.len(),
                cells.len()
            );
        }

        for (item, row) in items.iter().zip(&cells) {
            if row.len() != users.len() {
                anyhow::bail!(
                    "row for item {item} has {} ratings, expected {} (one per user)",
                    row.len(),
                    users.len()
                );
            }
            if let Some(bad) = row.iter().flatten().find(|r| !r.is_finite()) {
                anyhow::bail!("row for item {item} contains a non-finite rating: {bad}");
            }
        }

        Ok(Self {
            items,
            users,
            item_index,
            user_index,
            cells,
        })
    }

    /// Check that every observed rating lies within `[min, max]`.
    pub fn validate_range(&self, min: f64, max: f64) -> Result<()> {
        for (i, row) in self.cells.iter().enumerate() {
            for (u, cell) in row.iter().enumerate() {
                if let Some(r) = cell {
                    if *r < min || *r > max {
                        anyhow::bail!(
                            "rating {r} by {} for item {} is outside [{min}, {max}]",
                            self.users[u],
                            self.items[i]
                        );
                    }
                }
            }
        }
        Ok(())
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Row position of an item identifier.
    pub fn item_position(&self, item: &str) -> Result<usize, LookupError> {
        self.item_index
            .get(item)
            .copied()
            .ok_or_else(|| LookupError::UnknownItem(item.to_string()))
    }

    /// Column position of a user identifier.
    pub fn user_position(&self, user: &str) -> Result<usize, LookupError> {
        self.user_index
            .get(user)
            .copied()
            .ok_or_else(|| LookupError::UnknownUser(user.to_string()))
    }

    /// The rating `user` gave `item`, or `None` if they haven't rated it.
    pub fn rating(&self, item: &str, user: &str) -> Result<Option<f64>, LookupError> {
        let i = self.item_position(item)?;
        let u = self.user_position(user)?;
        Ok(self.cells[i][u])
    }

    /// Positional access. Panics on out-of-range positions.
    pub fn get(&self, item: usize, user: usize) -> Option<f64> {
        self.cells[item][user]
    }

    /// A user's ratings across all items, in item order.
    pub fn user_column(&self, user: usize) -> Vec<Option<f64>> {
        self.cells.iter().map(|row| row[user]).collect()
    }

    /// Users who rated an item, with their ratings, in user order.
    pub fn raters(&self, item: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.cells[item]
            .iter()
            .enumerate()
            .filter_map(|(u, cell)| cell.map(|r| (u, r)))
    }

    /// Item positions the user has not rated, in item order.
    pub fn unrated_items(&self, user: usize) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, row)| row[user].is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of items the user has rated.
    pub fn rated_count(&self, user: usize) -> usize {
        self.cells.iter().filter(|row| row[user].is_some()).count()
    }

    /// Overwrite one cell, returning the previous value.
    ///
    /// Anything derived from this matrix (a similarity matrix in particular)
    /// is stale afterwards and must be recomputed.
    pub fn set_rating(
        &mut self,
        item: &str,
        user: &str,
        rating: Option<f64>,
    ) -> Result<Option<f64>> {
        if let Some(r) = rating {
            if !r.is_finite() {
                anyhow::bail!("rating must be finite, got {r}");
            }
        }
        let i = self.item_position(item)?;
        let u = self.user_position(user)?;
        Ok(std::mem::replace(&mut self.cells[i][u], rating))
    }
}

fn index_of(ids: &[String], axis: &str) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(ids.len());
    for (pos, id) in ids.iter().enumerate() {
        if index.insert(id.clone(), pos).is_some() {
            anyhow::bail!("duplicate {axis} identifier: {id}");
        }
    }
    Ok(index)
}
