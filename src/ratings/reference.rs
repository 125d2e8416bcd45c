// Built-in reference dataset: 8 movies rated by 8 users on a 0-5 scale.
//
// Used by the CLI when no matrix file is configured, and by the tests as a
// fixed scenario. `None` marks a movie the user hasn't rated.

use anyhow::Result;

use super::matrix::RatingMatrix;

pub const USERS: [&str; 8] = [
    "user_304", "user_388", "user_220", "user_289", "user_628", "user_158", "user_397", "user_37",
];

pub const MOVIES: [u32; 8] = [2273, 1241, 2533, 1717, 230, 4069, 2066, 728];

/// One row per movie, one column per user (same order as `USERS`).
const RATINGS: [[Option<u8>; 8]; 8] = [
    [Some(2), Some(5), Some(1), Some(3), Some(4), Some(3), Some(4), Some(2)],
    [None, Some(3), Some(4), Some(4), Some(5), Some(2), Some(2), Some(3)],
    [Some(1), Some(1), Some(1), Some(4), Some(2), Some(3), Some(1), Some(4)],
    [None, Some(2), None, Some(0), Some(2), Some(3), Some(4), Some(5)],
    [Some(1), None, Some(4), Some(2), Some(4), Some(2), Some(1), Some(4)],
    [Some(4), Some(4), Some(4), Some(5), Some(4), Some(2), Some(1), Some(2)],
    [Some(1), Some(2), Some(1), Some(3), Some(4), Some(1), Some(2), Some(2)],
    [Some(1), Some(2), Some(3), Some(4), Some(3), Some(5), None, Some(2)],
];

/// Build the reference rating matrix.
pub fn reference_matrix() -> Result<RatingMatrix> {
    let items = MOVIES.iter().map(|m| m.to_string()).collect();
    let users = USERS.iter().map(|u| u.to_string()).collect();
    let cells = RATINGS
        .iter()
        .map(|row| row.iter().map(|r| r.map(f64::from)).collect())
        .collect();

    RatingMatrix::new(items, users, cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let m = reference_matrix().unwrap();
        assert_eq!(m.item_count(), 8);
        assert_eq!(m.user_count(), 8);
        assert!(m.validate_range(0.0, 5.0).is_ok());
    }

    #[test]
    fn test_user_304_unrated() {
        let m = reference_matrix().unwrap();
        let u = m.user_position("user_304").unwrap();
        let unrated: Vec<&str> = m
            .unrated_items(u)
            .into_iter()
            .map(|i| m.items()[i].as_str())
            .collect();
        assert_eq!(unrated, vec!["1241", "1717"]);
    }

    #[test]
    fn test_spot_values() {
        let m = reference_matrix().unwrap();
        assert_eq!(m.rating("2273", "user_388").unwrap(), Some(5.0));
        assert_eq!(m.rating("1717", "user_289").unwrap(), Some(0.0));
        assert_eq!(m.rating("728", "user_397").unwrap(), None);
        assert_eq!(m.rating("230", "user_388").unwrap(), None);
    }
}
