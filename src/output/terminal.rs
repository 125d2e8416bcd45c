// Colored terminal output for predictions, rankings and matrices.
//
// All terminal-specific formatting lives here. main.rs only decides what
// to show and delegates the drawing.

use colored::Colorize;

use super::format_score;
use crate::predict::Prediction;
use crate::ratings::RatingMatrix;
use crate::recommend::Recommendation;
use crate::similarity::{Metric, SimilarityMatrix};

/// Display a single predicted rating.
pub fn display_prediction(prediction: &Prediction) {
    let score = format_score(prediction.score, 4);
    let score = if prediction.score.is_some() {
        score.bold()
    } else {
        score.dimmed()
    };
    println!(
        "  {:<8} {} on item {}: {}  {}",
        prediction.method.to_string().cyan(),
        prediction.user,
        prediction.item,
        score,
        format!("({} raters)", prediction.raters).dimmed()
    );
}

/// Display a ranked recommendation list.
pub fn display_recommendations(user: &str, method: Metric, ranked: &[Recommendation]) {
    println!(
        "\n{}",
        format!("=== Top {} for {user} ({method}) ===", ranked.len()).bold()
    );

    if ranked.is_empty() {
        println!("  Nothing to recommend: {user} has rated every item.");
        return;
    }

    println!("  {:>4}  {:<12} {:>8}", "Rank".dimmed(), "Item".dimmed(), "Score".dimmed());
    println!("  {}", "-".repeat(28).dimmed());

    for (i, rec) in ranked.iter().enumerate() {
        let score = format_score(rec.score, 4);
        let score = if rec.score.is_some() {
            score.normal()
        } else {
            score.dimmed()
        };
        println!("  {:>4}. {:<12} {:>8}", i + 1, rec.item, score);
    }
}

/// Display the full user x user similarity matrix.
pub fn display_similarity(similarity: &SimilarityMatrix) {
    let users = similarity.users();
    println!(
        "\n{}",
        format!(
            "=== {} similarity ({} users, {} imputation) ===",
            similarity.metric(),
            users.len(),
            similarity.options().imputation
        )
        .bold()
    );

    print!("  {:<10}", "");
    for u in users {
        print!(" {:>9}", short(u).dimmed());
    }
    println!();

    for (a, user) in users.iter().enumerate() {
        print!("  {:<10}", short(user));
        for (b, score) in similarity.row(a).iter().enumerate() {
            let cell = format_score(*score, 3);
            let cell = match score {
                None => cell.dimmed(),
                Some(_) if a == b => cell.dimmed(),
                Some(s) if *s < 0.0 => cell.red(),
                Some(_) => cell.normal(),
            };
            print!(" {:>9}", cell);
        }
        println!();
    }
}

/// Display the rating matrix, with missing ratings marked.
pub fn display_ratings(ratings: &RatingMatrix) {
    println!(
        "\n{}",
        format!(
            "=== Ratings ({} items x {} users) ===",
            ratings.item_count(),
            ratings.user_count()
        )
        .bold()
    );

    print!("  {:<8}", "item".dimmed());
    for u in ratings.users() {
        print!(" {:>9}", short(u).dimmed());
    }
    println!();

    for (i, item) in ratings.items().iter().enumerate() {
        print!("  {:<8}", item);
        for u in 0..ratings.user_count() {
            match ratings.get(i, u) {
                Some(r) => print!(" {:>9}", r),
                None => print!(" {:>9}", "-".dimmed()),
            }
        }
        println!();
    }
}

/// Trim long identifiers so table columns stay aligned.
fn short(id: &str) -> String {
    const MAX: usize = 9;
    if id.chars().count() <= MAX {
        id.to_string()
    } else {
        id.chars().take(MAX - 1).chain(std::iter::once('~')).collect()
    }
}
