/// Filtering and Aggregation Example
///
/// This example demonstrates:
/// - Materializing a games table
/// - Applying search + metacritic filter criteria
/// - Reading the summary metrics and both chart projections

use gamelake::{FilterCriteria, FilteredView, GameRecord, GameTable, ReleaseDate};

fn game(name: &str, rating: f64, metacritic: i32, released: &str, playtime: f64) -> GameRecord {
    GameRecord {
        name: name.to_string(),
        rating,
        metacritic,
        released: ReleaseDate::parse(released).unwrap(),
        playtime,
    }
}

fn main() {
    println!("=== GameLake Filtering Example ===\n");

    // 1. Materialize a table
    println!("1. Materializing table...");
    let table = GameTable::new(vec![
        game("Halo", 4.5, 90, "2001-11-15", 10.0),
        game("Halo 2", 4.0, 85, "2004-11-09", 12.0),
        game("Portal", 4.7, 90, "2007-10-10", 8.0),
        game("Minesweeper", 3.1, 62, "1990-10-08", 50.0),
        game("Doom", 4.5, 95, "1993-12-10", 15.0),
    ]);
    println!("   Table holds {} games\n", table.len());

    // 2. Apply filter criteria
    println!("2. Filtering: search='halo', metacritic in [80, 100]...");
    let view = FilteredView::new(&table, &FilterCriteria::new("halo", 80, 100));
    println!("   {} games match\n", view.len());

    // 3. Summary metrics
    println!("3. Summary metrics...");
    let summary = view.summary();
    println!("   Total Games:    {}", summary.count);
    if let Some(rating) = summary.mean_rating {
        println!("   Avg Rating:     {:.2}", rating);
    }
    if let Some(metacritic) = summary.mean_metacritic {
        println!("   Avg Metacritic: {:.0}", metacritic);
    }
    if let Some(playtime) = summary.mean_playtime {
        println!("   Avg Playtime:   {:.1}h", playtime);
    }
    println!();

    // 4. Chart projections
    println!("4. Top games by rating...");
    for record in view.top_by_rating(10) {
        println!("   {:<12} {:.1}", record.name, record.rating);
    }
    println!();

    println!("5. Metacritic over release dates...");
    for record in view.release_trend() {
        println!("   {} {:>3}", record.released, record.metacritic);
    }
}
