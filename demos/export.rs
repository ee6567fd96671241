/// Dataset Export Example
///
/// This example demonstrates exporting a filtered view as CSV and JSON,
/// the same payloads the dashboard's export endpoint serves.

use gamelake::{records_to_csv, records_to_json, FilterCriteria, FilteredView, GameRecord,
    GameTable, ReleaseDate};

fn main() {
    let table = GameTable::new(vec![
        GameRecord {
            name: "Halo".to_string(),
            rating: 4.5,
            metacritic: 90,
            released: ReleaseDate::parse("2001-11-15").unwrap(),
            playtime: 10.0,
        },
        GameRecord {
            name: "Worms, Armageddon".to_string(),
            rating: 4.2,
            metacritic: 88,
            released: ReleaseDate::parse("1999-05-31").unwrap(),
            playtime: 30.0,
        },
    ]);

    let view = FilteredView::new(&table, &FilterCriteria::all());

    println!("--- CSV ---");
    print!("{}", records_to_csv(view.records()));

    println!("\n--- JSON ---");
    match records_to_json(view.records()) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("export failed: {}", err),
    }
}
