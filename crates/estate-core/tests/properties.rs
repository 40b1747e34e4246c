//! Property tests for area filtering and the area list.

use polars::df;
use proptest::prelude::*;

use estate_core::{available_areas, filter_by_area};
use estate_model::{CellValue, Table};

const NAMES: &[&str] = &["Wakad", "wakad", "WAKAD", "Aundh", "Baner", "Viman Nagar"];

fn area_table(areas: &[String]) -> Table {
    let years: Vec<i64> = (0..areas.len()).map(|idx| 2000 + idx as i64).collect();
    let frame = df! {
        "Area" => areas,
        "Year" => years,
    }
    .unwrap();
    Table::from_frame(frame).unwrap()
}

fn area_values(table: &Table) -> Vec<String> {
    table
        .records(usize::MAX)
        .into_iter()
        .map(|record| match record.get("area") {
            Some(CellValue::Text(area)) => area.clone(),
            other => panic!("unexpected area cell {other:?}"),
        })
        .collect()
}

fn areas_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(NAMES).prop_map(str::to_string),
        0..40,
    )
}

proptest! {
    #[test]
    fn filter_keeps_only_matching_rows(areas in areas_strategy(), target in prop::sample::select(NAMES)) {
        let table = area_table(&areas);
        let filtered = filter_by_area(&table, target);

        let expected = areas
            .iter()
            .filter(|area| area.to_lowercase() == target.to_lowercase())
            .count();
        prop_assert_eq!(filtered.height(), expected);
        for area in area_values(&filtered) {
            prop_assert_eq!(area.to_lowercase(), target.to_lowercase());
        }
    }

    #[test]
    fn filter_is_idempotent(areas in areas_strategy(), target in prop::sample::select(NAMES)) {
        let table = area_table(&areas);
        let once = filter_by_area(&table, target);
        let twice = filter_by_area(&once, target);

        prop_assert_eq!(area_values(&once), area_values(&twice));
        prop_assert_eq!(once.column_names(), twice.column_names());
    }

    #[test]
    fn available_areas_are_sorted_and_unique(areas in areas_strategy()) {
        let listed = available_areas(&area_table(&areas));

        prop_assert!(listed.windows(2).all(|pair| pair[0] < pair[1]));
        for area in &areas {
            prop_assert!(listed.contains(area));
        }
    }
}
