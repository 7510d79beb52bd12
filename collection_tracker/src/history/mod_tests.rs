use super::*;
use mtgo_common::Rarity;

fn point(quantity: Option<u16>, goatbots: Option<f32>, scryfall: Option<f32>) -> PricePoint {
    PricePoint {
        quantity,
        goatbots_price: goatbots,
        scryfall_price: scryfall,
    }
}

fn snapshot_card(id: u32, quantity: u16, goatbots: f32, scryfall: Option<f32>) -> CardHistory {
    CardHistory {
        id,
        quantity: quantity.to_string(),
        name: format!("Card {id}"),
        set: "ONE".to_string(),
        rarity: Rarity::Rare,
        foil: false,
        price_history: vec![point(Some(quantity), Some(goatbots), scryfall)],
    }
}

fn single_column_history(cards: Vec<CardHistory>) -> CollectionHistory {
    CollectionHistory::from_card_histories(vec!["2023-11-06T083944Z".to_string()], cards)
}

mod from_card_histories_tests {
    use super::*;

    #[test]
    fn recovers_newest_quantity_from_last_recorded_column() {
        let mut card = snapshot_card(10, 4, 0.5, None);
        card.price_history = vec![
            point(Some(4), Some(0.5), None),
            point(None, Some(0.6), None),
            point(Some(2), Some(0.7), None),
            point(None, Some(0.8), None),
        ];

        let history = CollectionHistory::from_card_histories(
            (0..4).map(|i| format!("ts{i}")).collect(),
            vec![card],
        );

        assert_eq!(history.entries[0].newest_quantity, 2);
    }

    #[test]
    fn no_recorded_quantity_means_zero() {
        let mut card = snapshot_card(10, 4, 0.5, None);
        card.price_history = vec![point(None, Some(0.5), None)];

        let history = single_column_history(vec![card]);
        assert_eq!(history.entries[0].newest_quantity, 0);
    }
}

mod add_snapshot_tests {
    use super::*;

    #[test]
    fn unchanged_quantity_is_elided() {
        let mut history = single_column_history(vec![snapshot_card(10, 4, 0.5, Some(0.4))]);

        history.add_snapshot(
            "2023-11-07T083944Z".to_string(),
            vec![snapshot_card(10, 4, 0.55, Some(0.44))],
        );

        let points = &history.entries[0].card_history.price_history;
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], point(None, Some(0.55), Some(0.44)));
        assert_eq!(history.entries[0].newest_quantity, 4);
    }

    #[test]
    fn changed_quantity_is_recorded() {
        let mut history = single_column_history(vec![snapshot_card(10, 4, 0.5, None)]);

        history.add_snapshot(
            "2023-11-07T083944Z".to_string(),
            vec![snapshot_card(10, 9, 0.5, None)],
        );

        let entry = &history.entries[0];
        assert_eq!(
            entry.card_history.price_history[1],
            point(Some(9), Some(0.5), None)
        );
        assert_eq!(entry.newest_quantity, 9);
    }

    #[test]
    fn departed_card_gets_explicit_zero() {
        let mut history = single_column_history(vec![
            snapshot_card(10, 4, 0.5, None),
            snapshot_card(20, 1, 2.0, None),
        ]);

        history.add_snapshot(
            "2023-11-07T083944Z".to_string(),
            vec![snapshot_card(20, 1, 2.1, None)],
        );

        let departed = &history.entries[0];
        assert_eq!(departed.card_history.id, 10);
        assert_eq!(
            departed.card_history.price_history[1],
            point(Some(0), None, None)
        );
        assert_eq!(departed.newest_quantity, 0);
    }

    #[test]
    fn new_card_is_prefix_padded() {
        let mut history = single_column_history(vec![snapshot_card(10, 4, 0.5, None)]);

        history.add_snapshot(
            "2023-11-07T083944Z".to_string(),
            vec![
                snapshot_card(10, 4, 0.5, None),
                snapshot_card(30, 2, 1.5, Some(1.2)),
            ],
        );

        let newcomer = history
            .entries
            .iter()
            .find(|e| e.card_history.id == 30)
            .unwrap();
        assert_eq!(newcomer.card_history.price_history.len(), 2);
        assert_eq!(newcomer.card_history.price_history[0], PricePoint::default());
        assert_eq!(
            newcomer.card_history.price_history[1],
            point(Some(2), Some(1.5), Some(1.2))
        );
        assert_eq!(newcomer.newest_quantity, 2);
    }

    #[test]
    fn new_card_arriving_before_all_tracked_ids() {
        let mut history = single_column_history(vec![snapshot_card(10, 4, 0.5, None)]);

        history.add_snapshot(
            "2023-11-07T083944Z".to_string(),
            vec![
                snapshot_card(5, 1, 0.1, None),
                snapshot_card(10, 4, 0.5, None),
            ],
        );

        assert_eq!(history.size(), 2);
        let newcomer = history
            .entries
            .iter()
            .find(|e| e.card_history.id == 5)
            .unwrap();
        assert_eq!(newcomer.card_history.price_history.len(), 2);
        assert_eq!(newcomer.card_history.price_history[0], PricePoint::default());
    }

    #[test]
    fn every_row_spans_every_timestamp() {
        let mut history = single_column_history(vec![
            snapshot_card(10, 4, 0.5, None),
            snapshot_card(20, 1, 2.0, None),
        ]);

        history.add_snapshot(
            "2023-11-07T083944Z".to_string(),
            vec![snapshot_card(20, 3, 2.1, None), snapshot_card(40, 1, 9.0, None)],
        );
        history.add_snapshot(
            "2023-11-08T083944Z".to_string(),
            vec![snapshot_card(10, 2, 0.6, None)],
        );

        assert_eq!(history.timestamps.len(), 3);
        for entry in &history.entries {
            assert_eq!(
                entry.card_history.price_history.len(),
                history.timestamps.len(),
                "row for id={} out of step",
                entry.card_history.id
            );
        }
    }
}

mod table_codec_tests {
    use super::*;

    fn two_column_history() -> CollectionHistory {
        let mut history = single_column_history(vec![
            snapshot_card(10, 4, 0.5, Some(0.4)),
            snapshot_card(20, 1, 2.0, None),
        ]);
        history.add_snapshot(
            "2023-11-07T083944Z".to_string(),
            vec![snapshot_card(10, 9, 0.55, None), snapshot_card(20, 1, 2.5, Some(2.2))],
        );
        history
    }

    #[test]
    fn header_carries_fixed_labels_then_timestamps() {
        let table = two_column_history().to_csv_string();
        let header = table.lines().next().unwrap();
        assert_eq!(
            header,
            "id,quantity,name,set,rarity,foil,2023-11-06T083944Z,2023-11-07T083944Z"
        );
    }

    #[test]
    fn rows_are_sorted_by_id() {
        let table = two_column_history().to_csv_string();
        let ids: Vec<&str> = table
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(ids, vec!["10", "20"]);
    }

    #[test]
    fn table_round_trips_exactly() {
        let table = two_column_history().to_csv_string();
        let mut reparsed = CollectionHistory::from_csv_string(&table).unwrap();
        assert_eq!(reparsed.to_csv_string(), table);
    }

    #[test]
    fn parse_recovers_structure() {
        let table = two_column_history().to_csv_string();
        let reparsed = CollectionHistory::from_csv_string(&table).unwrap();

        assert_eq!(reparsed.timestamps.len(), 2);
        assert_eq!(reparsed.size(), 2);
        assert_eq!(reparsed.entries[0].newest_quantity, 9);
        assert_eq!(reparsed.entries[1].newest_quantity, 1);
    }

    #[test]
    fn rejects_unexpected_header() {
        let result = CollectionHistory::from_csv_string("a,b,c\n");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_row_with_wrong_column_count() {
        let table = "id,quantity,name,set,rarity,foil,2023-11-06T083944Z\n\
                     10,4,\"Card 10\",ONE,Rare,false,[4]0.5;-,[4]0.6;-\n";
        assert!(CollectionHistory::from_csv_string(table).is_err());
    }

    #[test]
    fn empty_table_parses_to_empty_history() {
        let history = CollectionHistory::from_csv_string("id,quantity,name,set,rarity,foil\n").unwrap();
        assert!(history.is_empty());
        assert!(history.timestamps.is_empty());
    }
}
