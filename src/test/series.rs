#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::calc::{build_series, snapshot_series};
    use crate::models::{AssetPrice, Position, PricePoint, PriceSnapshot};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[test]
    fn merges_two_assets_by_day() {
        let positions = vec![
            Position::new("bitcoin".to_string(), dec!(2.0), dec!(45000)),
            Position::new("ethereum".to_string(), dec!(10), dec!(2000)),
        ];
        let mut histories = HashMap::new();
        histories.insert(
            "bitcoin".to_string(),
            vec![
                PricePoint::new(day(1), dec!(50000)),
                PricePoint::new(day(2), dec!(52000)),
                PricePoint::new(day(3), dec!(51000)),
            ],
        );
        histories.insert(
            "ethereum".to_string(),
            vec![
                PricePoint::new(day(1), dec!(2100)),
                PricePoint::new(day(2), dec!(2200)),
                PricePoint::new(day(3), dec!(2150)),
            ],
        );

        let series = build_series(&positions, &histories);

        assert_eq!(series.len(), 3);
        assert_eq!(*series[0].date(), day(1));
        assert_eq!(
            series[0].total_value().normalize(),
            dec!(2.0) * dec!(50000) + dec!(10) * dec!(2100)
        );
        assert_eq!(
            series[1].total_value().normalize(),
            dec!(2.0) * dec!(52000) + dec!(10) * dec!(2200)
        );
        assert_eq!(
            series[2].total_value().normalize(),
            dec!(2.0) * dec!(51000) + dec!(10) * dec!(2150)
        );
    }

    #[test]
    fn asset_without_sample_contributes_nothing_that_day() {
        let positions = vec![
            Position::new("bitcoin".to_string(), dec!(1.0), dec!(45000)),
            Position::new("ethereum".to_string(), dec!(10), dec!(2000)),
        ];
        let mut histories = HashMap::new();
        histories.insert(
            "bitcoin".to_string(),
            vec![
                PricePoint::new(day(1), dec!(50000)),
                PricePoint::new(day(2), dec!(52000)),
            ],
        );
        // Ethereum has no sample for day 2.
        histories.insert(
            "ethereum".to_string(),
            vec![PricePoint::new(day(1), dec!(2100))],
        );

        let series = build_series(&positions, &histories);

        assert_eq!(series.len(), 2);
        assert_eq!(
            series[0].total_value().normalize(),
            dec!(50000) + dec!(10) * dec!(2100)
        );
        assert_eq!(series[1].total_value().normalize(), dec!(52000));
    }

    #[test]
    fn output_is_sorted_even_when_input_is_not() {
        let positions = vec![Position::new("bitcoin".to_string(), dec!(1.0), dec!(45000))];
        let mut histories = HashMap::new();
        histories.insert(
            "bitcoin".to_string(),
            vec![
                PricePoint::new(day(3), dec!(51000)),
                PricePoint::new(day(1), dec!(50000)),
                PricePoint::new(day(2), dec!(52000)),
            ],
        );

        let series = build_series(&positions, &histories);

        let dates: Vec<NaiveDate> = series.iter().map(|point| *point.date()).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
    }

    #[test]
    fn identical_inputs_give_identical_series() {
        let positions = vec![Position::new("bitcoin".to_string(), dec!(0.5), dec!(45000))];
        let mut histories = HashMap::new();
        histories.insert(
            "bitcoin".to_string(),
            vec![
                PricePoint::new(day(1), dec!(50000)),
                PricePoint::new(day(2), dec!(52000)),
            ],
        );

        assert_eq!(
            build_series(&positions, &histories),
            build_series(&positions, &histories)
        );
    }

    #[test]
    fn history_for_unheld_asset_is_ignored() {
        let positions = vec![Position::new("bitcoin".to_string(), dec!(1.0), dec!(45000))];
        let mut histories = HashMap::new();
        histories.insert(
            "dogecoin".to_string(),
            vec![PricePoint::new(day(1), dec!(0.1))],
        );

        let series = build_series(&positions, &histories);
        assert!(series.is_empty());
    }

    #[test]
    fn snapshot_mode_builds_one_point_for_today() {
        let positions = vec![
            Position::new("bitcoin".to_string(), dec!(2.0), dec!(45000)),
            Position::new("ethereum".to_string(), dec!(10), dec!(2000)),
        ];
        let mut prices = HashMap::new();
        prices.insert(
            "bitcoin".to_string(),
            AssetPrice::new(dec!(60000), dec!(0)),
        );
        // Ethereum is missing from the snapshot and counts as zero.
        let snapshot = PriceSnapshot::new(prices);

        let series = snapshot_series(&positions, &snapshot, day(28));

        assert_eq!(series.len(), 1);
        assert_eq!(*series[0].date(), day(28));
        assert_eq!(series[0].total_value().normalize(), dec!(120000));
    }
}
