#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::api::coingecko::{points_from_chart, snapshot_from_dtos};
    use crate::api::dto::{MarketChartDto, SearchResponseDto, SimplePriceDto};

    #[test]
    fn simple_price_response_deserializes() {
        let body = r#"
        {
            "bitcoin": { "usd": 43250.0, "usd_24h_change": 2.3 },
            "ethereum": { "usd": 2280.5, "usd_24h_change": -1.2 }
        }
        "#;

        let data: HashMap<String, SimplePriceDto> = serde_json::from_str(body).unwrap();
        let snapshot = snapshot_from_dtos(data);

        assert_eq!(snapshot.len(), 2);
        let bitcoin = snapshot.get("bitcoin").unwrap();
        assert_eq!(bitcoin.price().normalize(), dec!(43250));
        assert_eq!(bitcoin.change_24h_percent().normalize(), dec!(2.3));
    }

    #[test]
    fn entries_without_a_price_are_dropped() {
        let mut data = HashMap::new();
        data.insert(
            "bitcoin".to_string(),
            SimplePriceDto::new(Some(dec!(43250)), None),
        );
        data.insert("unknown-coin".to_string(), SimplePriceDto::new(None, None));

        let snapshot = snapshot_from_dtos(data);

        assert_eq!(snapshot.len(), 1);
        let bitcoin = snapshot.get("bitcoin").unwrap();
        assert_eq!(bitcoin.change_24h_percent().normalize(), dec!(0));
        assert!(snapshot.get("unknown-coin").is_none());
    }

    #[test]
    fn market_chart_timestamps_become_calendar_days() {
        let body = r#"
        {
            "prices": [
                [1755993600000, 50000.0],
                [1756080000000, 52000.0],
                [1756166400000, 51000.0]
            ]
        }
        "#;

        let data: MarketChartDto = serde_json::from_str(body).unwrap();
        let points = points_from_chart(&data).unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(
            *points[0].date(),
            NaiveDate::from_ymd_opt(2025, 8, 24).unwrap()
        );
        assert_eq!(points[0].price().normalize(), dec!(50000));
        assert_eq!(
            *points[2].date(),
            NaiveDate::from_ymd_opt(2025, 8, 26).unwrap()
        );
    }

    #[test]
    fn trailing_same_day_sample_replaces_the_daily_one() {
        // CoinGecko appends the current moment after the midnight sample.
        let data = MarketChartDto::new(vec![
            (1756080000000, dec!(52000)),
            (1756166400000, dec!(51000)),
            (1756215000000, dec!(51500)),
        ]);

        let points = points_from_chart(&data).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[1].price().normalize(), dec!(51500));
    }

    #[test]
    fn search_response_deserializes() {
        let body = r#"
        {
            "coins": [
                { "id": "bitcoin", "name": "Bitcoin", "symbol": "BTC", "market_cap_rank": 1 },
                { "id": "bitcoin-cash", "name": "Bitcoin Cash", "symbol": "BCH", "market_cap_rank": null }
            ]
        }
        "#;

        let data: SearchResponseDto = serde_json::from_str(body).unwrap();

        assert_eq!(data.coins().len(), 2);
        assert_eq!(data.coins()[0].id(), "bitcoin");
        assert_eq!(data.coins()[0].symbol(), "BTC");
        assert_eq!(*data.coins()[1].market_cap_rank(), None);
    }
}
