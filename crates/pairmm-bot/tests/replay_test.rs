//! JSON-lines replay integration tests.

use std::io::Write;

use pairmm_bot::{run_replay, AppConfig};
use pairmm_core::{ClientOrderId, Command, Lifespan, Price, Side, Volume};

fn events_file(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

fn commands(out: Vec<u8>) -> Vec<Command> {
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test]
async fn test_replay_arbitrage_fill_and_hedge() {
    let file = events_file(&[
        r#"{"type":"order_book_update","instrument":"future","sequence_number":1,"ask_prices":[10100],"ask_volumes":[50],"bid_prices":[10000],"bid_volumes":[50]}"#,
        r#"{"type":"order_book_update","instrument":"etf","sequence_number":1,"ask_prices":[9900],"ask_volumes":[15],"bid_prices":[9800],"bid_volumes":[15]}"#,
        r#"{"type":"order_filled","id":1,"price":9900,"volume":15}"#,
        r#"{"type":"order_status","id":1,"fill_volume":15,"remaining_volume":0,"fees":3}"#,
        r#"{"type":"hedge_filled","id":2,"price":10000,"volume":15}"#,
    ]);

    let (stats, out) = run_replay(AppConfig::default(), Some(file.path().to_path_buf()), Vec::new())
        .await
        .unwrap();

    assert_eq!(
        commands(out),
        vec![
            Command::InsertOrder {
                id: ClientOrderId::new(1),
                side: Side::Buy,
                price: Price::new(9_900),
                volume: Volume::new(15),
                lifespan: Lifespan::FillAndKill,
            },
            Command::HedgeOrder {
                id: ClientOrderId::new(2),
                side: Side::Sell,
                price: Price::new(100),
                volume: Volume::new(15),
            },
        ]
    );
    assert_eq!(stats.position, 15);
    assert_eq!(stats.delta, 0);
    assert!(stats.hedged);
    assert_eq!(stats.etf_fills, 1);
    assert_eq!(stats.hedge_fills, 1);
    assert_eq!(stats.ids_issued, 2);
    assert_eq!(stats.live_bids, 0);
    assert_eq!(stats.outstanding_hedges, 0);
    assert_eq!(stats.inserts_sent, 1);
    assert_eq!(stats.hedges_sent, 1);
    assert_eq!(stats.snapshots_accepted, 2);
}

#[tokio::test]
async fn test_replay_skips_malformed_lines() {
    let file = events_file(&[
        "not json",
        r#"{"type":"heartbeat"}"#,
        "",
        r#"{"type":"order_book_update","instrument":"etf","sequence_number":1,"ask_prices":[1,2,3,4,5,6]}"#,
        r#"{"type":"error","id":0,"message":"session notice"}"#,
    ]);

    let (stats, out) = run_replay(AppConfig::default(), Some(file.path().to_path_buf()), Vec::new())
        .await
        .unwrap();

    assert!(out.is_empty());
    assert_eq!(stats.snapshots_accepted, 0);
    assert_eq!(stats.snapshots_discarded, 0);
}

#[tokio::test]
async fn test_replay_missing_input_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_replay(
        AppConfig::default(),
        Some(dir.path().join("missing.jsonl")),
        Vec::new(),
    )
    .await;

    assert!(matches!(result, Err(pairmm_bot::AppError::Io(_))));
}
