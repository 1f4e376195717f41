//! Integration tests for the ingest-then-score pipeline.
//!
//! Uses a MockReader that returns pre-built grids, so layout detection and
//! canonicalization are exercised without spreadsheet fixtures.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use dealrank_core::config::builtin::load_preset;
use dealrank_core::error::DealError;
use dealrank_core::extraction::{Cell, GridReader, SheetGrid};
use dealrank_core::quality::IssueKind;
use dealrank_core::scoring::ScoreTier;
use dealrank_core::{
    canonicalize_records, ingest_deal_list, ingest_document, ingest_file_bytes, score_batch,
    score_week, FallbackReason, LayoutKind, PipelineConfig, ScoringContext,
};

struct MockReader {
    rows: Vec<Vec<&'static str>>,
}

impl GridReader for MockReader {
    fn read_grid(&self, _bytes: &[u8]) -> Result<SheetGrid, DealError> {
        Ok(SheetGrid {
            sheet_name: Some("Sheet1".into()),
            rows: self
                .rows
                .iter()
                .map(|r| r.iter().map(|s| Cell::from(*s)).collect())
                .collect(),
        })
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct BrokenReader;

impl GridReader for BrokenReader {
    fn read_grid(&self, _bytes: &[u8]) -> Result<SheetGrid, DealError> {
        Err(DealError::Extraction("zip archive is truncated".into()))
    }

    fn backend_name(&self) -> &str {
        "broken"
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const WEEKLY_AD_CSV: &str = "\
ACME FOODS WEEKLY AD,,,,,,,,
,,,,,,,,
ORDER #,ITEM DESC,DEPT,UNIT COST,AD SRP,VENDOR FUNDING %,MVMT,COMP PRICE,AD DATES
10234,Cola 12pk Cans,GROC,$3.45,$4.99,15,2.0,$5.99,3/4 - 3/10/26
20111,Ground Beef 80/20 per lb,MEAT,$2.10,$3.49,20,3.5,$3.99,3/4 - 3/10/26
30555,Organic Baby Spinach 5oz,PRODUCE,$2.20,$2.99,5,1.2,,3/4 - 3/10/26
40999,Paper Towels 6 Roll,GM,$5.80,$6.49,,1.0,$6.29,3/4 - 3/10/26
TOTAL,Department Total,,,,,,,
";

// ---------------------------------------------------------------------------
// CSV ad planner: ingest, gate and rank
// ---------------------------------------------------------------------------
#[test]
fn csv_ad_planner_end_to_end() {
    let config = PipelineConfig::default();
    let outcome = ingest_file_bytes(WEEKLY_AD_CSV.as_bytes(), "Weekly Ad wk10.csv", &config);

    assert_eq!(outcome.layout, LayoutKind::AdPlanner);
    assert_eq!(outcome.header_row, Some(2));
    assert_eq!(outcome.fallback, None);
    assert_eq!(outcome.failure, None);
    assert_eq!(outcome.deals.len(), 4);
    assert_eq!(outcome.skipped.len(), 1);

    let beef = &outcome.deals[1];
    assert_eq!(beef.dept.as_deref(), Some("Meat"));
    assert_eq!(beef.vendor_funding_pct, Some(dec!(0.20)));
    assert_eq!(beef.promo_start, Some(date(2026, 3, 4)));
    assert_eq!(beef.promo_end, Some(date(2026, 3, 10)));
    assert_eq!(beef.source.row, 4);

    let ranked = score_week(&outcome.deals, &config, date(2026, 3, 2)).unwrap();
    let codes: Vec<&str> = ranked.iter().map(|s| s.deal.item_code.as_str()).collect();
    assert_eq!(codes, vec!["20111", "10234", "30555", "40999"]);

    // Traffic driver with strong margin and velocity saturates.
    assert_eq!(ranked[0].score.total, 100.0);
    assert_eq!(ranked[0].score.tier, ScoreTier::MustInclude);
    assert_eq!(ranked[1].score.tier, ScoreTier::MustInclude);
    assert_eq!(ranked[2].score.components.margin, 0.0);
    assert_eq!(ranked[3].score.tier, ScoreTier::Skip);
    assert!(ranked.iter().all(|s| (0.0..=100.0).contains(&s.score.total)));
}

#[test]
fn rescoring_is_byte_identical() {
    let config = PipelineConfig::default();
    let outcome = ingest_file_bytes(WEEKLY_AD_CSV.as_bytes(), "weekly.csv", &config);
    let first = score_week(&outcome.deals, &config, date(2026, 3, 2)).unwrap();
    let second = score_week(&outcome.deals, &config, date(2026, 3, 2)).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn preset_weights_change_ranking_inputs_not_components() {
    let config = PipelineConfig::default();
    let outcome = ingest_file_bytes(WEEKLY_AD_CSV.as_bytes(), "weekly.csv", &config);
    let ctx = ScoringContext::new(date(2026, 3, 2));

    let balanced = score_batch(&outcome.deals, &load_preset("balanced").unwrap().weights, &ctx);
    let traffic = score_batch(&outcome.deals, &load_preset("traffic").unwrap().weights, &ctx);

    let cola = |ranked: &[dealrank_core::ScoredDeal]| {
        ranked
            .iter()
            .find(|s| s.deal.item_code == "10234")
            .map(|s| s.score.clone())
            .unwrap()
    };
    assert_eq!(cola(&balanced).components, cola(&traffic).components);
    assert!(cola(&balanced).total != cola(&traffic).total);
}

// ---------------------------------------------------------------------------
// Fallback signals
// ---------------------------------------------------------------------------
#[test]
fn unknown_layout_uses_generic_mapper_and_signals_fallback() {
    let reader = MockReader {
        rows: vec![
            vec!["Vendor Item Number", "Item Description Text", "Case Cost ($)", "Promo Price"],
            vec!["A-100", "Sparkling Water 12pk", "3.10", "4.49"],
            vec!["A-101", "Kettle Chips Sea Salt", "1.95", "2.99"],
            vec!["A-102", "Salsa Medium 16oz", "2.05", "3.29"],
        ],
    };
    let outcome = ingest_document(&[], "vendor.xlsx", &reader, &PipelineConfig::default());

    assert_eq!(outcome.layout, LayoutKind::Unknown);
    assert_eq!(outcome.fallback, Some(FallbackReason::UnknownLayout));
    assert_eq!(outcome.deals.len(), 3);
    assert_eq!(outcome.deals[0].item_code, "A-100");
    assert_eq!(outcome.deals[0].ad_srp, Some(dec!(4.49)));
    assert_eq!(outcome.deals[0].source.sheet.as_deref(), Some("Sheet1"));
}

#[test]
fn known_layout_with_too_few_rows() {
    let reader = MockReader {
        rows: vec![
            vec!["ORDER #", "ITEM DESC", "UNIT COST", "AD SRP"],
            vec!["1", "Cola 12pk Cans", "3.45", "4.99"],
            vec!["2", "Lemon Lime 2L", "0.99", "1.49"],
        ],
    };
    let outcome = ingest_document(&[], "weekly ad.xlsx", &reader, &PipelineConfig::default());

    assert_eq!(outcome.layout, LayoutKind::AdPlanner);
    assert_eq!(outcome.deals.len(), 2);
    assert_eq!(
        outcome.fallback,
        Some(FallbackReason::TooFewRows { found: 2, minimum: 3 })
    );
}

#[test]
fn missing_header_is_a_failure_not_an_empty_document() {
    let reader = MockReader {
        rows: vec![
            vec!["Thank you for your business"],
            vec!["Questions? Call your rep"],
        ],
    };
    let outcome = ingest_document(&[], "notes.xlsx", &reader, &PipelineConfig::default());
    assert!(outcome.deals.is_empty());
    assert!(outcome.failure.unwrap().contains("no header row"));
    assert_eq!(outcome.fallback, Some(FallbackReason::UnknownLayout));
}

#[test]
fn unreadable_grid_reports_failure() {
    let outcome = ingest_document(b"PK", "broken.xlsx", &BrokenReader, &PipelineConfig::default());
    assert!(outcome.needs_fallback());
    assert!(outcome.failure.unwrap().contains("truncated"));
}

#[test]
fn unsupported_file_type_routes_to_fallback() {
    let outcome = ingest_file_bytes(b"%PDF-1.7", "Vendor Deck.pdf", &PipelineConfig::default());
    assert_eq!(
        outcome.fallback,
        Some(FallbackReason::UnsupportedFile {
            extension: "pdf".into()
        })
    );
    assert!(outcome.deals.is_empty());
}

// ---------------------------------------------------------------------------
// External records and the quality gate
// ---------------------------------------------------------------------------
#[test]
fn external_records_feed_the_same_scoring() {
    let records: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(
        r#"[
            {"itemCode": "900", "description": "Fresh Strawberries 1lb", "cost": 1.80,
             "adSrp": "2.99", "vendorFundingPct": 10, "promoDates": "2/10 - 2/16/26"},
            {"itemCode": "901", "description": "Milk Chocolate Truffles", "cost": "4.10",
             "adSrp": 6.99, "vendorFundingPct": 0.2}
        ]"#,
    )
    .unwrap();
    let parsed = canonicalize_records(&records, "llm-extract.json", None).unwrap();
    assert_eq!(parsed.deals.len(), 2);
    assert_eq!(parsed.deals[0].vendor_funding_pct, Some(dec!(0.10)));
    assert_eq!(parsed.deals[0].promo_start, Some(date(2026, 2, 10)));
    assert_eq!(parsed.deals[1].vendor_funding_pct, Some(dec!(0.2)));

    let ranked = score_week(&parsed.deals, &PipelineConfig::default(), date(2026, 2, 9)).unwrap();
    assert_eq!(ranked.len(), 2);
    // Strawberries and chocolate both sit in the Valentine's window.
    assert!(ranked.iter().all(|s| s.score.components.theme > 50.0));
}

#[test]
fn deal_list_drops_incomplete_records() {
    let json = br#"[
        {"item_code": "", "description": "Whole Milk"},
        {"item_code": "501", "description": "Whole Milk Gallon", "vendor_funding_pct": 15,
         "net_unit_cost": "2.10", "ad_srp": "2.99"},
        {"item_code": "502", "description": "", "ad_srp": "1.00"},
        {"item_code": "503", "description": "Sharp Cheddar Block", "vendor_funding_pct": "0.1",
         "net_unit_cost": 3.0, "ad_srp": 4.49, "shelf_tag": "A"}
    ]"#;
    let outcome = ingest_deal_list(json, "deals.json", &PipelineConfig::default()).unwrap();

    let codes: Vec<&str> = outcome.deals.iter().map(|d| d.item_code.as_str()).collect();
    assert_eq!(codes, vec!["501", "503"]);
    let skipped: Vec<usize> = outcome.skipped.iter().map(|s| s.row_index).collect();
    assert_eq!(skipped, vec![0, 2]);
    // A bare 15 is a percentage, like a spreadsheet cell.
    assert_eq!(outcome.deals[0].vendor_funding_pct, Some(dec!(0.15)));
    assert_eq!(outcome.deals[1].vendor_funding_pct, Some(dec!(0.1)));
    assert_eq!(outcome.unmapped_columns, vec!["shelf_tag".to_string()]);
    assert!(!outcome.needs_fallback());
}

#[test]
fn malformed_deal_list_is_an_error() {
    let err = ingest_deal_list(b"{\"not\": \"a list\"}", "deals.json", &PipelineConfig::default())
        .unwrap_err();
    assert!(matches!(err, DealError::Json(_)));
}

#[test]
fn quality_gate_blocks_scoring_with_every_issue() {
    let config = PipelineConfig::default();
    let mut deals = ingest_file_bytes(WEEKLY_AD_CSV.as_bytes(), "weekly.csv", &config).deals;
    deals[0].ad_srp = None;
    deals[1].description = "Beef".into();

    let err = score_week(&deals, &config, date(2026, 3, 2)).unwrap_err();
    match err {
        DealError::QualityGate(issues) => {
            let kinds: Vec<IssueKind> = issues.iter().map(|i| i.kind).collect();
            assert_eq!(
                kinds,
                vec![IssueKind::MissingAdPrice, IssueKind::UnresolvedDescription]
            );
            assert_eq!(issues[0].item_codes, vec!["10234"]);
        }
        other => panic!("expected quality gate error, got {other}"),
    }
}
