use dealrank_core::scoring::ScoredDeal;
use dealrank_core::DocumentOutcome;
use rust_decimal::Decimal;
use std::fmt::Display;

fn money<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| format!("${v:.2}"))
        .unwrap_or_else(|| "-".into())
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let cut: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}~")
    }
}

pub fn format_outcome(outcome: &DocumentOutcome) -> String {
    let mut out = String::new();

    out.push_str(&format!("File: {}\n", outcome.file_name));
    out.push_str(&format!("Layout: {}\n", outcome.layout));
    if let Some(row) = outcome.header_row {
        out.push_str(&format!("Header row: {}\n", row + 1));
    }
    if let Some(failure) = &outcome.failure {
        out.push_str(&format!("Failure: {failure}\n"));
    }
    if let Some(reason) = &outcome.fallback {
        out.push_str(&format!("Fallback: {reason:?}\n"));
    }
    if !outcome.unmapped_columns.is_empty() {
        out.push_str(&format!(
            "Unmapped columns: {}\n",
            outcome.unmapped_columns.join(", ")
        ));
    }
    out.push('\n');

    if outcome.deals.is_empty() {
        out.push_str("  (no deals parsed)\n");
    } else {
        out.push_str(&format!(
            "  {:<12} {:<32} {:<14} {:>9} {:>9} {:>7} {:>5}  {}\n",
            "Item", "Description", "Dept", "Net cost", "Ad SRP", "Fund", "Mvmt", "Dates"
        ));
        for deal in &outcome.deals {
            let funding = deal
                .vendor_funding_pct
                .and_then(|f| f.checked_mul(Decimal::ONE_HUNDRED))
                .map(|f| format!("{f:.1}%"))
                .unwrap_or_else(|| "-".into());
            let mvmt = deal
                .mvmt
                .map(|m| format!("{m:.1}"))
                .unwrap_or_else(|| "-".into());
            let dates = match (deal.promo_start, deal.promo_end) {
                (Some(s), Some(e)) => format!("{s} .. {e}"),
                (Some(s), None) => s.to_string(),
                _ => "-".into(),
            };
            out.push_str(&format!(
                "  {:<12} {:<32} {:<14} {:>9} {:>9} {:>7} {:>5}  {}\n",
                truncate(&deal.item_code, 12),
                truncate(&deal.description, 32),
                truncate(deal.dept.as_deref().unwrap_or("-"), 14),
                money(deal.net_unit_cost),
                money(deal.ad_srp),
                funding,
                mvmt,
                dates
            ));
        }
    }

    if !outcome.skipped.is_empty() {
        out.push_str(&format!("\n  {} row(s) skipped:\n", outcome.skipped.len()));
        for s in &outcome.skipped {
            out.push_str(&format!("    row {}: {}\n", s.row_index + 1, s.reason));
        }
    }

    out
}

pub fn print_ranked(ranked: &[ScoredDeal], verbose: bool) {
    println!(
        "  {:>4}  {:>6}  {:<20}  {:<12} {:<32} {:>9}",
        "Rank", "Score", "Tier", "Item", "Description", "Ad SRP"
    );
    for scored in ranked {
        let deal = &scored.deal;
        let score = &scored.score;
        println!(
            "  {:>4}  {:>6.1}  {:<20}  {:<12} {:<32} {:>9}",
            scored.rank,
            score.total,
            score.tier.label(),
            truncate(&deal.item_code, 12),
            truncate(&deal.description, 32),
            money(deal.ad_srp)
        );

        if verbose {
            let c = &score.components;
            println!(
                "        margin {:.0}  velocity {:.0}  funding {:.0}  theme {:.0}  timing {:.0}  competitive {:.0}",
                c.margin, c.velocity, c.funding, c.theme, c.timing, c.competitive
            );
            let m = &score.multipliers;
            let private_label = m
                .private_label
                .map(|p| format!("  private label x{p:.2}"))
                .unwrap_or_default();
            println!(
                "        seasonal x{:.2}  strategic x{:.2}  historical x{:.2}  new item x{:.2}{}",
                m.seasonal, m.strategic, m.historical, m.new_item, private_label
            );
            if let Some(scan) = deal.total_scan() {
                println!("        scan total {scan:.2}");
            }
            for reason in &score.reasons {
                println!("        - {reason}");
            }
            println!();
        } else if let Some(first) = score.reasons.first() {
            println!("        {first}");
        }
    }
}
