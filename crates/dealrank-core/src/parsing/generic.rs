use std::collections::{BTreeMap, HashSet};

use crate::parsing::layouts::{ColumnAliases, Field};
use crate::parsing::normalize::compact_key;

/// Best-effort column mapping for documents of unknown layout.
///
/// Pass 1 claims exact matches: a header whose compact key (lower-case
/// alphanumerics) equals one of a field's synonyms, fields and synonyms
/// taken in priority order. Pass 2 falls back to containment for the fields
/// still unmapped: a header containing a synonym. Longer synonyms are
/// assigned first so "Item Description Text" goes to the description, not
/// to the item code via "item". A column is never mapped twice.
pub fn map_generic_columns(headers: &[Option<String>], synonyms: ColumnAliases) -> BTreeMap<Field, usize> {
    let keys: Vec<Option<String>> = headers
        .iter()
        .map(|h| h.as_deref().map(compact_key).filter(|k| !k.is_empty()))
        .collect();

    let mut mapped: BTreeMap<Field, usize> = BTreeMap::new();
    let mut claimed: HashSet<usize> = HashSet::new();

    for (field, names) in synonyms {
        let hit = names.iter().find_map(|name| {
            keys.iter().enumerate().find_map(|(col, key)| match key {
                Some(k) if k == name && !claimed.contains(&col) => Some(col),
                _ => None,
            })
        });
        if let Some(col) = hit {
            mapped.insert(*field, col);
            claimed.insert(col);
        }
    }

    // (synonym length, field priority, column)
    let mut contained: Vec<(usize, usize, usize, Field)> = Vec::new();
    for (priority, (field, names)) in synonyms.iter().enumerate() {
        if mapped.contains_key(field) {
            continue;
        }
        for name in names.iter() {
            for (col, key) in keys.iter().enumerate() {
                if let Some(k) = key {
                    if !claimed.contains(&col) && k.contains(name) {
                        contained.push((name.len(), priority, col, *field));
                    }
                }
            }
        }
    }
    contained.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    for (_, _, col, field) in contained {
        if mapped.contains_key(&field) || claimed.contains(&col) {
            continue;
        }
        tracing::debug!(?field, col, header = ?headers[col], "containment match");
        mapped.insert(field, col);
        claimed.insert(col);
    }

    mapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::layouts::GENERIC_COLUMNS;

    fn headers(names: &[&str]) -> Vec<Option<String>> {
        names
            .iter()
            .map(|n| if n.is_empty() { None } else { Some(n.to_string()) })
            .collect()
    }

    #[test]
    fn test_exact_match_ignores_case_and_punctuation() {
        let m = map_generic_columns(
            &headers(&["Item #", "Item Desc.", "Net_Cost", "Ad Price"]),
            GENERIC_COLUMNS,
        );
        assert_eq!(m.get(&Field::ItemCode), Some(&0));
        assert_eq!(m.get(&Field::Description), Some(&1));
        assert_eq!(m.get(&Field::NetUnitCost), Some(&2));
        assert_eq!(m.get(&Field::AdSrp), Some(&3));
    }

    #[test]
    fn test_containment_fallback_prefers_longest_synonym() {
        let m = map_generic_columns(
            &headers(&["Vendor Item Number", "Item Description Text", "Case Cost ($)"]),
            GENERIC_COLUMNS,
        );
        assert_eq!(m.get(&Field::Description), Some(&1));
        assert_eq!(m.get(&Field::ItemCode), Some(&0));
        assert_eq!(m.get(&Field::Cost), Some(&2));
    }

    #[test]
    fn test_column_never_mapped_twice() {
        let m = map_generic_columns(&headers(&["SKU", "Product", "Promo Price"]), GENERIC_COLUMNS);
        assert_eq!(m.get(&Field::ItemCode), Some(&0));
        assert_eq!(m.get(&Field::Description), Some(&1));
        assert_eq!(m.get(&Field::AdSrp), Some(&2));
        assert_eq!(m.get(&Field::Srp), None);
    }

    #[test]
    fn test_blank_headers_skipped() {
        let m = map_generic_columns(&headers(&["", "sku", "  "]), GENERIC_COLUMNS);
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(&Field::ItemCode), Some(&1));
    }

    #[test]
    fn test_camel_case_record_keys() {
        let m = map_generic_columns(
            &headers(&["itemCode", "description", "vendorFundingPct", "adSrp", "netUnitCost"]),
            GENERIC_COLUMNS,
        );
        assert_eq!(m.get(&Field::VendorFundingPct), Some(&2));
        assert_eq!(m.get(&Field::AdSrp), Some(&3));
        assert_eq!(m.get(&Field::NetUnitCost), Some(&4));
    }
}
