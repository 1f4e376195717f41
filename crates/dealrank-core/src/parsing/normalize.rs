use std::collections::HashMap;
use std::sync::LazyLock;

/// Key used to look up a header cell in a known layout: upper-cased,
/// trimmed, inner whitespace collapsed to single spaces.
pub fn header_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Key used by the fuzzy matcher: lower-cased alphanumerics only.
/// "Item Desc." and "ITEM_DESC" both become "itemdesc".
pub fn compact_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalize a vendor department label to a canonical department name.
///
/// Steps:
/// 1. Trim and upper-case
/// 2. Look up in the synonym table ("GROC", "GM" -> "Grocery")
/// 3. Otherwise title-case the raw value
pub fn normalize_department(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let key = header_key(trimmed);
    if let Some(canonical) = DEPARTMENTS.get(key.as_str()) {
        return Some(canonical.to_string());
    }
    Some(title_case(trimmed))
}

/// "FROZEN FOODS" -> "Frozen Foods", "hbc-care" -> "Hbc-Care".
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for c in raw.trim().chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Case-insensitive keyword match on word boundaries, so "new" matches
/// "NEW! Cola" but not "Renewal Blend". Multi-word keywords are matched as
/// a phrase.
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    let haystack = text.to_lowercase();
    let needle = keyword.to_lowercase();
    if needle.is_empty() {
        return false;
    }

    let mut offset = 0;
    while let Some(pos) = haystack[offset..].find(&needle) {
        let start = offset + pos;
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        offset = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

static DEPARTMENTS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert("GROCERY", "Grocery");
    m.insert("GROC", "Grocery");
    m.insert("GRO", "Grocery");
    m.insert("GM", "Grocery");
    m.insert("DRY GROCERY", "Grocery");

    m.insert("MEAT", "Meat");
    m.insert("MT", "Meat");
    m.insert("MEATS", "Meat");
    m.insert("FRESH MEAT", "Meat");

    m.insert("SEAFOOD", "Seafood");
    m.insert("SEA", "Seafood");
    m.insert("FISH", "Seafood");

    m.insert("PRODUCE", "Produce");
    m.insert("PROD", "Produce");
    m.insert("PRO", "Produce");

    m.insert("DELI", "Deli");
    m.insert("DEL", "Deli");
    m.insert("BAKERY", "Bakery");
    m.insert("BAK", "Bakery");
    m.insert("BKRY", "Bakery");
    m.insert("DELI/BAKERY", "Deli");

    m.insert("DAIRY", "Dairy");
    m.insert("DAI", "Dairy");

    m.insert("FROZEN", "Frozen");
    m.insert("FRZ", "Frozen");
    m.insert("FZ", "Frozen");
    m.insert("FROZEN FOOD", "Frozen");
    m.insert("FROZEN FOODS", "Frozen");

    m.insert("HBC", "Health & Beauty");
    m.insert("HABA", "Health & Beauty");
    m.insert("HEALTH & BEAUTY", "Health & Beauty");
    m.insert("HEALTH AND BEAUTY", "Health & Beauty");

    m.insert("BEER", "Beer & Wine");
    m.insert("WINE", "Beer & Wine");
    m.insert("B&W", "Beer & Wine");
    m.insert("BEER & WINE", "Beer & Wine");
    m.insert("BEER/WINE", "Beer & Wine");

    m.insert("FLORAL", "Floral");
    m.insert("FLO", "Floral");

    m
});
