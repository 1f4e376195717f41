//! Declarative vendor layout tables.
//!
//! Each known layout is described purely by data: the keywords that mark
//! its header row, the header signature the format detector looks for, and
//! an ordered list of accepted header spellings per canonical field. Adding
//! a vendor layout means adding a table here, not a new parser.

use serde::{Deserialize, Serialize};

use crate::model::LayoutKind;

/// Canonical deal fields a vendor column can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    ItemCode,
    Description,
    Dept,
    Upc,
    Cost,
    NetUnitCost,
    Srp,
    AdSrp,
    VendorFundingPct,
    Mvmt,
    AdScan,
    TprScan,
    EdlcScan,
    CompetitorPrice,
    Pack,
    Size,
    PromoDates,
    PromoStart,
    PromoEnd,
}

pub type ColumnAliases = &'static [(Field, &'static [&'static str])];

/// Everything needed to detect and canonicalize one vendor layout.
#[derive(Debug)]
pub struct LayoutSpec {
    pub kind: LayoutKind,
    /// Item-identifier spellings used to locate the header row.
    pub item_keys: &'static [&'static str],
    /// Header tokens that must all be present for a full signature match.
    pub required: &'static [&'static str],
    /// Department-specific header tokens; each hit strengthens the match.
    pub keywords: &'static [&'static str],
    /// Lower-case file name fragments that hint at this layout.
    pub file_hints: &'static [&'static str],
    /// Department assigned when the document carries no department column.
    pub default_dept: Option<&'static str>,
    /// Accepted header spellings per field, in priority order.
    pub columns: ColumnAliases,
}

/// Keywords that mark a row as naming an item, across all layouts.
pub const ITEM_IDENTIFIER_KEYS: &[&str] = &[
    "ORDER #",
    "ORDER#",
    "ORDER NO",
    "ORDER NUMBER",
    "ITEM #",
    "ITEM#",
    "ITEM NO",
    "ITEM CODE",
    "ITEM NUMBER",
    "SKU",
    "PRODUCT CODE",
    "PRODUCT ID",
    "PLU",
];

const AD_PLANNER_COLUMNS: ColumnAliases = &[
    (Field::ItemCode, &["ORDER #", "ORDER#", "ORDER NO", "ITEM #"]),
    (Field::Description, &["ITEM DESC", "ITEM DESCRIPTION", "DESCRIPTION"]),
    (Field::Dept, &["DEPT", "DEPARTMENT"]),
    (Field::Upc, &["UPC", "UPC CODE", "UPC #"]),
    (Field::Cost, &["UNIT COST", "REG COST", "COST", "CASE COST"]),
    (Field::NetUnitCost, &["NET UNIT COST", "NET COST", "NET UNIT"]),
    (Field::Srp, &["SRP", "REG SRP", "REG RETAIL", "RETAIL"]),
    (Field::AdSrp, &["AD SRP", "AD PRICE", "AD RETAIL"]),
    (
        Field::VendorFundingPct,
        &["VENDOR FUNDING %", "FUNDING %", "VENDOR FUNDING", "FUND %"],
    ),
    (Field::Mvmt, &["MVMT", "MOVEMENT", "MVMT MULT", "LIFT"]),
    (Field::AdScan, &["AD SCAN"]),
    (Field::TprScan, &["TPR SCAN", "TPR"]),
    (Field::EdlcScan, &["EDLC SCAN", "EDLC"]),
    (Field::CompetitorPrice, &["COMP PRICE", "COMPETITOR PRICE", "COMP"]),
    (Field::Pack, &["PACK", "PK"]),
    (Field::Size, &["SIZE"]),
    (Field::PromoDates, &["AD DATES", "PROMO DATES", "DATES"]),
    (Field::PromoStart, &["AD START", "START DATE"]),
    (Field::PromoEnd, &["AD END", "END DATE"]),
];

const MEAT_PLANNER_COLUMNS: ColumnAliases = &[
    (Field::ItemCode, &["ORDER #", "ORDER#", "ORDER NO", "ITEM #"]),
    (Field::Description, &["ITEM DESC", "ITEM DESCRIPTION", "CUT", "DESCRIPTION"]),
    (Field::Dept, &["DEPT", "DEPARTMENT"]),
    (Field::Upc, &["UPC", "UPC CODE"]),
    (Field::Cost, &["UNIT COST", "COST/LB", "LB COST", "COST"]),
    (Field::NetUnitCost, &["NET UNIT COST", "NET COST/LB", "NET COST"]),
    (Field::Srp, &["SRP", "REG SRP", "REG RETAIL/LB", "REG RETAIL"]),
    (Field::AdSrp, &["AD SRP", "AD PRICE/LB", "AD PRICE"]),
    (Field::VendorFundingPct, &["VENDOR FUNDING %", "FUNDING %"]),
    (Field::Mvmt, &["MVMT", "MOVEMENT"]),
    (Field::AdScan, &["AD SCAN"]),
    (Field::TprScan, &["TPR SCAN"]),
    (Field::EdlcScan, &["EDLC SCAN"]),
    (Field::CompetitorPrice, &["COMP PRICE", "COMPETITOR PRICE"]),
    (Field::Pack, &["PACK", "CASE WT"]),
    (Field::Size, &["AVG WT", "SIZE"]),
    (Field::PromoDates, &["AD DATES", "PROMO DATES"]),
    (Field::PromoStart, &["AD START", "START DATE"]),
    (Field::PromoEnd, &["AD END", "END DATE"]),
];

const DELI_BAKERY_COLUMNS: ColumnAliases = &[
    (Field::ItemCode, &["ORDER #", "ORDER#", "ORDER NO", "ITEM #"]),
    (Field::Description, &["ITEM DESC", "ITEM DESCRIPTION", "DESCRIPTION"]),
    (Field::Dept, &["DEPT", "DEPARTMENT", "SECTION"]),
    (Field::Upc, &["UPC", "SCALE UPC"]),
    (Field::Cost, &["UNIT COST", "COST/LB", "COST"]),
    (Field::NetUnitCost, &["NET UNIT COST", "NET COST"]),
    (Field::Srp, &["SRP", "REG SRP", "REG RETAIL"]),
    (Field::AdSrp, &["AD SRP", "AD PRICE"]),
    (Field::VendorFundingPct, &["VENDOR FUNDING %", "FUNDING %"]),
    (Field::Mvmt, &["MVMT", "MOVEMENT"]),
    (Field::AdScan, &["AD SCAN"]),
    (Field::TprScan, &["TPR SCAN"]),
    (Field::EdlcScan, &["EDLC SCAN"]),
    (Field::CompetitorPrice, &["COMP PRICE"]),
    (Field::Pack, &["PACK"]),
    (Field::Size, &["SIZE", "SLICE WT"]),
    (Field::PromoDates, &["AD DATES", "PROMO DATES"]),
    (Field::PromoStart, &["AD START", "START DATE"]),
    (Field::PromoEnd, &["AD END", "END DATE"]),
];

const GROCERY_PLANNER_COLUMNS: ColumnAliases = &[
    (Field::ItemCode, &["ITEM CODE", "ITEM #", "ITEM NO", "SKU"]),
    (Field::Description, &["DESCRIPTION", "ITEM DESCRIPTION", "DESC"]),
    (Field::Dept, &["DEPT", "DEPARTMENT", "CATEGORY"]),
    (Field::Upc, &["UPC", "UPC CODE", "GTIN"]),
    (Field::Cost, &["UNIT COST", "COST", "CASE COST"]),
    (Field::NetUnitCost, &["NET UNIT COST", "NET COST", "DEAL COST"]),
    (Field::Srp, &["REG RETAIL", "SRP", "RETAIL"]),
    (Field::AdSrp, &["AD RETAIL", "AD PRICE", "AD SRP"]),
    (
        Field::VendorFundingPct,
        &["ALLOWANCE %", "FUNDING %", "VENDOR FUNDING %"],
    ),
    (Field::Mvmt, &["MVMT", "MOVEMENT"]),
    (Field::AdScan, &["AD SCAN"]),
    (Field::TprScan, &["TPR SCAN", "TPR"]),
    (Field::EdlcScan, &["EDLC SCAN", "EDLC"]),
    (Field::CompetitorPrice, &["COMP PRICE", "COMPETITOR"]),
    (Field::Pack, &["CASE PACK", "PACK"]),
    (Field::Size, &["SIZE"]),
    (Field::PromoDates, &["AD DATES", "PROMO DATES"]),
    (Field::PromoStart, &["START DATE"]),
    (Field::PromoEnd, &["END DATE"]),
];

const PRODUCE_PLANNER_COLUMNS: ColumnAliases = &[
    (Field::ItemCode, &["ITEM #", "ITEM CODE", "PLU"]),
    (Field::Description, &["COMMODITY", "DESCRIPTION", "ITEM DESC"]),
    (Field::Dept, &["DEPT"]),
    (Field::Upc, &["UPC"]),
    (Field::Cost, &["FOB", "UNIT COST", "COST"]),
    (Field::NetUnitCost, &["DELIVERED COST", "NET COST"]),
    (Field::Srp, &["REG RETAIL", "RETAIL"]),
    (Field::AdSrp, &["AD RETAIL", "AD PRICE"]),
    (Field::VendorFundingPct, &["AD FUNDING %", "FUNDING %"]),
    (Field::Mvmt, &["MVMT", "MOVEMENT"]),
    (Field::AdScan, &["AD SCAN"]),
    (Field::TprScan, &["TPR SCAN"]),
    (Field::EdlcScan, &["EDLC SCAN"]),
    (Field::CompetitorPrice, &["COMP PRICE"]),
    (Field::Pack, &["PACK", "COUNT SIZE"]),
    (Field::Size, &["SIZE", "COUNT SIZE"]),
    (Field::PromoDates, &["AD WEEK", "AD DATES"]),
    (Field::PromoStart, &["START DATE"]),
    (Field::PromoEnd, &["END DATE"]),
];

const ROLLING_STOCK_COLUMNS: ColumnAliases = &[
    (Field::ItemCode, &["SKU", "ITEM #", "PRODUCT CODE"]),
    (Field::Description, &["PRODUCT", "PRODUCT DESCRIPTION", "DESCRIPTION"]),
    (Field::Dept, &["DEPT", "CATEGORY"]),
    (Field::Upc, &["UPC"]),
    (Field::Cost, &["LIST COST", "REG COST", "COST"]),
    (Field::NetUnitCost, &["DEAL COST", "NET COST"]),
    (Field::Srp, &["RETAIL", "SRP"]),
    (Field::AdSrp, &["PROMO RETAIL", "AD RETAIL", "AD PRICE"]),
    (Field::VendorFundingPct, &["ALLOWANCE %", "DEAL %"]),
    (Field::Mvmt, &["MVMT", "LIFT"]),
    (Field::AdScan, &["AD SCAN"]),
    (Field::TprScan, &["TPR SCAN"]),
    (Field::EdlcScan, &["EDLC SCAN"]),
    (Field::CompetitorPrice, &["COMP PRICE"]),
    (Field::Pack, &["PACK"]),
    (Field::Size, &["SIZE"]),
    (Field::PromoDates, &["DEAL DATES", "PERFORMANCE DATES"]),
    (Field::PromoStart, &["DEAL START"]),
    (Field::PromoEnd, &["DEAL END"]),
];

/// Ad-style planners share one signature; department keywords and file
/// names tell them apart.
const AD_SIGNATURE: &[&str] = &["ORDER #", "ITEM DESC", "AD SRP", "UNIT COST"];
const AD_ITEM_KEYS: &[&str] = &["ORDER #", "ORDER#", "ORDER NO", "ITEM #"];

pub static LAYOUTS: [LayoutSpec; 6] = [
    LayoutSpec {
        kind: LayoutKind::AdPlanner,
        item_keys: AD_ITEM_KEYS,
        required: AD_SIGNATURE,
        keywords: &["AD SCAN", "TPR SCAN", "EDLC", "AD PAGE"],
        file_hints: &["ad planner", "adplanner", "ad_planner", "ad plan", "weekly ad"],
        default_dept: None,
        columns: AD_PLANNER_COLUMNS,
    },
    LayoutSpec {
        kind: LayoutKind::MeatPlanner,
        item_keys: AD_ITEM_KEYS,
        required: AD_SIGNATURE,
        keywords: &["AVG WT", "CATCH WEIGHT", "/LB", "PRIMAL", "MEAT"],
        file_hints: &["meat", "beef", "pork", "poultry"],
        default_dept: Some("Meat"),
        columns: MEAT_PLANNER_COLUMNS,
    },
    LayoutSpec {
        kind: LayoutKind::GroceryPlanner,
        item_keys: &["ITEM CODE", "ITEM #", "ITEM NO", "SKU"],
        required: &["ITEM CODE", "DESCRIPTION", "UNIT COST", "AD RETAIL"],
        keywords: &["CASE PACK", "DSD", "WAREHOUSE", "GROCERY"],
        file_hints: &["grocery", "groc"],
        default_dept: Some("Grocery"),
        columns: GROCERY_PLANNER_COLUMNS,
    },
    LayoutSpec {
        kind: LayoutKind::ProducePlanner,
        item_keys: &["ITEM #", "ITEM CODE", "PLU"],
        required: &["ITEM #", "COMMODITY", "FOB", "AD RETAIL"],
        keywords: &["COMMODITY", "FOB", "ORIGIN", "COUNT SIZE", "PLU"],
        file_hints: &["produce", "fruit", "veg"],
        default_dept: Some("Produce"),
        columns: PRODUCE_PLANNER_COLUMNS,
    },
    LayoutSpec {
        kind: LayoutKind::RollingStock,
        item_keys: &["SKU", "ITEM #", "PRODUCT CODE"],
        required: &["SKU", "PRODUCT", "DEAL COST", "RETAIL"],
        keywords: &["ROLLING", "OFF INVOICE", "BILLBACK", "ALLOWANCE"],
        file_hints: &["rolling stock", "rolling_stock", "rollingstock", "rolling"],
        default_dept: None,
        columns: ROLLING_STOCK_COLUMNS,
    },
    LayoutSpec {
        kind: LayoutKind::DeliBakeryPlanner,
        item_keys: AD_ITEM_KEYS,
        required: AD_SIGNATURE,
        keywords: &["DELI", "BAKERY", "SLICE", "SCALE"],
        file_hints: &["deli", "bakery"],
        default_dept: Some("Deli"),
        columns: DELI_BAKERY_COLUMNS,
    },
];

/// Look up the table for a known layout.
pub fn layout_spec(kind: LayoutKind) -> Option<&'static LayoutSpec> {
    LAYOUTS.iter().find(|spec| spec.kind == kind)
}

/// Item-identifier keys used to locate the header of an unknown layout.
pub const GENERIC_ITEM_KEYS: &[&str] = &[
    "ORDER", "ITEM", "SKU", "PRODUCT CODE", "PRODUCT ID", "UPC", "PLU", "ARTICLE",
];

/// Synonyms for the generic mapper, already in compact form (lower-case
/// alphanumerics), in priority order.
pub const GENERIC_COLUMNS: ColumnAliases = &[
    (
        Field::ItemCode,
        &[
            "itemcode", "item", "itemno", "itemnumber", "sku", "ordernumber", "orderno", "order",
            "productcode", "productid", "vendoritem", "articlenumber",
        ],
    ),
    (
        Field::Description,
        &[
            "description", "itemdescription", "itemdesc", "desc", "productdescription",
            "productname", "product", "name",
        ],
    ),
    (Field::Dept, &["dept", "department", "category"]),
    (Field::Upc, &["upc", "upccode", "gtin", "ean", "barcode"]),
    (
        Field::NetUnitCost,
        &["netunitcost", "netcost", "dealcost", "netunit"],
    ),
    (
        Field::Cost,
        &["cost", "unitcost", "regcost", "listcost", "casecost"],
    ),
    (
        Field::AdSrp,
        &["adsrp", "adprice", "adretail", "promoprice", "promoretail", "saleprice"],
    ),
    (
        Field::Srp,
        &["srp", "regsrp", "regretail", "retail", "regprice", "regularprice", "msrp"],
    ),
    (
        Field::VendorFundingPct,
        &[
            "vendorfundingpct", "vendorfunding", "fundingpct", "funding", "allowancepct",
            "allowance",
        ],
    ),
    (Field::Mvmt, &["mvmt", "movement", "velocity", "lift"]),
    (Field::AdScan, &["adscan"]),
    (Field::TprScan, &["tprscan", "tpr"]),
    (Field::EdlcScan, &["edlcscan", "edlc"]),
    (
        Field::CompetitorPrice,
        &["competitorprice", "compprice", "competitor"],
    ),
    (Field::Pack, &["pack", "casepack", "pk"]),
    (Field::Size, &["size", "unitsize"]),
    (
        Field::PromoDates,
        &["promodates", "addates", "promoperiod", "dates"],
    ),
    (
        Field::PromoStart,
        &["promostart", "startdate", "adstart", "promostartdate"],
    ),
    (Field::PromoEnd, &["promoend", "enddate", "adend", "promoenddate"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_layout_has_a_table() {
        for kind in LayoutKind::KNOWN {
            let spec = layout_spec(kind).unwrap();
            assert!(!spec.item_keys.is_empty());
            assert!(!spec.required.is_empty());
        }
        assert!(layout_spec(LayoutKind::Unknown).is_none());
    }

    #[test]
    fn test_every_table_maps_identifier_and_description() {
        for spec in &LAYOUTS {
            let fields: Vec<Field> = spec.columns.iter().map(|(f, _)| *f).collect();
            assert!(fields.contains(&Field::ItemCode), "{}", spec.kind);
            assert!(fields.contains(&Field::Description), "{}", spec.kind);
        }
    }

    #[test]
    fn test_required_tokens_name_an_item() {
        // The detector only evaluates rows containing an item keyword, so
        // every signature must include one.
        for spec in &LAYOUTS {
            assert!(
                spec.required
                    .iter()
                    .any(|t| ITEM_IDENTIFIER_KEYS.iter().any(|k| t.contains(k))),
                "{}",
                spec.kind
            );
        }
    }
}
