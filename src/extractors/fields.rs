// src/extractors/fields.rs
use once_cell::sync::Lazy;

use super::matcher::{Matcher, Predicate, ValuePolicy};
use super::sheet::Sheet;

/// The line items pulled out of every workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Sales,
    TotalAssets,
    Goodwill,
    Provision,
    ResearchDevelopment,
    StockCompensation,
    Plant,
    IntangibleAssets,
    Inventory,
    Ebit,
    AuditorFee,
}

/// A field and the matchers that locate it, tried in priority order.
/// The first matcher that yields a value on a sheet wins.
#[derive(Debug)]
pub struct Concept {
    pub field: Field,
    pub matchers: Vec<Matcher>,
}

impl Concept {
    fn single(field: Field, predicate: Predicate, policy: ValuePolicy) -> Self {
        Self { field, matchers: vec![Matcher::new(predicate, policy)] }
    }

    pub fn find(&self, sheet: &Sheet) -> Option<String> {
        self.matchers.iter().find_map(|m| m.find(sheet))
    }
}

/// Declarative concept table. Labels come from the XBRL-rendered
/// statement sheets EDGAR exports; the value policies differ per concept.
pub static CONCEPTS: Lazy<Vec<Concept>> = Lazy::new(|| {
    use ValuePolicy::*;

    vec![
        Concept::single(Field::Year, Predicate::contains("Document Period End Date"), FixedColumn(1)),
        Concept::single(Field::Sales, Predicate::any_of(&["Net sales", "sales"]), ScanRight),
        Concept::single(Field::TotalAssets, Predicate::contains("Total assets"), ScanRight),
        Concept::single(
            Field::Goodwill,
            Predicate::regex(r"\bGoodwill\b").and_not(Predicate::contains("Impairment")),
            Adjacent { reject_footnote_prefix: true },
        ),
        Concept::single(
            Field::Provision,
            Predicate::any_of(&["provision", "provisions", "provisional"]),
            ScanRight,
        ),
        Concept::single(
            Field::ResearchDevelopment,
            Predicate::contains("Research and development expense"),
            ScanRight,
        ),
        Concept::single(
            Field::StockCompensation,
            Predicate::regex(r"stock[-].*compensation.|compensation[-].*stock.|share[-].*compensation."),
            ScanRight,
        ),
        Concept::single(Field::Plant, Predicate::all_of(&["plant", "property"]), ScanRight),
        Concept::single(
            Field::IntangibleAssets,
            Predicate::any_of(&["Intangible assets", "intangibles", "intangible"]),
            ScanRight,
        ),
        Concept {
            field: Field::Inventory,
            matchers: [r"^\s*Total inventories\s*$", r"inventories.*net", r"inventories"]
                .iter()
                .map(|pattern| {
                    Matcher::new(Predicate::regex(pattern), Adjacent { reject_footnote_prefix: false })
                })
                .collect(),
        },
        Concept::single(Field::Ebit, Predicate::any_of(&["Operating Income", "Income (Loss)"]), AdjacentCommit),
        Concept::single(
            Field::AuditorFee,
            Predicate::contains("Selling, general and administrative expenses"),
            ScanRight,
        ),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE: &[&str] = &["Statement - USD ($) $ in Millions", "12 Months Ended"];

    fn concept(field: Field) -> &'static Concept {
        CONCEPTS.iter().find(|c| c.field == field).unwrap()
    }

    #[test]
    fn test_every_field_has_one_concept() {
        assert_eq!(CONCEPTS.len(), 12);
        for c in CONCEPTS.iter() {
            assert_eq!(CONCEPTS.iter().filter(|o| o.field == c.field).count(), 1);
        }
    }

    #[test]
    fn test_goodwill_ignores_impairment_rows() {
        let sheet = Sheet::from_rows("Balance", &[TITLE, &["Goodwill Impairment", "50"], &["Total Goodwill", "1,200"]]);
        assert_eq!(concept(Field::Goodwill).find(&sheet), Some("1,200".to_string()));

        let only_impairment = Sheet::from_rows("Ops", &[TITLE, &["Goodwill Impairment", "50"]]);
        assert_eq!(concept(Field::Goodwill).find(&only_impairment), None);
    }

    #[test]
    fn test_goodwill_checks_only_next_column() {
        let sheet = Sheet::from_rows("Balance", &[TITLE, &["Goodwill", "", "1,200"]]);
        assert_eq!(concept(Field::Goodwill).find(&sheet), None);
    }

    #[test]
    fn test_inventory_pattern_priority() {
        // "inventories" alone appears first, but the exact total row wins.
        let sheet = Sheet::from_rows(
            "Balance",
            &[
                TITLE,
                &["Inventories", "10"],
                &["Inventories, net of reserves", "20"],
                &["  Total inventories ", "30"],
            ],
        );
        assert_eq!(concept(Field::Inventory).find(&sheet), Some("30".to_string()));

        let sheet = Sheet::from_rows("Balance", &[TITLE, &["Inventories", "10"], &["Inventories, net", "20"]]);
        assert_eq!(concept(Field::Inventory).find(&sheet), Some("20".to_string()));
    }

    #[test]
    fn test_ebit_labels_are_literal() {
        let sheet = Sheet::from_rows("Ops", &[TITLE, &["Net Income (Loss)", "-42"]]);
        assert_eq!(concept(Field::Ebit).find(&sheet), Some("-42".to_string()));
        let sheet = Sheet::from_rows("Ops", &[TITLE, &["Net Income Loss", "-42"]]);
        assert_eq!(concept(Field::Ebit).find(&sheet), None);
    }

    #[test]
    fn test_stock_compensation_pattern() {
        let sheet = Sheet::from_rows("Cash", &[TITLE, &["Stock compensation", "1"], &["Share-based compensation expense", "", "[2]", "88"]]);
        assert_eq!(concept(Field::StockCompensation).find(&sheet), Some("88".to_string()));

        // Needs a character after "compensation".
        let sheet = Sheet::from_rows("Cash", &[TITLE, &["Stock-based compensation", "5"]]);
        assert_eq!(concept(Field::StockCompensation).find(&sheet), None);
    }

    #[test]
    fn test_plant_requires_both_keywords() {
        let sheet = Sheet::from_rows("Balance", &[TITLE, &["Property and equipment", "1"], &["Property, plant and equipment, net", "2"]]);
        assert_eq!(concept(Field::Plant).find(&sheet), Some("2".to_string()));
    }

    #[test]
    fn test_title_row_labels_are_ignored() {
        // EDGAR statement titles name concepts; only the rows below count.
        let sheet = Sheet::from_rows(
            "Ops",
            &[
                &["CONSOLIDATED STATEMENTS OF INCOME (LOSS) - USD ($)", "12 Months Ended"],
                &["", "Dec. 31, 2021"],
                &["Operating income", "5,000"],
            ],
        );
        assert_eq!(concept(Field::Ebit).find(&sheet), Some("5,000".to_string()));

        let sheet = Sheet::from_rows(
            "Notes",
            &[&["Intangible Assets (Details) - USD ($)", "Dec. 31, 2021"], &["Cash", "12"]],
        );
        assert_eq!(concept(Field::IntangibleAssets).find(&sheet), None);
    }

    #[test]
    fn test_provision_matches_substring() {
        let sheet = Sheet::from_rows("Ops", &[TITLE, &["Provisional tax amounts", "[1]", "15"]]);
        assert_eq!(concept(Field::Provision).find(&sheet), Some("15".to_string()));
    }
}
