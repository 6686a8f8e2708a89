// 🏷️ Points Rules - Rules as Data
// Each rule scores one aspect of a receipt; the receipt's points are their sum

use crate::receipt::{Item, Receipt};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// Afternoon window in minutes since midnight: [14:00, 16:00)
const AFTERNOON_START: i64 = 14 * 60;
const AFTERNOON_END: i64 = 16 * 60;

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsRule {
    /// +1 per ASCII letter or digit in the retailer name
    RetailerName,
    /// +50 when the total has no cents
    RoundDollarTotal,
    /// +25 when the total is a multiple of 0.25
    QuarterTotal,
    /// +5 per pair of items
    ItemPairs,
    /// ceil(price * 0.2) per item whose trimmed description length is a multiple of 3
    DescriptionLength,
    /// +6 when the purchase day is odd
    OddPurchaseDay,
    /// +10 when purchased in the afternoon window
    AfternoonPurchase,
}

impl PointsRule {
    /// Every rule, in evaluation order
    pub const ALL: [PointsRule; 7] = [
        PointsRule::RetailerName,
        PointsRule::RoundDollarTotal,
        PointsRule::QuarterTotal,
        PointsRule::ItemPairs,
        PointsRule::DescriptionLength,
        PointsRule::OddPurchaseDay,
        PointsRule::AfternoonPurchase,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PointsRule::RetailerName => "retailer_name",
            PointsRule::RoundDollarTotal => "round_dollar_total",
            PointsRule::QuarterTotal => "quarter_total",
            PointsRule::ItemPairs => "item_pairs",
            PointsRule::DescriptionLength => "description_length",
            PointsRule::OddPurchaseDay => "odd_purchase_day",
            PointsRule::AfternoonPurchase => "afternoon_purchase",
        }
    }

    /// Points this rule awards. Never fails: unparsable numbers count as zero.
    pub fn apply(&self, receipt: &Receipt) -> u64 {
        match self {
            PointsRule::RetailerName => retailer_points(&receipt.retailer),
            PointsRule::RoundDollarTotal => {
                if parse_amount(&receipt.total).fract().is_zero() {
                    50
                } else {
                    0
                }
            }
            PointsRule::QuarterTotal => {
                let quarter = Decimal::new(25, 2);
                match parse_amount(&receipt.total).checked_rem(quarter) {
                    Some(rem) if rem.is_zero() => 25,
                    _ => 0,
                }
            }
            PointsRule::ItemPairs => (receipt.items.len() as u64 / 2).saturating_mul(5),
            PointsRule::DescriptionLength => receipt
                .items
                .iter()
                .map(description_points)
                .fold(0, u64::saturating_add),
            PointsRule::OddPurchaseDay => odd_day_points(&receipt.purchase_date),
            PointsRule::AfternoonPurchase => afternoon_points(&receipt.purchase_time),
        }
    }
}

impl fmt::Display for PointsRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// ============================================================================
// RULE HELPERS
// ============================================================================

/// Decimal value of an amount; anything unparsable is zero
fn parse_amount(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap_or(Decimal::ZERO)
}

/// Integer value of a date/time component; anything unparsable is zero
fn parse_component(text: &str) -> i64 {
    text.parse().unwrap_or(0)
}

fn retailer_points(retailer: &str) -> u64 {
    retailer.chars().filter(|c| c.is_ascii_alphanumeric()).count() as u64
}

fn description_points(item: &Item) -> u64 {
    // An empty trimmed description also counts (0 is a multiple of 3).
    if item.short_description.trim().len() % 3 != 0 {
        return 0;
    }

    parse_amount(&item.price)
        .checked_mul(Decimal::new(2, 1))
        .and_then(|points| points.ceil().to_u64())
        .unwrap_or(0)
}

fn odd_day_points(purchase_date: &str) -> u64 {
    let parts: Vec<&str> = purchase_date.split('-').collect();
    if parts.len() != 3 {
        return 0;
    }

    if parse_component(parts[2]) % 2 != 0 {
        6
    } else {
        0
    }
}

fn afternoon_points(purchase_time: &str) -> u64 {
    let parts: Vec<&str> = purchase_time.split(':').collect();
    if parts.len() != 2 {
        return 0;
    }

    let minutes = parse_component(parts[0])
        .saturating_mul(60)
        .saturating_add(parse_component(parts[1]));

    if (AFTERNOON_START..AFTERNOON_END).contains(&minutes) {
        10
    } else {
        0
    }
}

// ============================================================================
// BREAKDOWN
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleContribution {
    pub rule: PointsRule,
    pub points: u64,
}

/// Per-rule contributions for one receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub contributions: Vec<RuleContribution>,
}

impl PointsBreakdown {
    pub fn total(&self) -> u64 {
        self.contributions
            .iter()
            .map(|c| c.points)
            .fold(0, u64::saturating_add)
    }
}

// ============================================================================
// SCORER
// ============================================================================

/// Score every rule separately
pub fn breakdown(receipt: &Receipt) -> PointsBreakdown {
    let contributions = PointsRule::ALL
        .iter()
        .map(|rule| RuleContribution {
            rule: *rule,
            points: rule.apply(receipt),
        })
        .collect();

    PointsBreakdown { contributions }
}

/// Total points for a validated receipt. Deterministic; never fails.
pub fn score(receipt: &Receipt) -> u64 {
    PointsRule::ALL
        .iter()
        .map(|rule| rule.apply(receipt))
        .fold(0, u64::saturating_add)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::sample_receipt;
    use rstest::rstest;

    fn receipt_with(edit: impl FnOnce(&mut Receipt)) -> Receipt {
        let mut receipt = sample_receipt();
        edit(&mut receipt);
        receipt
    }

    #[test]
    fn test_sample_receipt_scores_28() {
        // 6 (Target) + 10 (two pairs) + 3 + 3 (descriptions of 18 and 24) + 6 (day 01)
        let receipt = sample_receipt();
        assert_eq!(score(&receipt), 28);
        assert_eq!(score(&receipt), score(&receipt));
    }

    #[test]
    fn test_breakdown_matches_score() {
        let receipt = sample_receipt();
        let breakdown = breakdown(&receipt);

        assert_eq!(breakdown.contributions.len(), PointsRule::ALL.len());
        assert_eq!(breakdown.total(), score(&receipt));

        let points_for = |rule: PointsRule| {
            breakdown
                .contributions
                .iter()
                .find(|c| c.rule == rule)
                .map(|c| c.points)
        };
        assert_eq!(points_for(PointsRule::RetailerName), Some(6));
        assert_eq!(points_for(PointsRule::ItemPairs), Some(10));
        assert_eq!(points_for(PointsRule::DescriptionLength), Some(6));
        assert_eq!(points_for(PointsRule::OddPurchaseDay), Some(6));
        assert_eq!(points_for(PointsRule::AfternoonPurchase), Some(0));
    }

    #[test]
    fn test_corner_market_receipt() {
        let receipt = Receipt {
            retailer: "M&M Corner Market".to_string(),
            purchase_date: "2022-03-20".to_string(),
            purchase_time: "14:33".to_string(),
            items: vec![
                Item::new("Gatorade", "2.25"),
                Item::new("Gatorade", "2.25"),
                Item::new("Gatorade", "2.25"),
                Item::new("Gatorade", "2.25"),
            ],
            total: "9.00".to_string(),
        };

        // 14 + 50 + 25 + 10 + 10
        assert_eq!(score(&receipt), 109);
    }

    #[test]
    fn test_retailer_counts_only_alphanumerics() {
        let receipt = receipt_with(|r| r.retailer = "M&M Corner_Market - 2".to_string());
        assert_eq!(PointsRule::RetailerName.apply(&receipt), 15);
    }

    #[rstest]
    #[case("100.00", 50, 25)]
    #[case("12.25", 0, 25)]
    #[case("12.50", 0, 25)]
    #[case("12.75", 0, 25)]
    #[case("35.35", 0, 0)]
    #[case("0.00", 50, 25)]
    fn test_total_rules(#[case] total: &str, #[case] round: u64, #[case] quarter: u64) {
        let receipt = receipt_with(|r| r.total = total.to_string());
        assert_eq!(PointsRule::RoundDollarTotal.apply(&receipt), round);
        assert_eq!(PointsRule::QuarterTotal.apply(&receipt), quarter);
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 5)]
    #[case(3, 5)]
    #[case(6, 15)]
    fn test_item_pairs(#[case] count: usize, #[case] expected: u64) {
        let receipt = receipt_with(|r| r.items = vec![Item::new("Gum", "1.00"); count]);
        assert_eq!(PointsRule::ItemPairs.apply(&receipt), expected);
    }

    #[test]
    fn test_description_rule_uses_trimmed_length_and_ceil() {
        let receipt = receipt_with(|r| {
            r.items = vec![
                Item::new("  abc  ", "5.00"),  // 1.0 -> 1
                Item::new("abcdef", "5.01"),   // 1.002 -> 2
                Item::new("abcd", "100.00"),   // not a multiple of 3
            ]
        });
        assert_eq!(PointsRule::DescriptionLength.apply(&receipt), 3);
    }

    #[test]
    fn test_blank_description_counts_as_multiple_of_three() {
        let receipt = receipt_with(|r| r.items = vec![Item::new("   ", "10.00")]);
        assert_eq!(PointsRule::DescriptionLength.apply(&receipt), 2);
    }

    #[rstest]
    #[case("2022-01-01", 6)]
    #[case("2022-01-31", 6)]
    #[case("2022-01-02", 0)]
    #[case("2022/01/01", 0)]
    #[case("2022-01-xx", 0)]
    fn test_odd_day(#[case] date: &str, #[case] expected: u64) {
        let receipt = receipt_with(|r| r.purchase_date = date.to_string());
        assert_eq!(PointsRule::OddPurchaseDay.apply(&receipt), expected);
    }

    #[rstest]
    #[case("13:59", 0)]
    #[case("14:00", 10)]
    #[case("15:59", 10)]
    #[case("16:00", 0)]
    #[case("14:00:00", 0)]
    fn test_afternoon_window(#[case] time: &str, #[case] expected: u64) {
        let receipt = receipt_with(|r| r.purchase_time = time.to_string());
        assert_eq!(PointsRule::AfternoonPurchase.apply(&receipt), expected);
    }

    #[test]
    fn test_unparsable_numbers_count_as_zero() {
        let receipt = Receipt {
            retailer: "".to_string(),
            purchase_date: "x-y-z".to_string(),
            purchase_time: "aa:bb".to_string(),
            items: vec![Item::new("abc", "not-a-price")],
            total: "nope".to_string(),
        };

        // An unparsable total reads as zero, which is round and a quarter multiple.
        assert_eq!(score(&receipt), 75);
    }
}
