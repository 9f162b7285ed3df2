//! Spend-by-category aggregation over a categorized transaction set.

use std::collections::HashMap;

use crate::categories::UNCATEGORIZED;
use crate::transaction::{CategoryStat, Transaction};

/// Group transactions by category and rank the groups by total, largest first.
///
/// Percentages are taken against the signed sum of every amount, so a set that mixes
/// debits and credits can produce shares above 100 or below 0. Ties keep the order in
/// which categories first appear.
pub fn category_stats(transactions: &[Transaction]) -> Vec<CategoryStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<CategoryStat> = Vec::new();

    for txn in transactions {
        let category = if txn.is_categorized() {
            txn.category.as_str()
        } else {
            UNCATEGORIZED
        };

        let slot = *index.entry(category).or_insert_with(|| {
            stats.push(CategoryStat {
                category: category.to_string(),
                count: 0,
                total: 0.0,
                percentage: 0.0,
            });
            stats.len() - 1
        });

        let stat = &mut stats[slot];
        stat.count += 1;
        stat.total += txn.amount;
    }

    let denominator = grand_total(transactions);
    for stat in &mut stats {
        stat.percentage = if denominator == 0.0 {
            0.0
        } else {
            stat.total / denominator * 100.0
        };
    }

    // sort_by is stable, so equal totals stay in first-occurrence order
    stats.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stats
}

/// Signed sum of all amounts, the denominator used for percentages
pub fn grand_total(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(|t| t.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(i: usize, desc: &str, amount: f64, category: &str) -> Transaction {
        Transaction::new(Transaction::sequence_id(i), "2024-01-01", desc, amount)
            .with_category(category)
    }

    #[test]
    fn test_two_category_split() {
        let txns = vec![txn(0, "a", 100.0, "Income"), txn(1, "b", 50.0, "Transfers")];
        let stats = category_stats(&txns);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].category, "Income");
        assert!((stats[0].percentage - 66.666).abs() < 0.01);
        assert!((stats[1].percentage - 33.333).abs() < 0.01);
    }

    #[test]
    fn test_counts_cover_every_transaction() {
        let txns = vec![
            txn(0, "a", -4.5, "Food & Dining"),
            txn(1, "b", -12.0, "Transportation"),
            txn(2, "c", -3.0, "Food & Dining"),
            txn(3, "d", 20.0, ""),
        ];
        let stats = category_stats(&txns);
        let count: usize = stats.iter().map(|s| s.count).sum();
        assert_eq!(count, txns.len());

        for w in stats.windows(2) {
            assert!(w[0].total >= w[1].total, "stats not sorted by total");
        }

        let uncategorized = stats.iter().find(|s| s.category == UNCATEGORIZED).unwrap();
        assert_eq!(uncategorized.count, 1);
        assert_eq!(uncategorized.total, 20.0);
    }

    #[test]
    fn test_totals_are_signed() {
        let txns = vec![
            txn(0, "a", -30.0, "Shopping"),
            txn(1, "b", 10.0, "Shopping"),
            txn(2, "c", 100.0, "Income"),
        ];
        let stats = category_stats(&txns);
        let shopping = stats.iter().find(|s| s.category == "Shopping").unwrap();
        assert_eq!(shopping.total, -20.0);
        // grand total is 80, so income is 125% of it
        assert!((stats[0].percentage - 125.0).abs() < 1e-9);
        assert!((shopping.percentage + 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let txns = vec![
            txn(0, "a", 10.0, "Travel"),
            txn(1, "b", 10.0, "Housing"),
            txn(2, "c", 10.0, "Education"),
        ];
        let order: Vec<String> = category_stats(&txns).into_iter().map(|s| s.category).collect();
        assert_eq!(order, vec!["Travel", "Housing", "Education"]);
    }

    #[test]
    fn test_zero_grand_total() {
        let txns = vec![txn(0, "a", 10.0, "Income"), txn(1, "b", -10.0, "Shopping")];
        let stats = category_stats(&txns);
        assert!(stats.iter().all(|s| s.percentage == 0.0));
        assert_eq!(grand_total(&txns), 0.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(category_stats(&[]).is_empty());
    }
}
