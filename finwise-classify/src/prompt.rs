//! Prompt rendering and reply parsing for the remote classifier.

use finwise_core::{CategoryTable, Transaction};

use crate::error::ClassifyError;

const PROMPT: &str = r#"You are a financial transaction classifier.

Assign each transaction below to exactly one of these categories:
{CATEGORIES}

Rules:
- Answer with exactly one category name per line.
- Keep the same order as the transactions, one line per transaction.
- Use only the category names listed above. Use "Miscellaneous" when nothing fits.
- Do not add numbering, explanations, or any other text.

Transactions:
{TRANSACTIONS}"#;

/// One line per transaction: `Transaction: <description>, Amount: <abs, 2 decimals>`
pub fn render_transactions(batch: &[Transaction]) -> String {
    batch
        .iter()
        .map(|t| {
            // a line break inside a description would shift every later answer
            let desc = t.description.replace(['\r', '\n'], " ");
            format!("Transaction: {}, Amount: {:.2}", desc, t.abs_amount())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(table: &CategoryTable, batch: &[Transaction]) -> String {
    let categories = table
        .vocabulary()
        .iter()
        .map(|c| format!("- {c}"))
        .collect::<Vec<_>>()
        .join("\n");

    PROMPT
        .replace("{CATEGORIES}", &categories)
        .replace("{TRANSACTIONS}", &render_transactions(batch))
}

/// Split a reply into one category per transaction.
///
/// Blank lines are dropped before counting, so every returned category is non-empty.
/// A reply whose line count differs from `expected` is rejected as a whole. Lines naming a known category in another case get the
/// canonical spelling; anything else is kept as written.
pub fn parse_reply(
    reply: &str,
    expected: usize,
    table: &CategoryTable,
) -> Result<Vec<String>, ClassifyError> {
    let lines: Vec<&str> = reply
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() != expected {
        return Err(ClassifyError::LineCount {
            expected,
            got: lines.len(),
        });
    }

    Ok(lines
        .into_iter()
        .map(|line| table.canonical_name(line).unwrap_or(line).to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Vec<Transaction> {
        vec![
            Transaction::new("tx-0", "2024-03-15", "STARBUCKS #123", -4.5),
            Transaction::new("tx-1", "2024-03-16", "Paycheck\nDeposit", 2500.0),
        ]
    }

    #[test]
    fn test_render_lines() {
        assert_eq!(
            render_transactions(&batch()),
            "Transaction: STARBUCKS #123, Amount: 4.50\nTransaction: Paycheck Deposit, Amount: 2500.00"
        );
    }

    #[test]
    fn test_prompt_lists_full_vocabulary() {
        let table = CategoryTable::canonical();
        let prompt = build_prompt(&table, &batch());
        for name in table.vocabulary() {
            assert!(prompt.contains(&format!("- {name}\n")), "missing {name}");
        }
        assert!(prompt.ends_with("Transaction: Paycheck Deposit, Amount: 2500.00"));
        assert_eq!(prompt.matches("\nTransaction: ").count(), 2);
    }

    #[test]
    fn test_parse_reply_trims_and_skips_blanks() {
        let table = CategoryTable::canonical();
        let cats = parse_reply("  Food & Dining \n\n income\n", 2, &table).unwrap();
        assert_eq!(cats, vec!["Food & Dining", "Income"]);
    }

    #[test]
    fn test_parse_reply_never_yields_empty_category() {
        let table = CategoryTable::canonical();
        let cats = parse_reply("\n   \nShopping\n\t\nmiscellaneous\n\n", 2, &table).unwrap();
        assert_eq!(cats, vec!["Shopping", "Miscellaneous"]);
        assert!(parse_reply(" \n \n", 2, &table).is_err());
    }

    #[test]
    fn test_parse_reply_keeps_unknown_labels() {
        let table = CategoryTable::canonical();
        let cats = parse_reply("Coffee Shops\nMiscellaneous", 2, &table).unwrap();
        assert_eq!(cats, vec!["Coffee Shops", "Miscellaneous"]);
    }

    #[test]
    fn test_parse_reply_rejects_count_mismatch() {
        let table = CategoryTable::canonical();
        let err = parse_reply("Shopping", 2, &table).unwrap_err();
        assert!(matches!(err, ClassifyError::LineCount { expected: 2, got: 1 }));
        assert!(parse_reply("A\nB\nC", 2, &table).is_err());
    }
}
