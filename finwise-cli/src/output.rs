use finwise_core::{CategoryStat, Transaction};
use finwise_ingest::ColumnGuess;

pub fn print_columns(headers: &[String], guess: &ColumnGuess) {
    println!("Headers ({}):", headers.len());
    for h in headers {
        println!("  - {h}");
    }

    println!("\nSuggested mapping:");
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "(not detected)".to_string());
    println!("  date:        {}", show(&guess.date));
    println!("  description: {}", show(&guess.description));
    println!("  amount:      {}", show(&guess.amount));
}

pub fn print_transactions(txns: &[Transaction]) {
    println!(
        "{:<8} {:<12} {:<40} {:>12}  {}",
        "ID", "DATE", "DESCRIPTION", "AMOUNT", "CATEGORY"
    );
    for t in txns {
        println!(
            "{:<8} {:<12} {:<40} {:>12.2}  {}",
            t.id,
            t.date,
            truncate(&t.description, 40),
            t.amount,
            t.category
        );
    }
}

pub fn print_stats(stats: &[CategoryStat]) {
    println!(
        "{:<22} {:>6} {:>14} {:>9}",
        "CATEGORY", "COUNT", "TOTAL", "SHARE"
    );
    for s in stats {
        println!(
            "{:<22} {:>6} {:>14.2} {:>8.1}%",
            s.category, s.count, s.total, s.percentage
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
