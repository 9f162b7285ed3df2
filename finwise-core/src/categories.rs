//! Category vocabulary and the deterministic keyword classifier.
//!
//! One `CategoryTable` feeds both the keyword rules and the vocabulary listed in the
//! remote classifier prompt, so the two modes always name categories the same way.

use std::collections::HashSet;

use crate::transaction::Transaction;

/// Keyword classifier result when no rule fires
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Remote-only catch-all, appended after the table categories in the vocabulary
pub const MISCELLANEOUS: &str = "Miscellaneous";

/// Table order is the tie-break order: the first category with a matching keyword wins.
const CANONICAL_RULES: &[(&str, &[&str])] = &[
    (
        "Food & Dining",
        &[
            "starbucks", "mcdonald", "restaurant", "cafe", "coffee", "pizza", "burger",
            "doordash", "grubhub", "uber eats", "chipotle", "dunkin", "kfc", "taco bell",
            "diner", "bakery",
        ],
    ),
    (
        "Shopping",
        &[
            "amazon", "walmart", "target", "ebay", "best buy", "etsy", "ikea", "macy", "shop",
            "mall",
        ],
    ),
    (
        "Groceries",
        &[
            "grocery", "supermarket", "whole foods", "trader joe", "kroger", "aldi", "safeway",
            "publix", "wegmans", "market",
        ],
    ),
    (
        "Transportation",
        &[
            "uber", "lyft", "taxi", "metro", "transit", "parking", "shell", "chevron", "exxon",
            "gas station", "fuel", "toll", "bus fare", "amtrak",
        ],
    ),
    (
        "Travel",
        &[
            "airline", "airbnb", "hotel", "expedia", "booking.com", "marriott", "hilton",
            "flight",
        ],
    ),
    (
        "Bills & Utilities",
        &[
            "electric", "water bill", "utility", "internet", "comcast", "verizon", "at&t",
            "t-mobile", "phone bill", "wifi",
        ],
    ),
    (
        "Housing",
        &["rent", "mortgage", "apartment", "lease", "landlord", "hoa"],
    ),
    (
        "Entertainment",
        &[
            "netflix", "spotify", "hulu", "disney+", "youtube", "cinema", "theatre", "movie",
            "steam", "concert",
        ],
    ),
    (
        "Health & Fitness",
        &[
            "pharmacy", "cvs", "walgreens", "hospital", "clinic", "doctor", "dental", "gym",
            "fitness", "medical",
        ],
    ),
    (
        "Insurance",
        &["insurance", "geico", "allstate", "state farm", "premium"],
    ),
    (
        "Education",
        &["tuition", "school", "college", "university", "udemy", "coursera"],
    ),
    (
        "Subscriptions",
        &["subscription", "membership", "recurring", "patreon"],
    ),
    (
        "Income",
        &[
            "salary", "payroll", "paycheck", "direct dep", "deposit", "interest earned",
            "refund",
        ],
    ),
    (
        "Transfers",
        &["transfer", "zelle", "venmo", "paypal", "wire", "cash app"],
    ),
    (
        "Bank Fees",
        &["atm", "overdraft", "service fee", "late fee", "fee", "interest charge"],
    ),
    (
        "Charity & Donations",
        &["donation", "charity", "red cross", "unicef", "gofundme"],
    ),
];

/// One category and the keywords that select it
#[derive(Debug, Clone, PartialEq)]
struct CategoryRule {
    name: String,
    /// Lowercase substrings, checked in order
    keywords: Vec<String>,
}

/// Immutable, ordered category table. Build once and share it between classifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

impl CategoryTable {
    /// Build a table from `(category, keywords)` pairs; keywords are lower-cased.
    pub fn new<I, K>(rules: I) -> Self
    where
        I: IntoIterator<Item = (String, K)>,
        K: IntoIterator<Item = String>,
    {
        let rules = rules
            .into_iter()
            .map(|(name, keywords)| CategoryRule {
                name,
                keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();
        Self { rules }
    }

    /// The 16-category table both classification modes use by default
    pub fn canonical() -> Self {
        Self::new(CANONICAL_RULES.iter().map(|(name, keywords)| {
            (
                name.to_string(),
                keywords.iter().map(|k| k.to_string()).collect::<Vec<_>>(),
            )
        }))
    }

    /// Category names in table order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    /// Names offered to the remote classifier: the table plus `Miscellaneous`
    pub fn vocabulary(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.names().collect();
        if !out.contains(&MISCELLANEOUS) {
            out.push(MISCELLANEOUS);
        }
        out
    }

    /// Canonical spelling of `name` if it is in the vocabulary, ignoring case
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        let wanted = name.trim();
        self.vocabulary()
            .into_iter()
            .find(|v| v.eq_ignore_ascii_case(wanted))
    }

    /// Keyword classification: first category (table order) whose keyword
    /// (list order) is a substring of the lower-cased description.
    pub fn categorize(&self, description: &str) -> &str {
        let desc = description.to_lowercase();
        for rule in &self.rules {
            if rule.keywords.iter().any(|k| desc.contains(k.as_str())) {
                return &rule.name;
            }
        }
        UNCATEGORIZED
    }

    /// Keyword-classify every transaction in place
    pub fn assign_categories(&self, transactions: &mut [Transaction]) {
        for txn in transactions {
            txn.category = self.categorize(&txn.description).to_string();
        }
    }

    /// Every name the keyword classifier can return
    pub fn keyword_outputs(&self) -> HashSet<&str> {
        let mut out: HashSet<&str> = self.names().collect();
        out.insert(UNCATEGORIZED);
        out
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::canonical()
    }
}
