//! Redlist assembly and output.
//!
//! The redlist is the foreign subset of the classification results, kept in
//! the order the addresses first appeared in the listing. Nothing is sorted
//! or grouped.

mod output;

use crate::config::{OutputLayout, NO_EXTERNAL_ADDRESSES};
use crate::geo::{Classification, LookupOutcome};

/// Foreign classifications in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redlist {
    entries: Vec<Classification>,
}

impl Redlist {
    /// Keeps the classified, foreign outcomes. Skipped addresses never appear.
    pub fn from_outcomes(outcomes: &[LookupOutcome]) -> Self {
        let entries = outcomes
            .iter()
            .filter_map(LookupOutcome::classification)
            .filter(|c| c.is_foreign)
            .cloned()
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[Classification] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `address,countryCode,countryName`
    pub fn entry_line(entry: &Classification) -> String {
        format!(
            "{},{},{}",
            entry.address, entry.country_code, entry.country_name
        )
    }

    /// Report lines: one per entry, or the placeholder when empty.
    pub fn lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            vec![NO_EXTERNAL_ADDRESSES.to_string()]
        } else {
            self.entries.iter().map(Self::entry_line).collect()
        }
    }

    /// Contents of the output artifact.
    pub fn render(&self, layout: OutputLayout) -> String {
        match layout {
            OutputLayout::Lines => self.lines().into_iter().fold(String::new(), |mut acc, l| {
                acc.push_str(&l);
                acc.push('\n');
                acc
            }),
            OutputLayout::Concatenated => self.lines().concat(),
        }
    }

    /// Prints the human-readable report to stdout.
    pub fn print_report(&self, home_country: &str) {
        let header = format!("IP Red List for originations outside {home_country}:");
        println!();
        println!("{header}");
        println!("{}", "-".repeat(header.len()));
        for line in self.lines() {
            println!("{line}");
        }
    }
}
