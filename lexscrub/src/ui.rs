// lexscrub/src/ui.rs
//! Terminal rendering for scrub results and lexicon statistics.

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;

use lexscrub_core::{MemoryLexiconStore, ScrubResult, Severity};

/// Renders the removal/append summary of one scrub result.
pub fn render_summary(result: &ScrubResult) -> String {
    let mut out = String::new();

    if result.removed_by_category.is_empty() {
        out.push_str(&format!("{}\n", "No lexicon matches removed.".dimmed()));
    } else {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Category", "Removed"]);
        for (category, removed) in &result.removed_by_category {
            table.add_row(vec![
                Cell::new(category),
                Cell::new(removed.join(", ")),
            ]);
        }
        out.push_str(&format!("{table}\n"));
    }

    if !result.appended_keywords.is_empty() {
        out.push_str(&format!(
            "{} {}\n",
            "Appended:".green(),
            result.appended_keywords.join(", ")
        ));
    }

    out
}

/// Renders per-category entry counts of a loaded lexicon store.
pub fn render_lexicon_stats(store: &MemoryLexiconStore) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Category", "Active", "Inactive", "High severity"]);

    let mut categories: Vec<&str> = store
        .all_entries()
        .iter()
        .map(|e| e.category.as_str())
        .collect();
    categories.sort();
    categories.dedup();

    for category in categories {
        let entries = store
            .all_entries()
            .iter()
            .filter(|e| e.category == category);
        let (mut active, mut inactive, mut high) = (0usize, 0usize, 0usize);
        for entry in entries {
            if entry.active {
                active += 1;
            } else {
                inactive += 1;
            }
            if entry.severity == Severity::High {
                high += 1;
            }
        }
        table.add_row(vec![
            Cell::new(category),
            Cell::new(active),
            Cell::new(inactive),
            Cell::new(high),
        ]);
    }

    format!(
        "{table}\n{} entries, {} aliases\n",
        store.all_entries().len(),
        store.all_aliases().len()
    )
}
