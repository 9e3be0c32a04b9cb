//! Show attribute name mappings.

use html2react_core::attributes::{map_attribute, mapped_names};

/// Format `name -> prop` lines for the given names, or for the whole table.
pub fn mapping_lines(names: &[String]) -> Vec<String> {
    if names.is_empty() {
        let mut table: Vec<_> = mapped_names().collect();
        table.sort_unstable();
        return table
            .into_iter()
            .map(|(html, react)| format!("{html} -> {react}"))
            .collect();
    }

    names
        .iter()
        .map(|name| format!("{name} -> {}", map_attribute(name)))
        .collect()
}

/// Run the attrs command.
pub fn run(names: &[String]) {
    for line in mapping_lines(names) {
        println!("{line}");
    }
}
