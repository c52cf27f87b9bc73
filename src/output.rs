//! Table rendering shared by the subcommands.

use domlens_core::ElementInfo;

const TEXT_WIDTH: usize = 30;

/// Print element rows under a header. `names` are shown when given.
pub(crate) fn print_table(rows: &[(Option<&str>, &ElementInfo)]) {
    println!(
        "{:<12} {:<10} {:<48} {}",
        "NAME", "TAG", "SELECTOR", "TEXT"
    );
    println!("{}", "-".repeat(100));
    for (name, info) in rows {
        println!(
            "{:<12} {:<10} {:<48} {}",
            name.unwrap_or("-"),
            info.tag,
            info.selector.as_deref().unwrap_or("-"),
            shorten(&info.text, TEXT_WIDTH)
        );
    }
}

/// Collapse whitespace and cut to `max` characters.
pub(crate) fn shorten(text: &str, max: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
