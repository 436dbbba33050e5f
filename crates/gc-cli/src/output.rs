//! Terminal output formatting.

use colored::Colorize;
use gc_core::event::model::Event;
use gc_core::group::model::Group;

/// Print groups as a table.
pub fn print_groups_table(groups: &[Group]) {
    if groups.is_empty() {
        println!("{}", "No groups found.".dimmed());
        return;
    }

    println!("{:<8} {:<30} {:<10} {:<8}", "ID", "Name", "BSD ID", "Members");
    println!("{}", "─".repeat(60));

    for group in groups {
        println!(
            "{:<8} {:<30} {:<10} {:<8}",
            group.id,
            truncate(group.name.as_deref().unwrap_or("-"), 28),
            group
                .bsd_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            group.person_ids.len()
        );
    }
}

/// Print events as a table.
pub fn print_events_table(events: &[Event]) {
    if events.is_empty() {
        println!("{}", "No events found.".dimmed());
        return;
    }

    println!("{:<8} {:<30} {:<20} {:<20}", "ID", "Name", "City", "Starts");
    println!("{}", "─".repeat(80));

    for event in events {
        let details = &event.details;
        println!(
            "{:<8} {:<30} {:<20} {:<20}",
            event.id,
            truncate(details.name.as_deref().unwrap_or("-"), 28),
            truncate(details.venue_city.as_deref().unwrap_or("-"), 18),
            details.start_datetime.as_deref().unwrap_or("-").dimmed()
        );
    }
}

/// Truncate to `max` characters, marking the cut with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
