//! Small presentational pieces shared by the list pages.

use dioxus::prelude::*;

use crate::icons::FaInbox;
use crate::Icon;

/// Colour class for a status label. Unknown labels are neutral.
pub fn status_tone(status: &str) -> &'static str {
    match status {
        "Completed" | "Paid" | "Resolved" | "Confirmed" | "Accepted" | "Active"
        | "Shortlisted" => "tone-green",
        "In Progress" | "Under Review" | "Reviewed" | "Interview" => "tone-blue",
        "Pending" | "New" | "Draft" | "Medium" => "tone-orange",
        "On Hold" | "Overdue" | "Rejected" | "Cancelled" | "Urgent" | "High" => "tone-red",
        "Planning" => "tone-purple",
        _ => "tone-gray",
    }
}

/// `1234.5` as `$1,234.50`, whole amounts without cents.
pub fn format_money(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if frac == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{frac:02}")
    }
}

#[component]
pub fn StatusBadge(status: String) -> Element {
    let tone = status_tone(&status);
    rsx! {
        span { class: "badge {tone}", "{status}" }
    }
}

#[component]
pub fn Spinner(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "loading-state",
            span { class: "spinner" }
            span { "{label}" }
        }
    }
}

#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        div {
            class: "empty-state",
            Icon { icon: FaInbox, width: 28, height: 28 }
            p { "{message}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0");
        assert_eq!(format_money(999.0), "$999");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(1_000_000.0), "$1,000,000");
        assert_eq!(format_money(-45.0), "-$45");
    }

    #[test]
    fn test_status_tone() {
        assert_eq!(status_tone("Paid"), "tone-green");
        assert_eq!(status_tone("On Hold"), "tone-red");
        assert_eq!(status_tone("Something else"), "tone-gray");
    }
}
