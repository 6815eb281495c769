//! Plain-text rendering for CLI output.

use hrportal_rs::core::filter::Page;
use hrportal_rs::core::pages::SkillRow;
use hrportal_rs::core::presentation::{
    AnnouncementCategory, Badge, DocumentStatus, NotificationKind, Priority, Tone,
    progress_width, rate_tone,
};
use hrportal_rs::core::toast::Toast;
use hrportal_rs::core::{Sender, TranscriptMessage, UploadOutcome};
use hrportal_rs::protocol::{
    Announcement, CareerAnalytics, EmployeeDocument, OnboardingAnalytics, OnboardingNotification,
};

const BAR_CELLS: usize = 20;

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Success => "+",
        Tone::Danger => "!",
        Tone::Warning => "~",
        Tone::Info => "*",
        Tone::Neutral => "-",
    }
}

fn badge(badge: Badge) -> String {
    format!("[{} {}]", tone_marker(badge.tone), badge.icon)
}

/// Fixed-width bar for a percentage.
fn bar(percent: f64) -> String {
    let filled = usize::from(progress_width(percent)) * BAR_CELLS / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_CELLS - filled))
}

pub fn announcements(page: &Page<Announcement>) {
    if page.items.is_empty() {
        println!("No announcements.");
        return;
    }
    for announcement in &page.items {
        let category = AnnouncementCategory::parse(announcement.category.as_deref());
        let priority = Priority::parse(announcement.priority.as_deref());
        let ack = if announcement.acknowledged { " (acknowledged)" } else { "" };
        println!(
            "#{} {} {} {} [{}]{}",
            announcement.id,
            badge(category.badge()),
            badge(priority.badge()),
            announcement.title,
            category.label(),
            ack
        );
        println!("    {}", announcement.content);
    }
    println!(
        "page {}/{} ({} total)",
        page.page, page.total_pages, page.total_items
    );
}

pub fn documents(documents: &[EmployeeDocument]) {
    if documents.is_empty() {
        println!("No documents.");
        return;
    }
    for document in documents {
        let status = DocumentStatus::of(document);
        let confidence = document
            .ocr_confidence
            .map(|confidence| format!(" ocr={confidence:.1}%"))
            .unwrap_or_default();
        println!(
            "#{} {} {} {}{}",
            document.id,
            badge(status.badge()),
            document.document_type,
            status.label(),
            confidence
        );
    }
}

pub fn upload(outcome: &UploadOutcome) {
    let document = outcome.document();
    match outcome {
        UploadOutcome::Verified(_) => println!("Uploaded #{}: verified", document.id),
        UploadOutcome::PendingReview(_) => {
            println!("Uploaded #{}: awaiting review", document.id)
        }
        UploadOutcome::NeedsResubmission { reason, .. } => {
            println!("Uploaded #{}: needs resubmission ({reason})", document.id)
        }
    }
}

pub fn notifications(notifications: &[OnboardingNotification], unread: usize) {
    println!("{unread} unread");
    for notification in notifications {
        let kind = NotificationKind::parse(notification.notification_type.as_deref());
        let marker = if notification.is_read { " " } else { "*" };
        println!(
            "{marker} #{} {} {}: {}",
            notification.id,
            badge(kind.badge()),
            notification.title,
            notification.message
        );
    }
}

pub fn skills(rows: &[SkillRow]) {
    if rows.is_empty() {
        println!("No skills assessed yet.");
        return;
    }
    for row in rows {
        println!(
            "{} {:<24} {} {:>3}% -> {:>3}% (gap {:.0})",
            tone_marker(row.tone),
            row.name,
            bar(f64::from(row.current_width)),
            row.current_width,
            row.target_width,
            row.gap
        );
    }
}

pub fn career_analytics(analytics: &CareerAnalytics) {
    println!("Employees: {}", analytics.total_employees);
    println!(
        "Internal mobility {} {:.1}%",
        bar(analytics.internal_mobility_rate),
        analytics.internal_mobility_rate
    );
    println!(
        "Career satisfaction: {:.1}",
        analytics.career_satisfaction_score
    );
}

pub fn onboarding_analytics(analytics: &OnboardingAnalytics) {
    println!(
        "Onboarding: {} total, {} completed, {} in progress",
        analytics.total_onboarding, analytics.completed, analytics.in_progress
    );
    println!(
        "{} completion {} {:.1}%",
        tone_marker(rate_tone(analytics.completion_rate)),
        bar(analytics.completion_rate),
        analytics.completion_rate
    );
}

pub fn toast(toast: &Toast) {
    println!("({}) {}", toast.kind.as_str(), toast.message);
}

pub fn transcript_message(message: &TranscriptMessage) {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Assistant => "assistant",
    };
    println!("{who}: {}", message.text);
}

pub fn suggestions(suggestions: &[String]) {
    if suggestions.is_empty() {
        return;
    }
    println!("Try asking:");
    for suggestion in suggestions {
        println!("  - {suggestion}");
    }
}

#[cfg(test)]
mod tests {
    use super::bar;
    use pretty_assertions::assert_eq;

    #[test]
    fn bar_is_clamped_and_fixed_width() {
        assert_eq!(bar(50.0), format!("[{}{}]", "#".repeat(10), ".".repeat(10)));
        assert_eq!(bar(250.0), format!("[{}]", "#".repeat(20)));
        assert_eq!(bar(-3.0), format!("[{}]", ".".repeat(20)));
    }
}
