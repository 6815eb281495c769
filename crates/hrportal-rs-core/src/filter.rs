//! List/filter view model.
//!
//! Every function here returns an order-preserving subsequence of its input
//! and leaves the input untouched. Applying the same filter twice gives the
//! same result as applying it once.

use chrono::{DateTime, Utc};
use hrportal_rs_protocol::{Announcement, EmployeeDocument, OnboardingNotification};
use serde::{Deserialize, Serialize};

/// A single-choice filter where `All` means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// `"all"` (any case) and the empty string select everything.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Case-insensitive match. A record without a value only passes `All`.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => {
                value.is_some_and(|value| value.eq_ignore_ascii_case(wanted))
            }
        }
    }
}

impl From<Option<String>> for Selection {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map_or(Selection::All, Selection::parse)
    }
}

/// Announcement board filters. The default shows every unexpired record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: Selection,
    pub priority: Selection,
    pub show_expired: bool,
    /// Case-insensitive substring over title and content; blank means none.
    pub search: Option<String>,
}

impl FilterState {
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Selection::parse(category);
        self
    }

    pub fn with_priority(mut self, priority: &str) -> Self {
        self.priority = Selection::parse(priority);
        self
    }

    pub fn with_show_expired(mut self, show_expired: bool) -> Self {
        self.show_expired = show_expired;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }
}

/// Records the announcement filters know how to inspect.
pub trait Filterable {
    fn category(&self) -> Option<&str>;
    fn priority(&self) -> Option<&str>;
    fn expires_at(&self) -> Option<DateTime<Utc>>;
    /// Text searched by [`FilterState::search`].
    fn search_text(&self) -> Vec<&str>;
}

impl Filterable for Announcement {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn priority(&self) -> Option<&str> {
        self.priority.as_deref()
    }

    fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.content.as_str()]
    }
}

impl Filterable for OnboardingNotification {
    fn category(&self) -> Option<&str> {
        self.notification_type.as_deref()
    }

    fn priority(&self) -> Option<&str> {
        self.priority.as_deref()
    }

    fn expires_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.message.as_str()]
    }
}

/// Conjunction of every active predicate in `filters`, evaluated at `now`.
pub fn apply_filters<T>(items: &[T], filters: &FilterState, now: DateTime<Utc>) -> Vec<T>
where
    T: Filterable + Clone,
{
    let term = filters.search_term();
    items
        .iter()
        .filter(|item| filters.category.matches(item.category()))
        .filter(|item| filters.priority.matches(item.priority()))
        .filter(|item| {
            filters.show_expired || item.expires_at().is_none_or(|expires_at| expires_at >= now)
        })
        .filter(|item| {
            term.as_ref().is_none_or(|term| {
                item.search_text()
                    .iter()
                    .any(|text| text.to_lowercase().contains(term.as_str()))
            })
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verification {
    #[default]
    All,
    Verified,
    Unverified,
}

impl Verification {
    pub fn from_flag(verified: Option<bool>) -> Self {
        match verified {
            None => Verification::All,
            Some(true) => Verification::Verified,
            Some(false) => Verification::Unverified,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFilter {
    pub document_type: Selection,
    pub verification: Verification,
}

impl DocumentFilter {
    pub fn apply(&self, documents: &[EmployeeDocument]) -> Vec<EmployeeDocument> {
        documents
            .iter()
            .filter(|document| self.document_type.matches(Some(&document.document_type)))
            .filter(|document| match self.verification {
                Verification::All => true,
                Verification::Verified => document.is_verified,
                Verification::Unverified => !document.is_verified,
            })
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFilter {
    pub unread_only: bool,
}

impl NotificationFilter {
    pub fn apply(&self, notifications: &[OnboardingNotification]) -> Vec<OnboardingNotification> {
        notifications
            .iter()
            .filter(|notification| !self.unread_only || !notification.is_read)
            .cloned()
            .collect()
    }
}

/// One 1-based page of a derived list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Requested page, clamped into `1..=total_pages`.
    pub page: usize,
    /// At least 1, even for an empty list.
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice `items` into pages of `page_size`. A zero page size is treated as 1.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let items = items
        .iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();
    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DocumentFilter, FilterState, NotificationFilter, Page, Selection, Verification,
        apply_filters, paginate,
    };
    use chrono::{DateTime, Duration, Utc};
    use hrportal_rs_protocol::{Announcement, EmployeeDocument, OnboardingNotification};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn announcement(
        id: i64,
        category: &str,
        priority: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Announcement {
        serde_json::from_value(json!({
            "id": id,
            "title": format!("Notice {id}"),
            "content": (if id == 3 { "Open enrollment for Benefits" } else { "Routine update" }),
            "category": category,
            "priority": priority,
            "created_at": "2024-05-01T08:00:00Z",
            "expires_at": expires_at,
        }))
        .expect("announcement")
    }

    fn board(now: DateTime<Utc>) -> Vec<Announcement> {
        vec![
            announcement(1, "hr", "high", None),
            announcement(2, "general", "low", None),
            announcement(3, "hr", "normal", Some(now - Duration::days(1))),
            announcement(4, "HR", "urgent", Some(now + Duration::days(3))),
            announcement(5, "policy", "high", Some(now - Duration::hours(1))),
        ]
    }

    fn ids(items: &[Announcement]) -> Vec<i64> {
        items.iter().map(|item| item.id).collect()
    }

    #[test]
    fn selection_parse_treats_all_as_no_filter() {
        assert_eq!(Selection::parse("all"), Selection::All);
        assert_eq!(Selection::parse("ALL"), Selection::All);
        assert_eq!(Selection::parse(""), Selection::All);
        assert_eq!(Selection::parse("hr"), Selection::Only("hr".to_string()));
        assert!(!Selection::parse("hr").matches(None));
    }

    #[test]
    fn category_filter_hides_other_categories_and_expired() {
        let now = Utc::now();
        let filters = FilterState::default()
            .with_category("hr")
            .with_priority("all")
            .with_show_expired(false);
        assert_eq!(ids(&apply_filters(&board(now), &filters, now)), vec![1, 4]);
    }

    #[test]
    fn show_expired_keeps_everything_in_order() {
        let now = Utc::now();
        let filters = FilterState::default().with_show_expired(true);
        assert_eq!(
            ids(&apply_filters(&board(now), &filters, now)),
            vec![1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn expiry_at_exactly_now_is_still_visible() {
        let now = Utc::now();
        let items = vec![announcement(9, "hr", "low", Some(now))];
        assert_eq!(ids(&apply_filters(&items, &FilterState::default(), now)), vec![9]);
    }

    #[test]
    fn filters_are_idempotent_and_conjunctive() {
        let now = Utc::now();
        let filters = FilterState::default()
            .with_priority("high")
            .with_show_expired(true);
        let once = apply_filters(&board(now), &filters, now);
        let twice = apply_filters(&once, &filters, now);
        assert_eq!(ids(&once), vec![1, 5]);
        assert_eq!(once, twice);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_content() {
        let now = Utc::now();
        let filters = FilterState::default()
            .with_show_expired(true)
            .with_search("  benefits ");
        assert_eq!(ids(&apply_filters(&board(now), &filters, now)), vec![3]);

        let blank = FilterState::default().with_search("   ");
        assert_eq!(ids(&apply_filters(&board(now), &blank, now)), vec![1, 2, 4]);
    }

    #[test]
    fn pagination_clamps_page_and_counts_pages() {
        let items: Vec<u32> = (1..=7).collect();
        let page = paginate(&items, 3, 3);
        assert_eq!(page.items, vec![7]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 7);

        let clamped = paginate(&items, 10, 3);
        assert_eq!(clamped.page, 3);
        assert_eq!(paginate(&items, 0, 3).items, vec![1, 2, 3]);

        let empty: Page<u32> = paginate(&[], 1, 10);
        assert_eq!(empty.total_pages, 1);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn document_filter_combines_type_and_verification() {
        let documents: Vec<EmployeeDocument> = [
            (1, "Identity Documents", true),
            (2, "Tax Forms", false),
            (3, "Identity Documents", false),
        ]
        .into_iter()
        .map(|(id, document_type, verified)| {
            serde_json::from_value(json!({
                "id": id,
                "employee_id": 4,
                "document_type": document_type,
                "document_url": format!("uploads/{id}.pdf"),
                "is_verified": verified,
                "uploaded_at": "2024-02-01T10:00:00Z"
            }))
            .expect("document")
        })
        .collect();

        let filter = DocumentFilter {
            document_type: Selection::parse("identity documents"),
            verification: Verification::from_flag(Some(false)),
        };
        let kept: Vec<i64> = filter.apply(&documents).iter().map(|d| d.id).collect();
        assert_eq!(kept, vec![3]);
        assert_eq!(DocumentFilter::default().apply(&documents).len(), 3);
    }

    #[test]
    fn unread_filter_drops_read_notifications() {
        let notifications: Vec<OnboardingNotification> = [(1, true), (2, false), (3, false)]
            .into_iter()
            .map(|(id, is_read)| {
                serde_json::from_value(json!({
                    "id": id,
                    "title": "Task due",
                    "message": "Upload your ID",
                    "is_read": is_read,
                    "created_at": "2024-02-01T10:00:00Z"
                }))
                .expect("notification")
            })
            .collect();
        let unread = NotificationFilter { unread_only: true }.apply(&notifications);
        assert_eq!(unread.iter().map(|n| n.id).collect::<Vec<_>>(), vec![2, 3]);
    }
}
