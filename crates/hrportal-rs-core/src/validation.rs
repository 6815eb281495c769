//! Profile form validation.
//!
//! [`validate_on`] is a pure function of the form and a calendar date; every
//! call with the same inputs yields the same errors. [`FormValidator`] wraps it
//! for editors that need a callback on each recomputation.

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Optional `+`, then 10-15 ASCII digits, spaces, hyphens, or parentheses.
/// Applied to the input after all whitespace is removed.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,15}$").expect("phone pattern compiles"));

const MIN_AGE: i32 = 16;
const MAX_AGE: i32 = 100;

/// Field name -> message. An empty map means the form is valid.
pub type FieldErrors = BTreeMap<String, String>;

/// Profile fields edited during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
}

impl ProfileForm {
    /// Set a field by its form name. Returns false for an unknown name.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            "first_name" => &mut self.first_name,
            "last_name" => &mut self.last_name,
            "department" => &mut self.department,
            "phone" => &mut self.phone,
            "date_of_birth" => &mut self.date_of_birth,
            "emergency_contact_name" => &mut self.emergency_contact_name,
            "emergency_contact_phone" => &mut self.emergency_contact_phone,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub errors: FieldErrors,
    pub is_valid: bool,
}

/// Validate against today's local date.
pub fn validate(form: &ProfileForm) -> ValidationOutcome {
    validate_on(form, Local::now().date_naive())
}

/// Validate against an explicit "today".
pub fn validate_on(form: &ProfileForm, today: NaiveDate) -> ValidationOutcome {
    let mut errors = FieldErrors::new();

    for (field, label, value) in [
        ("first_name", "First name", &form.first_name),
        ("last_name", "Last name", &form.last_name),
        ("department", "Department", &form.department),
    ] {
        if is_blank(value) {
            errors.insert(field.to_string(), format!("{label} is required"));
        }
    }

    if let Some(phone) = present(&form.phone)
        && !is_valid_phone(phone)
    {
        errors.insert(
            "phone".to_string(),
            "Please enter a valid phone number (10-15 digits)".to_string(),
        );
    }

    if let Some(raw) = present(&form.date_of_birth)
        && let Some(message) = date_of_birth_error(raw, today)
    {
        errors.insert("date_of_birth".to_string(), message.to_string());
    }

    match present(&form.emergency_contact_phone) {
        Some(phone) if !is_valid_phone(phone) => {
            errors.insert(
                "emergency_contact_phone".to_string(),
                "Please enter a valid emergency contact phone number".to_string(),
            );
        }
        Some(_) => {}
        None if present(&form.emergency_contact_name).is_some() => {
            errors.insert(
                "emergency_contact_phone".to_string(),
                "Emergency contact phone is required when name is provided".to_string(),
            );
        }
        None => {}
    }

    let is_valid = errors.is_empty();
    ValidationOutcome { errors, is_valid }
}

fn is_blank(value: &Option<String>) -> bool {
    present(value).is_none()
}

/// The value when it has non-whitespace content.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}

fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_PATTERN.is_match(&compact)
}

/// Age is the difference of calendar years; month and day are ignored.
fn date_of_birth_error(raw: &str, today: NaiveDate) -> Option<&'static str> {
    let Ok(birth) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") else {
        return Some("Invalid date format. Use YYYY-MM-DD");
    };
    if birth > today {
        return Some("Date of birth cannot be in the future");
    }
    let age = today.year() - birth.year();
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Some("Age must be between 16 and 100 years");
    }
    None
}

type Listener = Box<dyn FnMut(bool, &FieldErrors) + Send>;

/// Re-validates on every change and notifies a listener, typically used to
/// gate a submit button.
pub struct FormValidator {
    form: ProfileForm,
    outcome: ValidationOutcome,
    listener: Option<Listener>,
    today: fn() -> NaiveDate,
}

impl FormValidator {
    pub fn new(form: ProfileForm) -> Self {
        Self::with_clock(form, || Local::now().date_naive())
    }

    /// Use a fixed clock, e.g. for deterministic tests.
    pub fn with_clock(form: ProfileForm, today: fn() -> NaiveDate) -> Self {
        let outcome = validate_on(&form, today());
        Self {
            form,
            outcome,
            listener: None,
            today,
        }
    }

    /// Register the listener and immediately report the current outcome.
    pub fn on_change(&mut self, mut listener: impl FnMut(bool, &FieldErrors) + Send + 'static) {
        listener(self.outcome.is_valid, &self.outcome.errors);
        self.listener = Some(Box::new(listener));
    }

    /// Update one field and recompute. Unknown field names are ignored.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> &ValidationOutcome {
        if self.form.set(field, value) {
            self.recompute();
        }
        &self.outcome
    }

    /// Replace the whole form and recompute.
    pub fn replace(&mut self, form: ProfileForm) -> &ValidationOutcome {
        self.form = form;
        self.recompute();
        &self.outcome
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn outcome(&self) -> &ValidationOutcome {
        &self.outcome
    }

    fn recompute(&mut self) {
        self.outcome = validate_on(&self.form, (self.today)());
        if let Some(listener) = self.listener.as_mut() {
            listener(self.outcome.is_valid, &self.outcome.errors);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldErrors, FormValidator, ProfileForm, validate_on};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).expect("date")
    }

    fn valid_form() -> ProfileForm {
        ProfileForm {
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            department: Some("Eng".to_string()),
            ..ProfileForm::default()
        }
    }

    fn errors(pairs: &[(&str, &str)]) -> FieldErrors {
        pairs
            .iter()
            .map(|(field, message)| (field.to_string(), message.to_string()))
            .collect()
    }

    #[test]
    fn missing_first_name_is_the_only_error() {
        let form = ProfileForm {
            first_name: Some(String::new()),
            ..valid_form()
        };
        let outcome = validate_on(&form, today());
        assert_eq!(outcome.errors, errors(&[("first_name", "First name is required")]));
        assert_eq!(outcome.is_valid, false);
    }

    #[test]
    fn whitespace_only_required_fields_fail() {
        let form = ProfileForm {
            last_name: Some("   ".to_string()),
            department: None,
            ..valid_form()
        };
        let outcome = validate_on(&form, today());
        assert_eq!(
            outcome.errors,
            errors(&[
                ("department", "Department is required"),
                ("last_name", "Last name is required"),
            ])
        );
    }

    #[test]
    fn phone_pattern() {
        let check = |phone: &str| {
            let form = ProfileForm {
                phone: Some(phone.to_string()),
                ..valid_form()
            };
            validate_on(&form, today()).errors.contains_key("phone")
        };
        assert!(check("12345"));
        assert!(!check("+1 (555) 123-4567"));
        assert!(!check("5551234567"));
        assert!(check("555-123-4567-8901-23"));
        assert!(check("555.123.4567"));
        // Whitespace is stripped before matching, so spacing never counts.
        assert!(check("1 2 3 4 5"));
        assert!(!check("   "));
    }

    #[test]
    fn phone_digits_must_be_ascii() {
        // Arabic-Indic and fullwidth digits are Unicode `Nd` but not 0-9.
        let arabic_indic: String = ('\u{660}'..='\u{669}').collect();
        let fullwidth: String = ('\u{ff10}'..='\u{ff19}').collect();
        let form = ProfileForm {
            phone: Some(arabic_indic),
            emergency_contact_phone: Some(fullwidth),
            ..valid_form()
        };
        let outcome = validate_on(&form, today());
        assert!(outcome.errors.contains_key("phone"));
        assert!(outcome.errors.contains_key("emergency_contact_phone"));
    }

    #[test]
    fn future_birth_date_is_rejected() {
        let form = ProfileForm {
            date_of_birth: Some("2024-06-16".to_string()),
            ..valid_form()
        };
        let outcome = validate_on(&form, today());
        assert_eq!(
            outcome.errors,
            errors(&[("date_of_birth", "Date of birth cannot be in the future")])
        );
    }

    #[test]
    fn age_uses_year_difference_only() {
        let check = |dob: &str| {
            let form = ProfileForm {
                date_of_birth: Some(dob.to_string()),
                ..valid_form()
            };
            validate_on(&form, today()).errors.get("date_of_birth").cloned()
        };
        // Turns 16 in December, but 2024 - 2008 = 16 already passes.
        assert_eq!(check("2008-12-31"), None);
        assert_eq!(
            check("2009-01-01"),
            Some("Age must be between 16 and 100 years".to_string())
        );
        assert_eq!(check("1924-12-31"), None);
        assert_eq!(
            check("1923-01-01"),
            Some("Age must be between 16 and 100 years".to_string())
        );
    }

    #[test]
    fn unparseable_birth_date_asks_for_iso_format() {
        for raw in ["not-a-date", "15/06/1990", "1990-02-30"] {
            let form = ProfileForm {
                date_of_birth: Some(raw.to_string()),
                ..valid_form()
            };
            assert_eq!(
                validate_on(&form, today()).errors,
                errors(&[("date_of_birth", "Invalid date format. Use YYYY-MM-DD")])
            );
        }
    }

    #[test]
    fn emergency_contact_rules() {
        let form = ProfileForm {
            emergency_contact_name: Some("Jane".to_string()),
            ..valid_form()
        };
        assert_eq!(
            validate_on(&form, today()).errors,
            errors(&[(
                "emergency_contact_phone",
                "Emergency contact phone is required when name is provided"
            )])
        );

        let form = ProfileForm {
            emergency_contact_phone: Some("123".to_string()),
            ..valid_form()
        };
        assert_eq!(
            validate_on(&form, today()).errors,
            errors(&[(
                "emergency_contact_phone",
                "Please enter a valid emergency contact phone number"
            )])
        );

        let form = ProfileForm {
            emergency_contact_name: Some("Jane".to_string()),
            emergency_contact_phone: Some("+44 20 7946 0958".to_string()),
            ..valid_form()
        };
        assert!(validate_on(&form, today()).is_valid);
    }

    #[test]
    fn validation_is_idempotent() {
        let form = ProfileForm {
            phone: Some("12".to_string()),
            date_of_birth: Some("2030-01-01".to_string()),
            emergency_contact_name: Some("Jane".to_string()),
            ..ProfileForm::default()
        };
        assert_eq!(validate_on(&form, today()), validate_on(&form, today()));
    }

    #[test]
    fn validator_notifies_on_every_recomputation() {
        let seen: Arc<Mutex<Vec<bool>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut validator = FormValidator::with_clock(ProfileForm::default(), today);
        validator.on_change(move |is_valid, _errors| {
            sink.lock().expect("lock").push(is_valid);
        });

        validator.set_field("first_name", "John");
        validator.set_field("last_name", "Doe");
        let outcome = validator.set_field("department", "Eng").clone();
        validator.set_field("nickname", "JD");

        assert!(outcome.is_valid);
        assert_eq!(*seen.lock().expect("lock"), vec![false, false, false, true]);
    }
}
