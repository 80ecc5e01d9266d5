use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest selectable weekly workout target.
pub const WEEKLY_GOAL_MIN: u8 = 1;
/// Highest selectable weekly workout target.
pub const WEEKLY_GOAL_MAX: u8 = 7;

/// Complete snapshot of the user settings form.
///
/// Serializes with the camelCase field names the save payload uses
/// (`firstName`, `phoneNumber`, `notifications.push`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Optional contact number; empty string means "not provided"
    pub phone_number: String,
    pub fitness_goal: FitnessGoal,
    /// Workout days per week, always within 1..=7
    pub weekly_goal: u8,
    pub notifications: NotificationSettings,
    pub privacy: PrivacySettings,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            fitness_goal: FitnessGoal::General,
            weekly_goal: 3,
            notifications: NotificationSettings::default(),
            privacy: PrivacySettings::default(),
        }
    }
}

impl UserSettings {
    /// Applies a single field edit, leaving every other field untouched.
    /// Slider values are clamped into the valid 1..=7 range.
    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::FirstName(value) => self.first_name = value,
            FieldEdit::LastName(value) => self.last_name = value,
            FieldEdit::Email(value) => self.email = value,
            FieldEdit::PhoneNumber(value) => self.phone_number = value,
            FieldEdit::FitnessGoal(goal) => self.fitness_goal = goal,
            FieldEdit::WeeklyGoal(days) => {
                self.weekly_goal = days.clamp(WEEKLY_GOAL_MIN, WEEKLY_GOAL_MAX)
            }
            FieldEdit::Notification(field, enabled) => match field {
                NotificationField::Email => self.notifications.email = enabled,
                NotificationField::Push => self.notifications.push = enabled,
                NotificationField::Achievements => self.notifications.achievements = enabled,
                NotificationField::Reminders => self.notifications.reminders = enabled,
            },
            FieldEdit::Privacy(field, enabled) => match field {
                PrivacyField::ProfilePublic => self.privacy.profile_public = enabled,
                PrivacyField::ShowStats => self.privacy.show_stats = enabled,
                PrivacyField::AllowMessages => self.privacy.allow_messages = enabled,
            },
        }
    }

    /// Current value of a free-text field, for revalidation after an edit.
    pub fn text_value(&self, field: TextField) -> &str {
        match field {
            TextField::FirstName => &self.first_name,
            TextField::LastName => &self.last_name,
            TextField::Email => &self.email,
            TextField::PhoneNumber => &self.phone_number,
        }
    }
}

/// Notification delivery preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email: bool,
    pub push: bool,
    pub achievements: bool,
    pub reminders: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            push: false,
            achievements: true,
            reminders: true,
        }
    }
}

/// Profile visibility preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    pub profile_public: bool,
    pub show_stats: bool,
    pub allow_messages: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            profile_public: true,
            show_stats: true,
            allow_messages: false,
        }
    }
}

/// Primary fitness objective selectable in the goals section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitnessGoal {
    General,
    WeightLoss,
    MuscleGain,
    Endurance,
    Flexibility,
    Strength,
}

impl FitnessGoal {
    pub const ALL: [FitnessGoal; 6] = [
        FitnessGoal::General,
        FitnessGoal::WeightLoss,
        FitnessGoal::MuscleGain,
        FitnessGoal::Endurance,
        FitnessGoal::Flexibility,
        FitnessGoal::Strength,
    ];

    /// Wire value used in the select control and the saved payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::General => "general",
            FitnessGoal::WeightLoss => "weight-loss",
            FitnessGoal::MuscleGain => "muscle-gain",
            FitnessGoal::Endurance => "endurance",
            FitnessGoal::Flexibility => "flexibility",
            FitnessGoal::Strength => "strength",
        }
    }

    /// Parses a select value; unknown values yield `None` and the caller
    /// leaves the current goal unchanged.
    pub fn from_value(value: &str) -> Option<FitnessGoal> {
        Self::ALL.iter().copied().find(|goal| goal.as_str() == value)
    }

    /// Human-readable option label.
    pub fn label(&self) -> &'static str {
        match self {
            FitnessGoal::General => "General Fitness",
            FitnessGoal::WeightLoss => "Weight Loss",
            FitnessGoal::MuscleGain => "Muscle Gain",
            FitnessGoal::Endurance => "Build Endurance",
            FitnessGoal::Flexibility => "Improve Flexibility",
            FitnessGoal::Strength => "Build Strength",
        }
    }
}

/// The free-text fields that participate in validation and touched tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
}

impl TextField {
    pub const ALL: [TextField; 4] = [
        TextField::FirstName,
        TextField::LastName,
        TextField::Email,
        TextField::PhoneNumber,
    ];

    /// DOM `name`/`id` of the corresponding form control.
    pub fn name(&self) -> &'static str {
        match self {
            TextField::FirstName => "firstName",
            TextField::LastName => "lastName",
            TextField::Email => "email",
            TextField::PhoneNumber => "phoneNumber",
        }
    }

    /// Reverse of [`TextField::name`]; unknown names are silently ignored
    /// by callers.
    pub fn from_name(name: &str) -> Option<TextField> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }
}

/// Checkbox fields in the notification preferences group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationField {
    Email,
    Push,
    Achievements,
    Reminders,
}

/// Checkbox fields in the privacy settings group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivacyField {
    ProfilePublic,
    ShowStats,
    AllowMessages,
}

/// A single typed edit to the form, one variant per editable control.
///
/// Replaces the original's stringly `"group.subfield"` addressing so the
/// compiler checks exhaustiveness over the known field set.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    FirstName(String),
    LastName(String),
    Email(String),
    PhoneNumber(String),
    FitnessGoal(FitnessGoal),
    WeeklyGoal(u8),
    Notification(NotificationField, bool),
    Privacy(PrivacyField, bool),
}

impl FieldEdit {
    /// Builds the edit for a free-text control from its field tag.
    pub fn text(field: TextField, value: String) -> FieldEdit {
        match field {
            TextField::FirstName => FieldEdit::FirstName(value),
            TextField::LastName => FieldEdit::LastName(value),
            TextField::Email => FieldEdit::Email(value),
            TextField::PhoneNumber => FieldEdit::PhoneNumber(value),
        }
    }
}

/// Field-scoped validation failure; `Display` is the user-facing message
/// rendered next to the offending control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Must be at least 2 characters")]
    NameTooShort,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
}

/// Per-field validation results; `None` means the field is valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    pub first_name: Option<ValidationError>,
    pub last_name: Option<ValidationError>,
    pub email: Option<ValidationError>,
    pub phone_number: Option<ValidationError>,
}

impl ValidationErrors {
    pub fn get(&self, field: TextField) -> Option<ValidationError> {
        match field {
            TextField::FirstName => self.first_name,
            TextField::LastName => self.last_name,
            TextField::Email => self.email,
            TextField::PhoneNumber => self.phone_number,
        }
    }

    pub fn set(&mut self, field: TextField, error: Option<ValidationError>) {
        match field {
            TextField::FirstName => self.first_name = error,
            TextField::LastName => self.last_name = error,
            TextField::Email => self.email = error,
            TextField::PhoneNumber => self.phone_number = error,
        }
    }

    /// True when any field currently holds an error. Gates the submit
    /// button regardless of touched state.
    pub fn has_any(&self) -> bool {
        TextField::ALL.iter().any(|field| self.get(*field).is_some())
    }

    /// Fields currently failing validation.
    pub fn failing_fields(&self) -> impl Iterator<Item = TextField> + '_ {
        TextField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_some())
    }
}

/// Fields the user has focused and left at least once. Errors are only
/// rendered for touched fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchedFields {
    pub first_name: bool,
    pub last_name: bool,
    pub email: bool,
    pub phone_number: bool,
}

impl TouchedFields {
    pub fn is_touched(&self, field: TextField) -> bool {
        match field {
            TextField::FirstName => self.first_name,
            TextField::LastName => self.last_name,
            TextField::Email => self.email,
            TextField::PhoneNumber => self.phone_number,
        }
    }

    pub fn mark(&mut self, field: TextField) {
        match field {
            TextField::FirstName => self.first_name = true,
            TextField::LastName => self.last_name = true,
            TextField::Email => self.email = true,
            TextField::PhoneNumber => self.phone_number = true,
        }
    }

    /// Marks exactly the failing fields, so their errors become visible
    /// after a rejected submit.
    pub fn from_errors(errors: &ValidationErrors) -> TouchedFields {
        let mut touched = TouchedFields::default();
        for field in errors.failing_fields() {
            touched.mark(field);
        }
        touched
    }
}

/// Validates one free-text field. Pure: same input, same result.
pub fn validate_field(field: TextField, value: &str) -> Option<ValidationError> {
    match field {
        TextField::FirstName | TextField::LastName => {
            if value.trim().chars().count() < 2 {
                Some(ValidationError::NameTooShort)
            } else {
                None
            }
        }
        TextField::Email => {
            if is_valid_email(value) {
                None
            } else {
                Some(ValidationError::InvalidEmail)
            }
        }
        TextField::PhoneNumber => {
            if value.is_empty() || value.chars().all(is_phone_char) {
                None
            } else {
                Some(ValidationError::InvalidPhone)
            }
        }
    }
}

/// Shape check for `localpart@domain.tld`: no whitespace, exactly one `@`,
/// and a `.` in the domain with non-empty parts on both sides.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some(at) = value.find('@') else {
        return false;
    };
    let (local, domain) = (&value[..at], &value[at + 1..]);
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Any dot with non-empty text on both sides qualifies; the surrounding
    // text may itself contain dots
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn is_phone_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '+' | '(' | ')')
}

/// Revalidates every free-text field. The enum, slider, and checkbox fields
/// have no invalid states and are skipped.
pub fn validate_all(settings: &UserSettings) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in TextField::ALL {
        errors.set(field, validate_field(field, settings.text_value(field)));
    }
    errors
}

/// Outcome of a submit attempt, decided before the simulated save delay.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAttempt {
    /// Validation failed: these errors and touched marks replace the prior
    /// state, and the save callback must not be invoked.
    Rejected {
        errors: ValidationErrors,
        touched: TouchedFields,
    },
    /// Everything valid: the snapshot to hand to the save callback.
    Accepted(UserSettings),
}

/// Full-form validation gate run when the user submits.
pub fn attempt_submit(settings: &UserSettings) -> SubmitAttempt {
    let errors = validate_all(settings);
    if errors.has_any() {
        let touched = TouchedFields::from_errors(&errors);
        SubmitAttempt::Rejected { errors, touched }
    } else {
        SubmitAttempt::Accepted(settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> UserSettings {
        UserSettings {
            first_name: "Al".to_string(),
            last_name: "Lee".to_string(),
            email: "al@example.com".to_string(),
            phone_number: String::new(),
            ..UserSettings::default()
        }
    }

    #[test]
    fn test_defaults() {
        let settings = UserSettings::default();
        assert_eq!(settings.first_name, "");
        assert_eq!(settings.fitness_goal, FitnessGoal::General);
        assert_eq!(settings.weekly_goal, 3);
        assert!(settings.notifications.email);
        assert!(!settings.notifications.push);
        assert!(settings.notifications.achievements);
        assert!(settings.notifications.reminders);
        assert!(settings.privacy.profile_public);
        assert!(settings.privacy.show_stats);
        assert!(!settings.privacy.allow_messages);
    }

    #[test]
    fn test_name_validator_boundary() {
        for field in [TextField::FirstName, TextField::LastName] {
            assert_eq!(
                validate_field(field, ""),
                Some(ValidationError::NameTooShort)
            );
            assert_eq!(
                validate_field(field, "A"),
                Some(ValidationError::NameTooShort)
            );
            // Whitespace padding does not count toward the length
            assert_eq!(
                validate_field(field, "  A  "),
                Some(ValidationError::NameTooShort)
            );
            assert_eq!(validate_field(field, "Al"), None);
            assert_eq!(validate_field(field, "  Al  "), None);
            assert_eq!(validate_field(field, "Alexandra"), None);
        }
    }

    #[test]
    fn test_email_validator_accepts_wellformed_addresses() {
        for email in [
            "al@example.com",
            "ok@x.io",
            "first.last@sub.domain.org",
            "a@b..c",
            // Trailing dot is fine as long as an earlier dot has text on
            // both sides
            "a@b.c.",
            "a@sub.domain.",
        ] {
            assert_eq!(validate_field(TextField::Email, email), None, "{email}");
        }
    }

    #[test]
    fn test_email_validator_rejects_malformed_addresses() {
        for email in [
            "",
            "not-an-email",
            "no-domain@",
            "@no-local.com",
            "two@@at.com",
            "a@b@c.com",
            "spaces in@example.com",
            "al@example com",
            "missing-dot@example",
            "al@.com",
            "al@example.",
        ] {
            assert_eq!(
                validate_field(TextField::Email, email),
                Some(ValidationError::InvalidEmail),
                "{email}"
            );
        }
    }

    #[test]
    fn test_phone_validator_character_set() {
        // Empty is valid: the field is optional
        assert_eq!(validate_field(TextField::PhoneNumber, ""), None);
        assert_eq!(
            validate_field(TextField::PhoneNumber, "+1 (555) 123-4567"),
            None
        );
        assert_eq!(validate_field(TextField::PhoneNumber, "5551234567"), None);
        assert_eq!(
            validate_field(TextField::PhoneNumber, "555-CALL-NOW"),
            Some(ValidationError::InvalidPhone)
        );
        assert_eq!(
            validate_field(TextField::PhoneNumber, "555.123.4567"),
            Some(ValidationError::InvalidPhone)
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let first = validate_field(TextField::Email, "not-an-email");
        let second = validate_field(TextField::Email, "not-an-email");
        assert_eq!(first, second);

        let mut errors = ValidationErrors::default();
        errors.set(TextField::Email, first);
        let snapshot = errors.clone();
        errors.set(TextField::Email, second);
        assert_eq!(errors, snapshot);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::NameTooShort.to_string(),
            "Must be at least 2 characters"
        );
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(
            ValidationError::InvalidPhone.to_string(),
            "Please enter a valid phone number"
        );
    }

    #[test]
    fn test_field_edit_updates_only_addressed_field() {
        let mut settings = UserSettings::default();
        settings.apply(FieldEdit::Notification(NotificationField::Push, true));

        let expected = UserSettings {
            notifications: NotificationSettings {
                push: true,
                ..NotificationSettings::default()
            },
            ..UserSettings::default()
        };
        assert_eq!(settings, expected);
    }

    #[test]
    fn test_weekly_goal_clamped_into_range() {
        let mut settings = UserSettings::default();
        settings.apply(FieldEdit::WeeklyGoal(9));
        assert_eq!(settings.weekly_goal, 7);
        settings.apply(FieldEdit::WeeklyGoal(0));
        assert_eq!(settings.weekly_goal, 1);
        settings.apply(FieldEdit::WeeklyGoal(5));
        assert_eq!(settings.weekly_goal, 5);
    }

    #[test]
    fn test_text_field_name_round_trip() {
        for field in TextField::ALL {
            assert_eq!(TextField::from_name(field.name()), Some(field));
        }
        assert_eq!(TextField::from_name("notifications.push"), None);
        assert_eq!(TextField::from_name(""), None);
    }

    #[test]
    fn test_fitness_goal_values() {
        assert_eq!(FitnessGoal::WeightLoss.as_str(), "weight-loss");
        assert_eq!(
            FitnessGoal::from_value("muscle-gain"),
            Some(FitnessGoal::MuscleGain)
        );
        assert_eq!(FitnessGoal::from_value("cardio"), None);
        for goal in FitnessGoal::ALL {
            assert_eq!(FitnessGoal::from_value(goal.as_str()), Some(goal));
        }
    }

    #[test]
    fn test_submit_rejected_marks_failing_fields_touched() {
        let settings = UserSettings {
            first_name: "A".to_string(),
            last_name: "Lee".to_string(),
            email: "not-an-email".to_string(),
            ..UserSettings::default()
        };

        match attempt_submit(&settings) {
            SubmitAttempt::Rejected { errors, touched } => {
                assert_eq!(errors.first_name, Some(ValidationError::NameTooShort));
                assert_eq!(errors.last_name, None);
                assert_eq!(errors.email, Some(ValidationError::InvalidEmail));
                assert_eq!(errors.phone_number, None);
                assert!(touched.first_name);
                assert!(!touched.last_name);
                assert!(touched.email);
                assert!(!touched.phone_number);
            }
            SubmitAttempt::Accepted(_) => panic!("invalid form must not submit"),
        }
    }

    #[test]
    fn test_submit_accepted_returns_snapshot() {
        let settings = valid_settings();
        match attempt_submit(&settings) {
            SubmitAttempt::Accepted(snapshot) => assert_eq!(snapshot, settings),
            SubmitAttempt::Rejected { errors, .. } => {
                panic!("unexpected validation failures: {errors:?}")
            }
        }
    }

    #[test]
    fn test_blur_then_fix_clears_error() {
        let mut settings = UserSettings::default();
        let mut errors = ValidationErrors::default();
        let mut touched = TouchedFields::default();

        settings.apply(FieldEdit::Email("not-an-email".to_string()));
        touched.mark(TextField::Email);
        errors.set(
            TextField::Email,
            validate_field(TextField::Email, &settings.email),
        );
        assert_eq!(errors.email, Some(ValidationError::InvalidEmail));

        settings.apply(FieldEdit::Email("ok@x.io".to_string()));
        errors.set(
            TextField::Email,
            validate_field(TextField::Email, &settings.email),
        );
        assert_eq!(errors.email, None);
        assert!(touched.email);
    }

    #[test]
    fn test_touched_from_errors_only_marks_failures() {
        let mut errors = ValidationErrors::default();
        errors.set(TextField::LastName, Some(ValidationError::NameTooShort));
        let touched = TouchedFields::from_errors(&errors);
        assert!(!touched.first_name);
        assert!(touched.last_name);
        assert!(!touched.email);
        assert!(!touched.phone_number);
    }

    #[test]
    fn test_settings_serialize_with_original_payload_shape() {
        let settings = valid_settings();
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["firstName"], "Al");
        assert_eq!(json["phoneNumber"], "");
        assert_eq!(json["fitnessGoal"], "general");
        assert_eq!(json["weeklyGoal"], 3);
        assert_eq!(json["notifications"]["push"], false);
        assert_eq!(json["privacy"]["profilePublic"], true);
    }

    #[test]
    fn test_settings_json_round_trip() {
        let mut settings = valid_settings();
        settings.apply(FieldEdit::FitnessGoal(FitnessGoal::Endurance));
        settings.apply(FieldEdit::Privacy(PrivacyField::AllowMessages, true));
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: UserSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }
}
