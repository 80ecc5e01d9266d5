use gloo::timers::future::TimeoutFuture;
use shared::{
    attempt_submit, validate_field, FieldEdit, FitnessGoal, NotificationField, PrivacyField,
    SubmitAttempt, TextField, TouchedFields, UserSettings, ValidationError, ValidationErrors,
    WEEKLY_GOAL_MAX, WEEKLY_GOAL_MIN,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::hooks::use_unsaved_changes_guard;

/// Simulated save latency before the snapshot is handed to `on_save`.
const SAVE_DELAY_MS: u32 = 1_000;

#[derive(Properties, PartialEq)]
pub struct SettingsFormProps {
    /// Receives the full settings snapshot, at most once per successful
    /// submission cycle.
    pub on_save: Callback<UserSettings>,
}

/// The user settings form: personal info, fitness goals, notification
/// preferences, and privacy settings, with inline per-field validation.
#[function_component(SettingsForm)]
pub fn settings_form(props: &SettingsFormProps) -> Html {
    let settings = use_state(UserSettings::default);
    let errors = use_state(ValidationErrors::default);
    let touched = use_state(TouchedFields::default);
    let is_submitting = use_state(|| false);
    let has_changes = use_state(|| false);

    use_unsaved_changes_guard(*has_changes);

    // Single edit path for every control: apply the edit, mark the form
    // dirty, and revalidate free-text fields the user has already touched.
    let apply_edit = {
        let settings = settings.clone();
        let errors = errors.clone();
        let touched = touched.clone();
        let has_changes = has_changes.clone();

        Callback::from(move |edit: FieldEdit| {
            let mut next = (*settings).clone();
            let edited_field = match &edit {
                FieldEdit::FirstName(_) => Some(TextField::FirstName),
                FieldEdit::LastName(_) => Some(TextField::LastName),
                FieldEdit::Email(_) => Some(TextField::Email),
                FieldEdit::PhoneNumber(_) => Some(TextField::PhoneNumber),
                _ => None,
            };
            next.apply(edit);

            if let Some(field) = edited_field {
                if touched.is_touched(field) {
                    let mut next_errors = (*errors).clone();
                    next_errors.set(field, validate_field(field, next.text_value(field)));
                    errors.set(next_errors);
                }
            }

            settings.set(next);
            has_changes.set(true);
        })
    };

    let on_text_input = |field: TextField| {
        let apply_edit = apply_edit.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            apply_edit.emit(FieldEdit::text(field, input.value()));
        })
    };

    // Blur marks the field touched and validates it unconditionally
    let on_text_blur = |field: TextField| {
        let errors = errors.clone();
        let touched = touched.clone();
        Callback::from(move |e: FocusEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();

            let mut next_touched = *touched;
            next_touched.mark(field);
            touched.set(next_touched);

            let mut next_errors = (*errors).clone();
            next_errors.set(field, validate_field(field, &input.value()));
            errors.set(next_errors);
        })
    };

    let on_goal_change = {
        let apply_edit = apply_edit.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(goal) = FitnessGoal::from_value(&select.value()) {
                apply_edit.emit(FieldEdit::FitnessGoal(goal));
            }
        })
    };

    let on_weekly_goal_input = {
        let apply_edit = apply_edit.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(days) = input.value().parse::<u8>() {
                apply_edit.emit(FieldEdit::WeeklyGoal(days));
            }
        })
    };

    let on_notification_toggle = |field: NotificationField| {
        let apply_edit = apply_edit.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            apply_edit.emit(FieldEdit::Notification(field, input.checked()));
        })
    };

    let on_privacy_toggle = |field: PrivacyField| {
        let apply_edit = apply_edit.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            apply_edit.emit(FieldEdit::Privacy(field, input.checked()));
        })
    };

    let on_submit = {
        let settings = settings.clone();
        let errors = errors.clone();
        let touched = touched.clone();
        let is_submitting = is_submitting.clone();
        let has_changes = has_changes.clone();
        let on_save = props.on_save.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if *is_submitting {
                return;
            }

            match attempt_submit(&settings) {
                SubmitAttempt::Rejected {
                    errors: new_errors,
                    touched: new_touched,
                } => {
                    // Replace both maps so every failure becomes visible
                    errors.set(new_errors);
                    touched.set(new_touched);
                }
                SubmitAttempt::Accepted(snapshot) => {
                    is_submitting.set(true);

                    let is_submitting = is_submitting.clone();
                    let has_changes = has_changes.clone();
                    let on_save = on_save.clone();
                    spawn_local(async move {
                        // Simulated network latency; no abort path, the
                        // completion always fires
                        TimeoutFuture::new(SAVE_DELAY_MS).await;
                        on_save.emit(snapshot);
                        is_submitting.set(false);
                        has_changes.set(false);
                    });
                }
            }
        })
    };

    html! {
        <form class="user-settings-form" onsubmit={on_submit} novalidate=true>
            <div class="form-section">
                <h2>{"👤 Personal Information"}</h2>
                <p class="section-description">{"Update your personal details"}</p>

                <div class="form-row">
                    <TextInput
                        field={TextField::FirstName}
                        label="First Name"
                        placeholder="Enter your first name"
                        required=true
                        value={settings.first_name.clone()}
                        error={errors.first_name}
                        touched={touched.first_name}
                        oninput={on_text_input(TextField::FirstName)}
                        onblur={on_text_blur(TextField::FirstName)}
                    />
                    <TextInput
                        field={TextField::LastName}
                        label="Last Name"
                        placeholder="Enter your last name"
                        required=true
                        value={settings.last_name.clone()}
                        error={errors.last_name}
                        touched={touched.last_name}
                        oninput={on_text_input(TextField::LastName)}
                        onblur={on_text_blur(TextField::LastName)}
                    />
                </div>

                <div class="form-row">
                    <TextInput
                        field={TextField::Email}
                        label="Email Address"
                        input_type="email"
                        placeholder="your.email@example.com"
                        required=true
                        value={settings.email.clone()}
                        error={errors.email}
                        touched={touched.email}
                        oninput={on_text_input(TextField::Email)}
                        onblur={on_text_blur(TextField::Email)}
                    />
                    <TextInput
                        field={TextField::PhoneNumber}
                        label="Phone Number"
                        input_type="tel"
                        placeholder="+1 (555) 123-4567"
                        value={settings.phone_number.clone()}
                        error={errors.phone_number}
                        touched={touched.phone_number}
                        oninput={on_text_input(TextField::PhoneNumber)}
                        onblur={on_text_blur(TextField::PhoneNumber)}
                    />
                </div>
            </div>

            <div class="form-section">
                <h2>{"🎯 Fitness Goals"}</h2>
                <p class="section-description">{"Set your fitness objectives"}</p>

                <div class="form-group">
                    <label for="fitnessGoal">{"Primary Fitness Goal"}</label>
                    <select
                        id="fitnessGoal"
                        name="fitnessGoal"
                        onchange={on_goal_change}
                    >
                        {for FitnessGoal::ALL.iter().map(|goal| html! {
                            <option
                                value={goal.as_str()}
                                selected={*goal == settings.fitness_goal}
                            >
                                {goal.label()}
                            </option>
                        })}
                    </select>
                </div>

                <div class="form-group">
                    <label for="weeklyGoal">{"Weekly Workout Target"}</label>
                    <div class="slider-group">
                        <input
                            type="range"
                            id="weeklyGoal"
                            name="weeklyGoal"
                            min={WEEKLY_GOAL_MIN.to_string()}
                            max={WEEKLY_GOAL_MAX.to_string()}
                            value={settings.weekly_goal.to_string()}
                            oninput={on_weekly_goal_input}
                            class="slider"
                            aria-valuemin={WEEKLY_GOAL_MIN.to_string()}
                            aria-valuemax={WEEKLY_GOAL_MAX.to_string()}
                            aria-valuenow={settings.weekly_goal.to_string()}
                            aria-label="Weekly workout target"
                        />
                        <span class="slider-value">
                            {format!("{} days/week", settings.weekly_goal)}
                        </span>
                    </div>
                </div>
            </div>

            <div class="form-section">
                <h2>{"🔔 Notification Preferences"}</h2>
                <p class="section-description">{"Choose how you want to be notified"}</p>

                <div class="checkbox-group">
                    <PreferenceCheckbox
                        name="notifications.email"
                        title="Email Notifications"
                        hint="Receive updates and summaries via email"
                        checked={settings.notifications.email}
                        onchange={on_notification_toggle(NotificationField::Email)}
                    />
                    <PreferenceCheckbox
                        name="notifications.push"
                        title="Push Notifications"
                        hint="Get real-time alerts on your device"
                        checked={settings.notifications.push}
                        onchange={on_notification_toggle(NotificationField::Push)}
                    />
                    <PreferenceCheckbox
                        name="notifications.achievements"
                        title="Achievement Alerts"
                        hint="Celebrate your milestones and badges"
                        checked={settings.notifications.achievements}
                        onchange={on_notification_toggle(NotificationField::Achievements)}
                    />
                    <PreferenceCheckbox
                        name="notifications.reminders"
                        title="Workout Reminders"
                        hint="Daily reminders to stay on track"
                        checked={settings.notifications.reminders}
                        onchange={on_notification_toggle(NotificationField::Reminders)}
                    />
                </div>
            </div>

            <div class="form-section">
                <h2>{"🔒 Privacy Settings"}</h2>
                <p class="section-description">{"Control your profile visibility"}</p>

                <div class="checkbox-group">
                    <PreferenceCheckbox
                        name="privacy.profilePublic"
                        title="Public Profile"
                        hint="Allow others to view your profile"
                        checked={settings.privacy.profile_public}
                        onchange={on_privacy_toggle(PrivacyField::ProfilePublic)}
                    />
                    <PreferenceCheckbox
                        name="privacy.showStats"
                        title="Show Statistics"
                        hint="Display your workout stats on your profile"
                        checked={settings.privacy.show_stats}
                        onchange={on_privacy_toggle(PrivacyField::ShowStats)}
                    />
                    <PreferenceCheckbox
                        name="privacy.allowMessages"
                        title="Allow Messages"
                        hint="Let other users send you messages"
                        checked={settings.privacy.allow_messages}
                        onchange={on_privacy_toggle(PrivacyField::AllowMessages)}
                    />
                </div>
            </div>

            <div class="form-actions">
                {if *has_changes {
                    html! {
                        <p class="unsaved-changes">
                            {"⚠️ You have unsaved changes"}
                        </p>
                    }
                } else { html! {} }}

                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled={*is_submitting || errors.has_any()}
                >
                    {if *is_submitting {
                        html! {
                            <>
                                <span class="spinner"></span>
                                {"Saving..."}
                            </>
                        }
                    } else {
                        html! { {"Save Settings"} }
                    }}
                </button>
            </div>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct TextInputProps {
    field: TextField,
    label: AttrValue,
    #[prop_or(AttrValue::Static("text"))]
    input_type: AttrValue,
    placeholder: AttrValue,
    #[prop_or(false)]
    required: bool,
    value: AttrValue,
    error: Option<ValidationError>,
    touched: bool,
    oninput: Callback<InputEvent>,
    onblur: Callback<FocusEvent>,
}

/// One labelled free-text control with its inline validation message. The
/// error is only rendered once the field has been touched.
#[function_component(TextInput)]
fn text_input(props: &TextInputProps) -> Html {
    let name = props.field.name();
    let show_error = props.touched && props.error.is_some();
    let error_id = format!("{name}-error");

    html! {
        <div class="form-group">
            <label for={name}>
                {props.label.clone()}
                {" "}
                {if props.required {
                    html! { <span class="required">{"*"}</span> }
                } else {
                    html! { <span class="optional">{"(optional)"}</span> }
                }}
            </label>
            <input
                type={props.input_type.clone()}
                id={name}
                name={name}
                value={props.value.clone()}
                oninput={props.oninput.clone()}
                onblur={props.onblur.clone()}
                class={if show_error { "error" } else { "" }}
                placeholder={props.placeholder.clone()}
                aria-required={props.required.then(|| AttrValue::Static("true"))}
                aria-invalid={if show_error { "true" } else { "false" }}
                aria-describedby={show_error.then(|| error_id.clone())}
            />
            {if let Some(error) = props.error.filter(|_| props.touched) {
                html! {
                    <span class="error-message" id={error_id} role="alert">
                        {error.to_string()}
                    </span>
                }
            } else {
                html! {}
            }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PreferenceCheckboxProps {
    name: AttrValue,
    title: AttrValue,
    hint: AttrValue,
    checked: bool,
    onchange: Callback<Event>,
}

/// Checkbox row with a bold title and a small explanatory hint.
#[function_component(PreferenceCheckbox)]
fn preference_checkbox(props: &PreferenceCheckboxProps) -> Html {
    html! {
        <label class="checkbox-label">
            <input
                type="checkbox"
                name={props.name.clone()}
                checked={props.checked}
                onchange={props.onchange.clone()}
            />
            <span class="checkbox-text">
                <strong>{props.title.clone()}</strong>
                <small>{props.hint.clone()}</small>
            </span>
        </label>
    }
}
