pub mod settings_form;

pub use settings_form::SettingsForm;
