pub mod use_unsaved_changes_guard;

pub use use_unsaved_changes_guard::use_unsaved_changes_guard;
