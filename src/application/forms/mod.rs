pub mod bookmark_form;

pub use bookmark_form::{BookmarkDraft, BookmarkForm, FieldError, FormErrors, FormField};
