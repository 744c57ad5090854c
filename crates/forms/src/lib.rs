//! Create/edit form controllers for categories and entries.
//!
//! A controller reads its mode from the route, validates the form before
//! anything leaves the client, calls the matching resource service and
//! reports the outcome through a [`Notifier`] and a [`Navigator`].

use client::{CategoryService, EntryService};

pub use controller::{
    CONNECTIVITY_FAILURE, FAILURE_MESSAGE, FormController, LOAD_FAILURE_ALERT, SUCCESS_MESSAGE,
    SubmitOutcome, server_error_messages,
};
pub use entry_form::EntryFormController;
pub use form::{FieldError, FieldErrorKind, FormControl, FormGroup, Validator};
pub use notify::{Navigation, Navigator, Notifier, RouteHistory, Toast, ToastLevel, ToastQueue};
pub use resource::FormResource;
pub use route::{Mode, Route};

mod controller;
mod entry_form;
mod form;
mod notify;
mod resource;
mod route;

pub type CategoryForm<V = RouteHistory, N = ToastQueue> = FormController<CategoryService, V, N>;

pub type EntryForm<V = RouteHistory, N = ToastQueue> =
    EntryFormController<EntryService, CategoryService, V, N>;
