use api_types::error::ValidationErrors;
use client::{ClientError, ResourceService, StatusCode};

use crate::{
    form::{FieldError, FieldErrorKind, FormGroup},
    notify::{Navigator, Notifier, RouteHistory, ToastLevel, ToastQueue},
    resource::FormResource,
    route::{Mode, Route},
};

pub const SUCCESS_MESSAGE: &str = "Request processed successfully!";
pub const FAILURE_MESSAGE: &str = "An error occurred while processing your request.";
pub const LOAD_FAILURE_ALERT: &str = "A server error occurred, please try again later.";
pub const CONNECTIVITY_FAILURE: &str =
    "Failed to communicate with the server. Please try again later.";

/// Result of [`FormController::submit`].
#[derive(Debug)]
pub enum SubmitOutcome<R> {
    /// The form is invalid; no request was issued.
    Blocked(Vec<FieldError>),
    /// A previous submission is pending or already saved the record.
    Busy,
    Saved(R),
    Failed(ClientError),
}

/// Messages to show for a failed submission: the `errors` list of a 422
/// body, a single connectivity message for anything else.
pub fn server_error_messages(err: &ClientError) -> Vec<String> {
    if err.status() == Some(StatusCode::UNPROCESSABLE_ENTITY) {
        let parsed = err
            .body()
            .and_then(|body| serde_json::from_str::<ValidationErrors>(body).ok());
        if let Some(ValidationErrors { errors }) = parsed {
            return errors;
        }
    }
    vec![CONNECTIVITY_FAILURE.to_string()]
}

/// Create/edit controller for one resource type.
///
/// The mode comes from the route: `new` creates, anything else edits the
/// record whose id is the first route segment.
pub struct FormController<S, V = RouteHistory, N = ToastQueue>
where
    S: ResourceService,
{
    service: S,
    navigator: V,
    notifier: N,
    route: Route,
    mode: Mode,
    form: FormGroup,
    resource: Option<S::Resource>,
    submitting: bool,
    server_error_messages: Vec<String>,
}

impl<S, V, N> FormController<S, V, N>
where
    S: ResourceService,
    S::Resource: FormResource,
    V: Navigator,
    N: Notifier,
{
    pub fn new(service: S, route: Route, navigator: V, notifier: N) -> Self {
        let mode = Mode::from_route(&route);
        Self {
            service,
            navigator,
            notifier,
            route,
            mode,
            form: S::Resource::build_form(),
            resource: None,
            submitting: false,
            server_error_messages: Vec::new(),
        }
    }

    /// Loads the record being edited; does nothing in `new` mode.
    ///
    /// A failed load raises an alert and leaves the form unpopulated.
    pub async fn init(&mut self) {
        if self.mode != Mode::Edit {
            return;
        }

        let Some(id) = self.route.id() else {
            tracing::warn!("edit route without a numeric id: {:?}", self.route);
            self.notifier.alert(LOAD_FAILURE_ALERT);
            return;
        };

        match self.service.get_by_id(id).await {
            Ok(resource) => {
                if let Err(err) = self.form.patch_value(&resource) {
                    tracing::error!("failed to patch form with record {id}: {err}");
                    self.notifier.alert(LOAD_FAILURE_ALERT);
                    return;
                }
                self.resource = Some(resource);
            }
            Err(_) => self.notifier.alert(LOAD_FAILURE_ALERT),
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome<S::Resource> {
        if self.submitting {
            tracing::warn!("submission ignored: a previous one is still in progress");
            return SubmitOutcome::Busy;
        }

        let errors = self.form.errors();
        if !errors.is_empty() {
            tracing::warn!("submission blocked: {} invalid field(s)", errors.len());
            return SubmitOutcome::Blocked(errors);
        }

        let record = match S::Resource::from_form(self.form.value()) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!("submission blocked: {err}");
                return SubmitOutcome::Blocked(vec![FieldError {
                    field: "form".to_string(),
                    kind: FieldErrorKind::Invalid(err.to_string()),
                }]);
            }
        };

        self.submitting = true;
        let result = match self.mode {
            Mode::New => self.service.create(record).await,
            Mode::Edit => self.service.update(record).await,
        };

        match result {
            Ok(saved) => {
                self.on_success(&saved);
                SubmitOutcome::Saved(saved)
            }
            Err(err) => {
                self.on_failure(&err);
                SubmitOutcome::Failed(err)
            }
        }
    }

    fn on_success(&mut self, saved: &S::Resource) {
        self.notifier.toast(ToastLevel::Success, SUCCESS_MESSAGE);

        let list = S::Resource::LIST_ROUTE;
        self.navigator.navigate(list, true);
        match saved.id() {
            Some(id) => self.navigator.navigate(&format!("{list}/{id}/edit"), false),
            None => tracing::warn!("saved record has no id, staying on {list}"),
        }
    }

    fn on_failure(&mut self, err: &ClientError) {
        self.notifier.toast(ToastLevel::Error, FAILURE_MESSAGE);
        self.submitting = false;
        self.server_error_messages = server_error_messages(err);
    }

    pub fn page_title(&self) -> String {
        match self.mode {
            Mode::New => S::Resource::NEW_TITLE.to_string(),
            Mode::Edit => {
                let name = self.resource.as_ref().map(|r| r.name()).unwrap_or("");
                format!("{}{name}", S::Resource::EDIT_TITLE)
            }
        }
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.form.is_valid()
    }
}

impl<S, V, N> FormController<S, V, N>
where
    S: ResourceService,
{
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn form(&self) -> &FormGroup {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormGroup {
        &mut self.form
    }

    /// Record loaded in edit mode.
    pub fn resource(&self) -> Option<&S::Resource> {
        self.resource.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn server_error_messages(&self) -> &[String] {
        &self.server_error_messages
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn navigator(&self) -> &V {
        &self.navigator
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: StatusCode, body: &str) -> ClientError {
        ClientError::Status {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn validation_body_yields_its_messages() {
        let err = status_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"errors":["name is too short"]}"#,
        );
        assert_eq!(server_error_messages(&err), ["name is too short"]);
    }

    #[test]
    fn other_statuses_yield_one_generic_message() {
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, r#"{"errors":["x"]}"#);
        assert_eq!(server_error_messages(&err), [CONNECTIVITY_FAILURE]);
        assert_eq!(
            server_error_messages(&ClientError::MissingId),
            [CONNECTIVITY_FAILURE]
        );
    }

    #[test]
    fn malformed_validation_body_falls_back_to_generic_message() {
        let err = status_error(StatusCode::UNPROCESSABLE_ENTITY, "not json");
        assert_eq!(server_error_messages(&err), [CONNECTIVITY_FAILURE]);
    }
}
