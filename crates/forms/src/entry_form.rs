use api_types::{
    category::Category,
    entry::{Entry, EntryType},
};
use client::ResourceService;

use crate::{
    controller::{FormController, SubmitOutcome},
    form::FormGroup,
    notify::{Navigator, Notifier, RouteHistory, ToastQueue},
    route::{Mode, Route},
};

/// Entry form: the shared form controller plus the category options and the
/// entry type options the page offers.
pub struct EntryFormController<S, C, V = RouteHistory, N = ToastQueue>
where
    S: ResourceService<Resource = Entry>,
{
    controller: FormController<S, V, N>,
    categories: C,
    category_options: Vec<Category>,
}

impl<S, C, V, N> EntryFormController<S, C, V, N>
where
    S: ResourceService<Resource = Entry>,
    C: ResourceService<Resource = Category>,
    V: Navigator,
    N: Notifier,
{
    pub fn new(service: S, categories: C, route: Route, navigator: V, notifier: N) -> Self {
        Self {
            controller: FormController::new(service, route, navigator, notifier),
            categories,
            category_options: Vec::new(),
        }
    }

    pub async fn init(&mut self) {
        self.controller.init().await;
        self.load_categories().await;
    }

    /// Refreshes the category options; on failure the options stay empty.
    pub async fn load_categories(&mut self) {
        match self.categories.get_all().await {
            Ok(categories) => self.category_options = categories,
            Err(err) => {
                tracing::warn!("could not load category options: {err}");
                self.category_options.clear();
            }
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome<Entry> {
        self.controller.submit().await
    }

    pub fn page_title(&self) -> String {
        self.controller.page_title()
    }

    pub fn can_submit(&self) -> bool {
        self.controller.can_submit()
    }
}

impl<S, C, V, N> EntryFormController<S, C, V, N>
where
    S: ResourceService<Resource = Entry>,
{
    /// `(value, label)` pairs for the type selector.
    pub fn type_options(&self) -> Vec<(&'static str, &'static str)> {
        EntryType::ALL
            .iter()
            .map(|kind| (kind.as_str(), kind.label()))
            .collect()
    }

    pub fn category_options(&self) -> &[Category] {
        &self.category_options
    }

    pub fn controller(&self) -> &FormController<S, V, N> {
        &self.controller
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    pub fn form(&self) -> &FormGroup {
        self.controller.form()
    }

    pub fn form_mut(&mut self) -> &mut FormGroup {
        self.controller.form_mut()
    }

    pub fn server_error_messages(&self) -> &[String] {
        self.controller.server_error_messages()
    }
}
