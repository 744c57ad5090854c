//! Outbound UI effects of a form: toasts, blocking alerts and navigation.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

pub trait Notifier {
    /// Non-blocking notification.
    fn toast(&mut self, level: ToastLevel, message: &str);

    /// Blocking alert the user has to dismiss.
    fn alert(&mut self, message: &str);
}

pub trait Navigator {
    /// Navigates to `url`; with `skip_location_change` the visible location is
    /// left untouched.
    fn navigate(&mut self, url: &str, skip_location_change: bool);
}

/// Notifier keeping every toast and alert in order.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    alerts: Vec<String>,
}

impl ToastQueue {
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }
}

impl Notifier for ToastQueue {
    fn toast(&mut self, level: ToastLevel, message: &str) {
        match level {
            ToastLevel::Error => tracing::warn!("toast: {message}"),
            ToastLevel::Success => tracing::info!("toast: {message}"),
        }
        self.toasts.push(Toast {
            level,
            message: message.to_string(),
        });
    }

    fn alert(&mut self, message: &str) {
        tracing::warn!("alert: {message}");
        self.alerts.push(message.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub url: String,
    pub skip_location_change: bool,
}

/// Navigator recording every navigation.
#[derive(Debug, Default)]
pub struct RouteHistory {
    navigations: Vec<Navigation>,
}

impl RouteHistory {
    pub fn navigations(&self) -> &[Navigation] {
        &self.navigations
    }

    /// Location shown to the user: the last navigation that changed it.
    pub fn location(&self) -> Option<&str> {
        self.navigations
            .iter()
            .rev()
            .find(|navigation| !navigation.skip_location_change)
            .map(|navigation| navigation.url.as_str())
    }
}

impl Navigator for RouteHistory {
    fn navigate(&mut self, url: &str, skip_location_change: bool) {
        tracing::debug!("navigate to {url}");
        self.navigations.push(Navigation {
            url: url.to_string(),
            skip_location_change,
        });
    }
}
