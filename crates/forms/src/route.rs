/// Relative route of a form page, e.g. `new` or `5/edit`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
    segments: Vec<String>,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn first_segment(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Numeric id carried by an edit route (`<id>/edit`).
    pub fn id(&self) -> Option<i64> {
        self.first_segment()?.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    New,
    Edit,
}

impl Mode {
    /// `new` as first segment selects creation, anything else editing.
    pub fn from_route(route: &Route) -> Self {
        match route.first_segment() {
            Some("new") => Self::New,
            _ => Self::Edit,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Edit => "edit",
        }
    }
}
