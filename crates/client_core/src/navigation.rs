use shared::domain::Printer;

/// Path the user lands on when the printer has no management URL.
pub const APP_ROOT: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    PrinterUrl(String),
    AppRoot,
}

impl NavigationTarget {
    pub fn for_printer(printer: &Printer) -> Self {
        match printer.redirect_url() {
            Some(url) => Self::PrinterUrl(url.to_string()),
            None => Self::AppRoot,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::PrinterUrl(url) => url,
            Self::AppRoot => APP_ROOT,
        }
    }
}

/// Performs the post-assignment redirect. Whatever hosts the controller
/// decides what "navigating" means.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &NavigationTarget);
}
