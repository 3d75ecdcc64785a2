use client_core::{NavigationTarget, Navigator};
use tracing::info;
use url::Url;

/// A terminal cannot follow a redirect, so it tells the user where to go.
pub struct TerminalNavigator {
    server_url: Url,
}

impl TerminalNavigator {
    pub fn new(server_url: Url) -> Self {
        Self { server_url }
    }

    /// Absolute URL for `target`; the app root is resolved against the
    /// server the spool was loaded from.
    pub fn resolve(&self, target: &NavigationTarget) -> String {
        match target {
            NavigationTarget::PrinterUrl(url) => url.clone(),
            NavigationTarget::AppRoot => self
                .server_url
                .join(target.as_str())
                .map(String::from)
                .unwrap_or_else(|_| self.server_url.to_string()),
        }
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, target: &NavigationTarget) {
        let destination = self.resolve(target);
        info!(%destination, "redirect fired");
        println!("Continue at {destination}");
    }
}

#[cfg(test)]
#[path = "tests/navigator_tests.rs"]
mod tests;
