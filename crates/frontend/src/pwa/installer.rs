//! Install button state, kept apart from browser events so it can be tested

/// Browser family, for the manual install instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Unknown,
}

impl Browser {
    /// Detection from `navigator.userAgent`. Edge and Chrome both carry
    /// "chrome", Safari-only agents do not.
    pub fn detect(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        let edge = ua.contains("edg");
        if ua.contains("chrome") && !edge {
            Browser::Chrome
        } else if ua.contains("firefox") {
            Browser::Firefox
        } else if ua.contains("safari") && !ua.contains("chrome") {
            Browser::Safari
        } else if edge {
            Browser::Edge
        } else {
            Browser::Unknown
        }
    }

    pub fn install_instructions(&self) -> &'static str {
        match self {
            Browser::Chrome => "Click menu (⋮) → \"Install app\"",
            Browser::Firefox => "Click menu (☰) → \"Install\"",
            Browser::Safari => "Click share (⎋) → \"Add to Home Screen\"",
            Browser::Edge => "Click menu (⋯) → \"Install this site as an app\"",
            Browser::Unknown => {
                "Look for \"Install app\" or \"Add to Home Screen\" option in browser menu"
            }
        }
    }
}

/// Already running as an installed app: standalone display mode, iOS
/// home-screen launch, or opened from an Android app.
pub fn is_installed(standalone_display: bool, ios_standalone: bool, referrer: &str) -> bool {
    standalone_display || ios_standalone || referrer.contains("android-app://")
}

/// `userChoice.outcome` of the deferred prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    Accepted,
    Dismissed,
}

impl PromptOutcome {
    pub fn parse(outcome: &str) -> Self {
        if outcome == "accepted" {
            PromptOutcome::Accepted
        } else {
            PromptOutcome::Dismissed
        }
    }
}

/// Dialog opened by the install flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallDialog {
    Instructions(Browser),
    Tips,
}

/// What a click on the install button should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallAction {
    ShowPrompt,
    ShowInstructions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallState {
    pub installed: bool,
    pub prompt_deferred: bool,
    pub button_visible: bool,
    pub dialog: Option<InstallDialog>,
}

impl InstallState {
    pub fn new(installed: bool) -> Self {
        Self {
            installed,
            ..Self::default()
        }
    }

    /// `beforeinstallprompt` was captured and its default suppressed
    pub fn prompt_captured(&mut self) {
        self.prompt_deferred = true;
        self.button_visible = !self.installed;
    }

    /// The button still shows on service-worker browsers that never fired
    /// `beforeinstallprompt`; clicking it then opens the instructions.
    pub fn fallback_elapsed(&mut self, service_worker_supported: bool) {
        if service_worker_supported && !self.prompt_deferred && !self.installed {
            self.button_visible = true;
        }
    }

    pub fn app_installed(&mut self) {
        self.installed = true;
        self.prompt_deferred = false;
        self.button_visible = false;
    }

    pub fn click(&self) -> InstallAction {
        if self.prompt_deferred {
            InstallAction::ShowPrompt
        } else {
            InstallAction::ShowInstructions
        }
    }

    /// The deferred prompt can only be used once
    pub fn prompt_finished(&mut self, outcome: PromptOutcome) {
        self.prompt_deferred = false;
        if outcome == PromptOutcome::Dismissed {
            self.dialog = Some(InstallDialog::Tips);
        }
    }

    pub fn show_instructions(&mut self, browser: Browser) {
        self.dialog = Some(InstallDialog::Instructions(browser));
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME: &str = "Mozilla/5.0 (Linux; Android 13) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";
    const EDGE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0";
    const SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const FIREFOX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";

    #[test]
    fn test_browser_detection() {
        assert_eq!(Browser::detect(CHROME), Browser::Chrome);
        assert_eq!(Browser::detect(EDGE), Browser::Edge);
        assert_eq!(Browser::detect(SAFARI), Browser::Safari);
        assert_eq!(Browser::detect(FIREFOX), Browser::Firefox);
        assert_eq!(Browser::detect("curl/8.0"), Browser::Unknown);
        assert!(Browser::Safari.install_instructions().contains("Add to Home Screen"));
    }

    #[test]
    fn test_installed_detection() {
        assert!(is_installed(true, false, ""));
        assert!(is_installed(false, true, ""));
        assert!(is_installed(false, false, "android-app://com.example.pop/"));
        assert!(!is_installed(false, false, "https://pop.example.com/login"));
    }

    #[test]
    fn test_prompt_flow() {
        let mut state = InstallState::new(false);
        assert!(!state.button_visible);
        assert_eq!(state.click(), InstallAction::ShowInstructions);

        state.prompt_captured();
        assert!(state.button_visible);
        assert_eq!(state.click(), InstallAction::ShowPrompt);

        state.prompt_finished(PromptOutcome::parse("dismissed"));
        assert_eq!(state.dialog, Some(InstallDialog::Tips));
        assert_eq!(state.click(), InstallAction::ShowInstructions);

        state.close_dialog();
        state.prompt_captured();
        state.prompt_finished(PromptOutcome::parse("accepted"));
        assert_eq!(state.dialog, None);
    }

    #[test]
    fn test_fallback_button() {
        let mut state = InstallState::new(false);
        state.fallback_elapsed(false);
        assert!(!state.button_visible);
        state.fallback_elapsed(true);
        assert!(state.button_visible);

        let mut installed = InstallState::new(true);
        installed.fallback_elapsed(true);
        installed.prompt_captured();
        assert!(!installed.button_visible);
    }

    #[test]
    fn test_app_installed_hides_button() {
        let mut state = InstallState::new(false);
        state.prompt_captured();
        state.app_installed();
        assert!(state.installed);
        assert!(!state.button_visible);
    }
}
