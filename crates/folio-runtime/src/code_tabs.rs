#![forbid(unsafe_code)]

//! Hero code tabs with a hidden tab.
//!
//! The visible tabs can always be selected. The secret tab becomes
//! selectable once the red window button has been clicked
//! [`CodeTabsConfig::unlock_clicks`] times; the click counter then resets.
//! The active tab's content drives the typewriter.

/// Default red-button clicks needed to reveal the secret tab.
pub const DEFAULT_UNLOCK_CLICKS: u32 = 5;

/// A named code sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTab {
    /// File-style tab name.
    pub name: String,
    /// Source text shown through the typewriter.
    pub content: String,
}

impl CodeTab {
    /// Create a tab.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Code tab configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTabsConfig {
    /// Red-button clicks that reveal the secret tab (default: 5).
    pub unlock_clicks: u32,
}

impl Default for CodeTabsConfig {
    fn default() -> Self {
        Self {
            unlock_clicks: DEFAULT_UNLOCK_CLICKS,
        }
    }
}

/// Tab strip state.
#[derive(Debug, Clone)]
pub struct CodeTabs {
    config: CodeTabsConfig,
    tabs: Vec<CodeTab>,
    secret: Option<CodeTab>,
    active: usize,
    red_clicks: u32,
    unlocked: bool,
}

impl CodeTabs {
    /// Create a tab strip. The first visible tab is active.
    #[must_use]
    pub fn new(config: CodeTabsConfig, tabs: Vec<CodeTab>, secret: Option<CodeTab>) -> Self {
        Self {
            config,
            tabs,
            secret,
            active: 0,
            red_clicks: 0,
            unlocked: false,
        }
    }

    /// Register a red-button click. Returns true on the click that unlocks.
    pub fn click_red_button(&mut self) -> bool {
        self.red_clicks += 1;
        if self.red_clicks < self.config.unlock_clicks.max(1) {
            return false;
        }
        self.red_clicks = 0;
        let newly = !self.unlocked && self.secret.is_some();
        self.unlocked = true;
        if newly {
            tracing::info!(target: "folio.code_tabs", "secret tab unlocked");
        }
        newly
    }

    /// Select a tab by strip position.
    ///
    /// Returns the new content if the active tab changed. Re-selecting the
    /// active tab, a locked tab, or an out-of-range index returns `None`.
    pub fn select(&mut self, index: usize) -> Option<&str> {
        if index == self.active || index >= self.selectable_len() {
            return None;
        }
        self.active = index;
        self.active_content()
    }

    /// Number of tabs the strip currently shows.
    #[must_use]
    pub fn selectable_len(&self) -> usize {
        self.tabs.len() + usize::from(self.unlocked && self.secret.is_some())
    }

    /// Content of the active tab.
    #[must_use]
    pub fn active_content(&self) -> Option<&str> {
        self.tab(self.active).map(|t| t.content.as_str())
    }

    /// Tab at a strip position, including the secret tab once unlocked.
    #[must_use]
    pub fn tab(&self, index: usize) -> Option<&CodeTab> {
        if index < self.tabs.len() {
            self.tabs.get(index)
        } else if index == self.tabs.len() && self.unlocked {
            self.secret.as_ref()
        } else {
            None
        }
    }

    /// Active tab position.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Whether the secret tab is revealed.
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Red-button clicks since the last unlock.
    #[must_use]
    pub fn red_clicks(&self) -> u32 {
        self.red_clicks
    }
}
