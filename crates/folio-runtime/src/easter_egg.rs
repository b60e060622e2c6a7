#![forbid(unsafe_code)]

//! Small click and key easter eggs.
//!
//! | Trigger | Effect |
//! |---------|--------|
//! | `r` / `R` | toggle rainbow mode, notify when turned on |
//! | name click | coin sound |
//! | keyword double-click | sound and centered notification for favorites |
//! | heart clicks | footer message for a while |
//! | project click sequence | secret project for a while |
//!
//! Each egg is independent. The timed ones own a named one-shot timer
//! (`FooterReveal`, `ProjectIdle`, `ProjectReveal`) and re-arming it
//! supersedes the previous deadline.

use std::time::Duration;

use folio_core::event::{KeyCode, KeyEvent};

use crate::effect::{Anchor, Cmd, NotifySite, SoundRequest, TimerName};

/// Sound played when the name is clicked.
pub const COIN_SOUND_URL: &str = "https://www.myinstants.com/media/sounds/mario-coin.mp3";
/// Volume for every easter egg sound.
pub const EGG_VOLUME: f32 = 0.2;
/// Message shown when rainbow mode turns on.
pub const RAINBOW_MESSAGE: &str = "🌈 Rainbow mode activated!";

/// Footer messages, shown in rotation.
pub const FOOTER_MESSAGES: [&str; 10] = [
    "Thanks for visiting my portfolio!",
    "Hope you enjoyed the easter eggs!",
    "Have a great day!",
    "Don't forget to try the Konami code!",
    "Press 'R' for rainbow mode!",
    "Click the red button in the code editor 5 times!",
    "Double-click on the 3D shapes!",
    "Click the terminal for interactive mode!",
    "Try clicking projects in sequence: 1st, 3rd, 2nd, 4th!",
    "There are more secrets to discover...",
];

/// Sound URL for a favorite keyword.
#[must_use]
pub fn keyword_sound_url(keyword: &str) -> String {
    format!("https://api.dicebear.com/7.x/bottts/svg?seed={keyword}")
}

/// Easter egg tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct EasterEggConfig {
    /// Rainbow notification display time (default: 3s).
    pub rainbow_display: Duration,
    /// Favorite keyword notification display time (default: 2s).
    pub keyword_display: Duration,
    /// Keywords that react to a double-click.
    pub favorite_keywords: Vec<String>,
    /// Heart clicks before the footer message shows (default: 3).
    pub heart_clicks: u32,
    /// Footer message display time (default: 5s).
    pub footer_display: Duration,
    /// Project click order that reveals the secret project.
    pub project_sequence: Vec<usize>,
    /// Inactivity after which a partial project sequence is dropped (default: 3s).
    pub project_idle: Duration,
    /// Secret project display time (default: 10s).
    pub project_display: Duration,
}

impl Default for EasterEggConfig {
    fn default() -> Self {
        Self {
            rainbow_display: Duration::from_secs(3),
            keyword_display: Duration::from_secs(2),
            favorite_keywords: ["Python", "JavaScript", "TypeScript", "React"]
                .into_iter()
                .map(String::from)
                .collect(),
            heart_clicks: 3,
            footer_display: Duration::from_secs(5),
            project_sequence: vec![0, 2, 1, 3],
            project_idle: Duration::from_secs(3),
            project_display: Duration::from_secs(10),
        }
    }
}

/// Easter egg state.
#[derive(Debug, Clone, Default)]
pub struct EasterEggs {
    config: EasterEggConfig,
    rainbow: bool,
    heart_clicks: u32,
    footer: Option<&'static str>,
    footer_shown: usize,
    project_clicks: Vec<usize>,
    secret_project: bool,
}

impl EasterEggs {
    /// Create the eggs.
    #[must_use]
    pub fn new(config: EasterEggConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Handle a key press. Only `r` and `R` do anything.
    pub fn on_key(&mut self, key: &KeyEvent) -> Cmd {
        match key.code {
            KeyCode::Char('r' | 'R') if key.is_press() && key.printable().is_some() => {
                self.toggle_rainbow()
            }
            _ => Cmd::none(),
        }
    }

    /// Flip rainbow mode.
    pub fn toggle_rainbow(&mut self) -> Cmd {
        self.rainbow = !self.rainbow;
        tracing::debug!(target: "folio.easter_egg", on = self.rainbow, "rainbow toggled");
        if !self.rainbow {
            return Cmd::none();
        }
        Cmd::notify(
            NotifySite::Rainbow,
            Anchor::TopRight,
            RAINBOW_MESSAGE,
            self.config.rainbow_display,
        )
    }

    /// Handle a click on the name heading.
    pub fn click_name(&mut self) -> Cmd {
        Cmd::PlaySound(SoundRequest::new(COIN_SOUND_URL, EGG_VOLUME))
    }

    /// Handle a double-click on a skill keyword.
    pub fn double_click_keyword(&mut self, keyword: &str) -> Cmd {
        if !self.config.favorite_keywords.iter().any(|k| k == keyword) {
            return Cmd::none();
        }
        Cmd::batch(vec![
            Cmd::PlaySound(SoundRequest::new(keyword_sound_url(keyword), EGG_VOLUME)),
            Cmd::notify(
                NotifySite::FavoriteKeyword,
                Anchor::Center,
                format!("{keyword} is one of my favorite technologies!"),
                self.config.keyword_display,
            ),
        ])
    }

    /// Handle a heart click.
    ///
    /// From the threshold click on, every click shows the next footer
    /// message and restarts the display timer.
    pub fn click_heart(&mut self) -> Cmd {
        self.heart_clicks = self.heart_clicks.saturating_add(1);
        if self.heart_clicks < self.config.heart_clicks.max(1) {
            return Cmd::none();
        }
        let message = FOOTER_MESSAGES[self.footer_shown % FOOTER_MESSAGES.len()];
        self.footer_shown += 1;
        self.footer = Some(message);
        tracing::debug!(target: "folio.easter_egg", message, "footer message shown");
        Cmd::arm(TimerName::FooterReveal, self.config.footer_display)
    }

    /// Handle the footer display timer.
    pub fn on_footer_timeout(&mut self) {
        self.footer = None;
        self.heart_clicks = 0;
    }

    /// Handle a click on the project at `index`.
    pub fn click_project(&mut self, index: usize) -> Cmd {
        // Past the pattern length nothing can match until the idle clear.
        if self.project_clicks.len() <= self.config.project_sequence.len() {
            self.project_clicks.push(index);
        }
        let idle = Cmd::arm(TimerName::ProjectIdle, self.config.project_idle);
        if self.project_clicks != self.config.project_sequence {
            return idle;
        }
        self.secret_project = true;
        tracing::info!(target: "folio.easter_egg", "secret project revealed");
        Cmd::batch(vec![
            idle,
            Cmd::arm(TimerName::ProjectReveal, self.config.project_display),
        ])
    }

    /// Handle the project inactivity timer.
    pub fn on_project_idle(&mut self) {
        self.project_clicks.clear();
    }

    /// Handle the secret project display timer.
    pub fn on_project_reveal_timeout(&mut self) {
        self.secret_project = false;
        self.project_clicks.clear();
    }

    /// Whether rainbow mode is on.
    #[must_use]
    pub fn rainbow(&self) -> bool {
        self.rainbow
    }

    /// Footer message currently shown.
    #[must_use]
    pub fn footer_message(&self) -> Option<&'static str> {
        self.footer
    }

    /// Heart clicks since the last reset.
    #[must_use]
    pub fn heart_clicks(&self) -> u32 {
        self.heart_clicks
    }

    /// Project clicks recorded since the last clear.
    #[must_use]
    pub fn project_clicks(&self) -> &[usize] {
        &self.project_clicks
    }

    /// Whether the secret project is shown.
    #[must_use]
    pub fn secret_project(&self) -> bool {
        self.secret_project
    }
}
