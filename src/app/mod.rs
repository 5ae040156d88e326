use std::collections::HashSet;

use crate::bridge::{HostBridge, NoBridge};
use crate::data;
use crate::model::{
    Achievement, Draft, Metrics, RuleItem, RuleSection, Session, StatRecord, Test, Theme, User,
};
use crate::storage::{Storage, keys};

// Submodules
pub mod achievements;
pub mod auth;
pub mod authoring;
pub mod catalog;
pub mod queries;
pub mod session;
pub mod view_models;

pub use achievements::AchievementEvent;

// Re-export of view models
pub use crate::view_models::{AchievementCard, GroupSummary, SectionInfo, StudentRow, TeacherRow};

/// The whole application state plus its persistence and host handles. Every
/// operation lives in an `impl App` block inside the submodule that owns it.
pub struct App {
    pub storage: Storage,
    pub bridge: Box<dyn HostBridge>,
    /// Immutable seed data.
    pub builtin_sections: Vec<RuleSection>,
    pub achievement_catalog: Vec<Achievement>,
    /// Persisted collections, most recent first.
    pub tests: Vec<Test>,
    pub stats: Vec<StatRecord>,
    pub custom_rules: Vec<RuleItem>,
    pub user_sections: Vec<RuleSection>,
    pub users: Vec<User>,
    pub unlocked: Vec<String>,
    pub metrics: Metrics,
    /// Working state.
    pub draft: Draft,
    pub active_session: Option<Session>,
    pub current_user: Option<User>,
    pub rule_category: String,
    pub theme: Theme,
}

impl App {
    /// Reads every persisted key with its documented default, normalizes the
    /// loosely-typed collections and flushes the normalized copies back.
    pub fn load(storage: Storage, bridge: Box<dyn HostBridge>) -> Self {
        let builtin_sections = data::builtin_sections();
        let achievement_catalog = data::achievement_catalog();
        let fallback_category = builtin_sections
            .first()
            .map(|s| s.id.clone())
            .unwrap_or_else(|| "phonetics".to_string());

        let mut user_sections: Vec<RuleSection> = storage.load_or(keys::RULE_SECTIONS, Vec::new());
        let mut known_ids: HashSet<String> =
            builtin_sections.iter().map(|s| s.id.clone()).collect();
        for section in &mut user_sections {
            if section.id.trim().is_empty() {
                let seed = if section.title.trim().is_empty() {
                    "custom"
                } else {
                    section.title.as_str()
                };
                section.id = catalog::generate_section_id(seed, &known_ids);
            }
            if section.title.trim().is_empty() {
                section.title = "Катэгорыя".to_string();
            }
            if section.tagline.trim().is_empty() {
                section.tagline = "Карыстальніцкая катэгорыя".to_string();
            }
            section.is_custom = true;
            known_ids.insert(section.id.clone());
        }

        let mut custom_rules: Vec<RuleItem> = storage.load_or(keys::RULES, Vec::new());
        for rule in &mut custom_rules {
            // Dangling references are rewritten, never dropped.
            if !known_ids.contains(&rule.category) {
                rule.category = fallback_category.clone();
            }
            rule.is_custom = true;
        }

        let stored_theme = storage
            .read_raw(keys::THEME)
            .map(|raw| Theme::from_raw(&raw))
            .unwrap_or_default();
        let theme = bridge.color_scheme().unwrap_or(stored_theme);

        let mut app = Self {
            builtin_sections,
            achievement_catalog,
            tests: storage.load_or(keys::TESTS, Vec::new()),
            stats: storage.load_or(keys::STATS, Vec::new()),
            users: storage.load_or(keys::USERS, Vec::new()),
            unlocked: storage.load_or(keys::ACHIEVEMENTS, Vec::new()),
            metrics: storage.load_or(keys::METRICS, Metrics::default()),
            custom_rules,
            user_sections,
            draft: Draft::default(),
            active_session: None,
            current_user: None,
            rule_category: fallback_category,
            theme,
            storage,
            bridge,
        };

        app.save_rules();
        app.save_user_sections();
        app.save_achievements();
        app.save_metrics();
        app.apply_theme(theme);

        app.resume_session();
        if app.is_authenticated() {
            let category = app.rule_category.clone();
            app.record_section_visit(&category);
        }
        app
    }

    /// Fresh app over a volatile store and no host bridge.
    pub fn in_memory() -> Self {
        Self::load(Storage::in_memory(), Box::new(NoBridge))
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Flips the theme, persists it and notifies the host. The first switch
    /// into dark mode is an achievement trigger.
    pub fn toggle_theme(&mut self) {
        let next = self.theme.toggled();
        self.apply_theme(next);
        if next == Theme::Dark && !self.metrics.dark_mode_used {
            self.metrics.dark_mode_used = true;
            self.save_metrics();
            self.process_achievement_event(AchievementEvent::DarkModeEnabled);
        }
        self.bridge.haptic_pulse();
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.storage.write_raw(keys::THEME, theme.as_str());
        self.bridge.apply_chrome(theme);
    }

    // Flush helpers. The storage adapter is the sole writer of durable state;
    // every mutation explicitly pushes its collection through one of these.
    pub(crate) fn save_tests(&mut self) {
        self.storage.save(keys::TESTS, &self.tests);
    }

    pub(crate) fn save_stats(&mut self) {
        self.storage.save(keys::STATS, &self.stats);
    }

    pub(crate) fn save_rules(&mut self) {
        self.storage.save(keys::RULES, &self.custom_rules);
    }

    pub(crate) fn save_user_sections(&mut self) {
        self.storage.save(keys::RULE_SECTIONS, &self.user_sections);
    }

    pub(crate) fn save_achievements(&mut self) {
        self.storage.save(keys::ACHIEVEMENTS, &self.unlocked);
    }

    pub(crate) fn save_metrics(&mut self) {
        self.storage.save(keys::METRICS, &self.metrics);
    }

    pub(crate) fn save_users(&mut self) {
        self.storage.save(keys::USERS, &self.users);
    }

    pub(crate) fn save_auth(&mut self) {
        match &self.current_user {
            Some(user) => self.storage.save(keys::AUTH, user),
            None => self.storage.remove(keys::AUTH),
        }
    }
}
