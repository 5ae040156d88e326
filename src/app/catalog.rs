use super::*;
use crate::error::{AppError, AppResult};
use crate::model::RuleItem;
use crate::util;

/// Section id of the form `cat-<slug>`, suffixed until it is free.
pub(crate) fn generate_section_id(title: &str, taken: &HashSet<String>) -> String {
    let base = util::slugify(title);
    let mut candidate = format!("cat-{base}");
    let mut suffix = 1;
    while taken.contains(&candidate) {
        candidate = format!("cat-{base}-{suffix}");
        suffix += 1;
    }
    candidate
}

impl App {
    /// Built-in sections first, then user-created ones, always in that order.
    pub fn all_sections(&self) -> Vec<&RuleSection> {
        self.builtin_sections
            .iter()
            .chain(self.user_sections.iter())
            .collect()
    }

    pub fn section(&self, section_id: &str) -> Option<&RuleSection> {
        self.all_sections().into_iter().find(|s| s.id == section_id)
    }

    pub fn has_section(&self, section_id: &str) -> bool {
        self.section(section_id).is_some()
    }

    pub fn default_category(&self) -> &str {
        self.builtin_sections
            .first()
            .map(|s| s.id.as_str())
            .unwrap_or("phonetics")
    }

    /// Creates a user section, or returns the id of an existing section with
    /// the same title (case-insensitive) instead of duplicating it.
    pub fn create_category(&mut self, raw_title: &str) -> AppResult<String> {
        let title = raw_title.trim();
        if title.is_empty() {
            return Err(AppError::validation("category title is required"));
        }
        let wanted = title.to_lowercase();
        if let Some(existing) = self.all_sections().into_iter().find(|s| s.title.to_lowercase() == wanted) {
            return Ok(existing.id.clone());
        }

        let taken: HashSet<String> = self.all_sections().into_iter().map(|s| s.id.clone()).collect();
        let id = generate_section_id(title, &taken);
        self.user_sections.push(RuleSection {
            id: id.clone(),
            title: title.to_string(),
            tagline: "Карыстальніцкая катэгорыя".to_string(),
            rules: Vec::new(),
            is_custom: true,
        });
        self.save_user_sections();
        self.process_achievement_event(AchievementEvent::CategoryCreated);
        Ok(id)
    }

    /// Prepends a custom rule to the flat list (most recent first).
    pub fn add_rule(&mut self, title: &str, body: &str, category: &str) -> AppResult<()> {
        let title = title.trim();
        let body = body.trim();
        if title.is_empty() || body.is_empty() {
            return Err(AppError::validation("rule title and body are required"));
        }
        if !self.has_section(category) {
            return Err(AppError::UnknownCategory);
        }

        self.custom_rules.insert(
            0,
            RuleItem {
                id: util::uid(),
                title: title.to_string(),
                body: body.to_string(),
                created_at: util::now_ms(),
                is_custom: true,
                category: category.to_string(),
            },
        );
        self.save_rules();
        self.process_achievement_event(AchievementEvent::RuleAdded);
        Ok(())
    }

    pub fn count_rules_in_section(&self, section_id: &str) -> usize {
        let base = self.section(section_id).map(|s| s.rules.len()).unwrap_or(0);
        base + self
            .custom_rules
            .iter()
            .filter(|r| r.category == section_id)
            .count()
    }

    /// Built-in rules of the section followed by the custom ones filed there.
    pub fn rules_in_section(&self, section_id: &str) -> Vec<&RuleItem> {
        let mut items: Vec<&RuleItem> = self
            .section(section_id)
            .map(|s| s.rules.iter().collect())
            .unwrap_or_default();
        items.extend(self.custom_rules.iter().filter(|r| r.category == section_id));
        items
    }

    /// Unknown ids silently fall back to the default category; this is a
    /// tolerance policy, not an error path.
    pub fn set_active_category(&mut self, category_id: &str) {
        let next = if self.has_section(category_id) {
            category_id.to_string()
        } else {
            self.default_category().to_string()
        };
        self.rule_category = next.clone();
        self.record_section_visit(&next);
    }

    pub fn record_section_visit(&mut self, section_id: &str) {
        if section_id.is_empty() {
            return;
        }
        if self.metrics.visited_sections.insert(section_id.to_string()) {
            self.save_metrics();
        }
        self.process_achievement_event(AchievementEvent::SectionVisited);
    }
}
