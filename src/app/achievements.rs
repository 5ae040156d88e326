use log::debug;

use super::*;

/// Everything the other components report to the badge engine. The engine
/// itself only reads counters and the event payload; it never mutates
/// anything besides the unlocked set.
pub enum AchievementEvent {
    RuleAdded,
    CategoryCreated,
    QuestionDrafted,
    SectionVisited,
    DarkModeEnabled,
    TestPublished { question_count: usize },
    TestCompleted { record: StatRecord },
}

impl App {
    /// Evaluates the fixed thresholds for one event. Re-triggering a
    /// condition for an already-unlocked id is a no-op.
    pub fn process_achievement_event(&mut self, event: AchievementEvent) {
        match event {
            AchievementEvent::RuleAdded => {
                self.unlock("rule-author");
                if self.custom_rules.len() >= 5 {
                    self.unlock("rule-collector");
                }
            }
            AchievementEvent::CategoryCreated => {
                self.unlock("category-creator");
                if self.user_sections.len() >= 3 {
                    self.unlock("category-curator");
                }
            }
            AchievementEvent::QuestionDrafted => {
                if self.metrics.draft_questions_added >= 10 {
                    self.unlock("draft-master");
                }
            }
            AchievementEvent::SectionVisited => {
                let all_visited = self
                    .builtin_sections
                    .iter()
                    .all(|s| self.metrics.visited_sections.contains(&s.id));
                if all_visited {
                    self.unlock("polyglot");
                }
            }
            AchievementEvent::DarkModeEnabled => {
                self.unlock("night-owl");
            }
            AchievementEvent::TestPublished { question_count } => {
                self.unlock("test-builder");
                if question_count >= 5 {
                    self.unlock("test-architect");
                }
                if self.tests.len() >= 3 {
                    self.unlock("test-mentor");
                }
            }
            AchievementEvent::TestCompleted { record } => {
                if self.stats.len() == 1 {
                    self.unlock("first-test-pass");
                }
                if record.percent == 100 {
                    self.unlock("perfect-score");
                }
                if record.duration_ms <= 30_000 {
                    self.unlock("quick-run");
                }
                if self.stats.len() >= 5 {
                    self.unlock("stat-keeper");
                }
                if record.total >= 8 {
                    self.unlock("marathon-runner");
                }
            }
        }
    }

    /// Appends the id to the unlocked set and persists it. Returns whether
    /// this call actually unlocked something. Ids are never removed.
    pub fn unlock(&mut self, id: &str) -> bool {
        if id.is_empty() || self.is_unlocked(id) {
            return false;
        }
        self.unlocked.push(id.to_string());
        self.save_achievements();
        debug!("achievement unlocked: {id}");
        true
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|u| u == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publish_one(app: &mut App, title: &str, questions: usize) {
        for i in 0..questions {
            app.add_question(&format!("Пытанне {i}"), "так", "не")
                .expect("add question");
        }
        app.publish(title, "", "@autar").expect("publish");
    }

    #[test]
    fn unlocking_is_idempotent_and_monotonic() {
        let mut app = App::in_memory();
        assert!(app.unlock("rule-author"));
        assert!(!app.unlock("rule-author"));
        assert_eq!(app.unlocked, vec!["rule-author"]);

        // No subsequent operation removes an unlocked id.
        app.register_teacher("mentor", "pass").expect("register");
        publish_one(&mut app, "Тэст", 1);
        app.logout();
        assert!(app.is_unlocked("rule-author"));
    }

    #[test]
    fn first_rule_and_fifth_rule_thresholds() {
        let mut app = App::in_memory();
        app.add_rule("Першае", "Тэкст", "phonetics").expect("add");
        assert!(app.is_unlocked("rule-author"));
        assert!(!app.is_unlocked("rule-collector"));
        for i in 0..4 {
            app.add_rule(&format!("Правіла {i}"), "Тэкст", "phonetics")
                .expect("add");
        }
        assert!(app.is_unlocked("rule-collector"));
    }

    #[test]
    fn mentor_unlocks_on_the_third_publish_exactly_once() {
        let mut app = App::in_memory();
        publish_one(&mut app, "Першы", 1);
        publish_one(&mut app, "Другі", 1);
        assert!(!app.is_unlocked("test-mentor"));
        publish_one(&mut app, "Трэці", 1);
        assert!(app.is_unlocked("test-mentor"));
        let count = app.unlocked.len();
        publish_one(&mut app, "Чацвёрты", 1);
        assert_eq!(app.unlocked.len(), count);
    }

    #[test]
    fn architect_needs_a_five_question_test() {
        let mut app = App::in_memory();
        publish_one(&mut app, "Малы", 4);
        assert!(!app.is_unlocked("test-architect"));
        publish_one(&mut app, "Вялікі", 5);
        assert!(app.is_unlocked("test-architect"));
    }

    #[test]
    fn polyglot_needs_every_builtin_section() {
        let mut app = App::in_memory();
        let ids: Vec<String> = app.builtin_sections.iter().map(|s| s.id.clone()).collect();
        for id in &ids[..ids.len() - 1] {
            app.set_active_category(id);
        }
        assert!(!app.is_unlocked("polyglot"));
        app.set_active_category(ids.last().expect("non-empty"));
        assert!(app.is_unlocked("polyglot"));

        // Custom sections do not count towards it.
        let mut fresh = App::in_memory();
        let custom = fresh.create_category("Ідыёмы").expect("create");
        fresh.set_active_category(&custom);
        assert!(!fresh.is_unlocked("polyglot"));
    }

    #[test]
    fn draft_master_counts_cumulative_questions() {
        let mut app = App::in_memory();
        for i in 0..9 {
            app.add_question(&format!("Пытанне {i}"), "так", "не")
                .expect("add");
        }
        // Publishing clears the draft but not the cumulative counter.
        app.publish("Тэст", "", "@autar").expect("publish");
        assert!(!app.is_unlocked("draft-master"));
        app.add_question("Дзясятае", "так", "не").expect("add");
        assert!(app.is_unlocked("draft-master"));
    }

    #[test]
    fn completion_thresholds_fire_from_the_fresh_record() {
        let mut app = App::in_memory();
        publish_one(&mut app, "Вялікі тэст", 8);
        let test = app.tests[0].clone();
        app.start_session(test);
        app.confirm_participant("Госць");
        let correct: Vec<usize> = app.active_session.as_ref().expect("session").test.questions
            .iter()
            .map(|q| q.correct_index)
            .collect();
        for index in correct {
            app.submit_answer(index);
        }
        assert!(app.is_unlocked("first-test-pass"));
        assert!(app.is_unlocked("perfect-score"));
        assert!(app.is_unlocked("marathon-runner"));
        // An in-process run completes well inside the 30s window.
        assert!(app.is_unlocked("quick-run"));
        assert!(!app.is_unlocked("stat-keeper"));
    }

    #[test]
    fn stat_keeper_needs_five_records() {
        let mut app = App::in_memory();
        publish_one(&mut app, "Тэст", 1);
        let test = app.tests[0].clone();
        for _ in 0..5 {
            app.start_session(test.clone());
            app.confirm_participant("Госць");
            let index = app.active_session.as_ref().expect("session").test.questions[0]
                .correct_index;
            app.submit_answer(index);
        }
        assert_eq!(app.stats.len(), 5);
        assert!(app.is_unlocked("stat-keeper"));
    }
}
