use super::*;
use crate::model::{SessionPhase, StudentResult};
use crate::util;

/// Rounded percentage with the zero-question guard: an empty test scores 0%.
pub(crate) fn percent_of(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u32
}

impl App {
    /// Opens a fresh attempt at `test`, replacing any prior session
    /// unconditionally. Students enter with their own name pre-filled; other
    /// roles pick a participant name when they confirm.
    pub fn start_session(&mut self, test: Test) {
        let participant = self
            .current_user
            .as_ref()
            .and_then(User::as_student)
            .map(|s| s.full_name())
            .unwrap_or_default();
        self.active_session = Some(Session {
            test,
            index: 0,
            correct: 0,
            participant,
            started: false,
            start_time: None,
            completed: false,
            duration_ms: 0,
        });
    }

    /// Moves the session into progress and stamps the start time. Resolution
    /// order for the name: trimmed input, host identity hint, "Anonymous".
    /// Students keep their pre-filled name; the input cannot rename them.
    pub fn confirm_participant(&mut self, name: &str) {
        let hint = self.bridge.user_name_hint();
        let is_student = self
            .current_user
            .as_ref()
            .and_then(User::as_student)
            .is_some();
        let Some(session) = self.active_session.as_mut() else {
            return;
        };
        if session.phase() != SessionPhase::NotStarted {
            return;
        }
        if !is_student {
            let trimmed = name.trim();
            session.participant = if !trimmed.is_empty() {
                trimmed.to_string()
            } else {
                hint.unwrap_or_else(|| "Anonymous".to_string())
            };
        }
        session.started = true;
        session.start_time = Some(util::now_ms());
    }

    /// Scores the current question and always advances, finalizing after the
    /// last one. Outside `InProgress` this is a no-op.
    pub fn submit_answer(&mut self, answer_index: usize) {
        let finished = {
            let Some(session) = self.active_session.as_mut() else {
                return;
            };
            if session.phase() != SessionPhase::InProgress {
                return;
            }
            if let Some(question) = session.test.questions.get(session.index) {
                if answer_index == question.correct_index {
                    session.correct += 1;
                }
            }
            session.index += 1;
            session.index >= session.test.questions.len()
        };
        if finished {
            self.finalize_session();
        }
    }

    /// Stamps the duration, appends the stat record, copies a reduced result
    /// onto the signed-in student and evaluates achievement triggers. This is
    /// the only place a session ever touches durable state.
    fn finalize_session(&mut self) {
        let now = util::now_ms();
        let record = {
            let Some(session) = self.active_session.as_mut() else {
                return;
            };
            session.completed = true;
            session.duration_ms = now.saturating_sub(session.start_time.unwrap_or(now));
            let total = session.test.questions.len() as u32;
            StatRecord {
                id: util::uid(),
                test_id: session.test.id.clone(),
                test_title: session.test.title.clone(),
                author: session.test.nickname.clone(),
                participant: session.participant.clone(),
                correct: session.correct,
                total,
                percent: percent_of(session.correct, total),
                duration_ms: session.duration_ms,
                created_at: now,
            }
        };

        self.stats.insert(0, record.clone());
        self.save_stats();

        if let Some(student) = self.current_user.as_mut().and_then(User::as_student_mut) {
            student.results.push(StudentResult {
                test_id: record.test_id.clone(),
                test_title: record.test_title.clone(),
                score: record.correct,
                total: record.total,
                percent: record.percent,
                date: record.created_at,
            });
        }
        if let Some(user) = self.current_user.clone() {
            if user.as_student().is_some() {
                if let Some(slot) = self.users.iter_mut().find(|u| u.id() == user.id()) {
                    *slot = user;
                }
                self.save_users();
                self.save_auth();
            }
        }

        self.process_achievement_event(AchievementEvent::TestCompleted { record });
    }

    /// Discards the active session in any state; abandoned attempts leave no
    /// partial record behind.
    pub fn close_session(&mut self) {
        self.active_session = None;
    }

    pub fn session_phase(&self) -> Option<SessionPhase> {
        self.active_session.as_ref().map(Session::phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn published_test(app: &mut App, title: &str, questions: usize) -> Test {
        for i in 0..questions {
            app.add_question(&format!("Пытанне {i}"), "так", "не, магчыма")
                .expect("add question");
        }
        app.publish(title, "", "@autar").expect("publish")
    }

    fn wrong_index(question: &crate::model::Question) -> usize {
        (question.correct_index + 1) % question.answers.len()
    }

    #[test]
    fn percent_special_cases_zero_total() {
        assert_eq!(percent_of(0, 0), 0);
        assert_eq!(percent_of(2, 3), 67);
        assert_eq!(percent_of(1, 2), 50);
        assert_eq!(percent_of(3, 3), 100);
    }

    #[test]
    fn student_run_records_stats_and_results() {
        let mut app = App::in_memory();
        app.register_student("Анна", "Казлова", "11А").expect("register");
        let test = published_test(&mut app, "Фанетыка", 3);

        app.start_session(test);
        let session = app.active_session.as_ref().expect("session");
        assert_eq!(session.participant, "Анна Казлова");
        assert_eq!(session.phase(), SessionPhase::NotStarted);

        app.confirm_participant("");
        assert_eq!(app.session_phase(), Some(SessionPhase::InProgress));

        // Correct, wrong, correct.
        let answers: Vec<usize> = {
            let session = app.active_session.as_ref().expect("session");
            vec![
                session.test.questions[0].correct_index,
                wrong_index(&session.test.questions[1]),
                session.test.questions[2].correct_index,
            ]
        };
        for index in answers {
            app.submit_answer(index);
        }

        assert_eq!(app.session_phase(), Some(SessionPhase::Completed));
        assert_eq!(app.stats.len(), 1);
        let record = &app.stats[0];
        assert_eq!(record.correct, 2);
        assert_eq!(record.total, 3);
        assert_eq!(record.percent, 67);
        assert_eq!(record.participant, "Анна Казлова");

        let student = app
            .current_user
            .as_ref()
            .and_then(User::as_student)
            .expect("student");
        assert_eq!(student.results.len(), 1);
        assert_eq!(student.results[0].score, 2);
        // The users list carries the updated copy too.
        let stored = app.users[0].as_student().expect("student");
        assert_eq!(stored.results.len(), 1);
    }

    #[test]
    fn students_cannot_rename_themselves() {
        let mut app = App::in_memory();
        app.register_student("Анна", "Казлова", "11А").expect("register");
        let test = published_test(&mut app, "Тэст", 1);
        app.start_session(test);
        app.confirm_participant("@someone_else");
        let session = app.active_session.as_ref().expect("session");
        assert_eq!(session.participant, "Анна Казлова");
    }

    #[test]
    fn anonymous_fallback_applies_without_identity() {
        let mut app = App::in_memory();
        app.register_teacher("mentor", "pass").expect("register");
        let test = published_test(&mut app, "Тэст", 1);
        app.start_session(test);
        app.confirm_participant("   ");
        let session = app.active_session.as_ref().expect("session");
        assert_eq!(session.participant, "Anonymous");
    }

    #[test]
    fn answers_before_confirmation_are_ignored() {
        let mut app = App::in_memory();
        app.register_teacher("mentor", "pass").expect("register");
        let test = published_test(&mut app, "Тэст", 2);
        app.start_session(test);
        app.submit_answer(0);
        let session = app.active_session.as_ref().expect("session");
        assert_eq!(session.index, 0);
        assert_eq!(session.correct, 0);
        assert!(app.stats.is_empty());
    }

    #[test]
    fn closing_an_attempt_persists_nothing() {
        let mut app = App::in_memory();
        app.register_teacher("mentor", "pass").expect("register");
        let test = published_test(&mut app, "Тэст", 2);
        app.start_session(test);
        app.confirm_participant("Госць");
        app.submit_answer(0);
        app.close_session();
        assert!(app.active_session.is_none());
        assert!(app.stats.is_empty());
    }

    #[test]
    fn starting_a_new_session_replaces_the_old_one() {
        let mut app = App::in_memory();
        app.register_teacher("mentor", "pass").expect("register");
        let first = published_test(&mut app, "Першы", 1);
        let second = published_test(&mut app, "Другі", 1);
        app.start_session(first);
        app.confirm_participant("Госць");
        app.start_session(second.clone());
        let session = app.active_session.as_ref().expect("session");
        assert_eq!(session.test.id, second.id);
        assert_eq!(session.phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn completed_sessions_ignore_further_answers() {
        let mut app = App::in_memory();
        app.register_teacher("mentor", "pass").expect("register");
        let test = published_test(&mut app, "Тэст", 1);
        app.start_session(test);
        app.confirm_participant("Госць");
        app.submit_answer(0);
        assert_eq!(app.session_phase(), Some(SessionPhase::Completed));
        app.submit_answer(0);
        assert_eq!(app.stats.len(), 1);
    }
}
