use super::*;
use crate::error::{AppError, AppResult};
use crate::model::Question;
use crate::util;
use rand::seq::SliceRandom;

impl App {
    /// Builds a question out of the raw form fields: one correct answer plus
    /// a comma-separated list of wrong ones. The option list is shuffled and
    /// `correct_index` records where the correct answer landed. Duplicate
    /// answer values would make that index ambiguous, so they are rejected.
    pub fn add_question(
        &mut self,
        text: &str,
        correct_answer: &str,
        wrong_answers_csv: &str,
    ) -> AppResult<()> {
        let text = text.trim();
        let correct = correct_answer.trim();
        let wrong: Vec<String> = wrong_answers_csv
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if text.is_empty() || correct.is_empty() || wrong.is_empty() {
            return Err(AppError::validation(
                "a question needs text, a correct answer and at least one wrong answer",
            ));
        }
        let mut seen = HashSet::new();
        for answer in std::iter::once(correct).chain(wrong.iter().map(String::as_str)) {
            if !seen.insert(answer) {
                return Err(AppError::validation("answer options must be distinct"));
            }
        }

        let mut answers = Vec::with_capacity(wrong.len() + 1);
        answers.push(correct.to_string());
        answers.extend(wrong);
        answers.shuffle(&mut rand::thread_rng());
        let correct_index = answers.iter().position(|a| a == correct).unwrap_or(0);

        self.draft.questions.push(Question {
            id: util::uid(),
            text: text.to_string(),
            answers,
            correct_index,
        });
        self.draft.updated = Some(util::now_ms());
        self.metrics.draft_questions_added += 1;
        self.save_metrics();
        self.process_achievement_event(AchievementEvent::QuestionDrafted);
        Ok(())
    }

    /// Removes a drafted question by id; absent ids are a no-op.
    pub fn remove_question(&mut self, question_id: &str) {
        let before = self.draft.questions.len();
        self.draft.questions.retain(|q| q.id != question_id);
        if self.draft.questions.len() != before {
            self.draft.updated = Some(util::now_ms());
        }
    }

    pub fn can_publish(&self, title: &str, nickname: &str) -> bool {
        !self.draft.questions.is_empty()
            && !nickname.trim().is_empty()
            && !title.trim().is_empty()
    }

    /// Snapshots the draft into a new test at the head of the test list and
    /// clears the draft. Nothing changes when the draft is not publishable.
    pub fn publish(&mut self, title: &str, description: &str, nickname: &str) -> AppResult<Test> {
        if !self.can_publish(title, nickname) {
            return Err(AppError::validation(
                "add a question and fill in the test details first",
            ));
        }

        let test = Test {
            id: util::uid(),
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            nickname: nickname.trim().to_string(),
            created_at: util::now_ms(),
            questions: self.draft.questions.clone(),
        };
        self.tests.insert(0, test.clone());
        self.save_tests();
        self.process_achievement_event(AchievementEvent::TestPublished {
            question_count: test.questions.len(),
        });

        self.draft = Draft::default();
        Ok(test)
    }
}
