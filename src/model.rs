use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// UI theme. Persisted as the literal strings `light` / `dark`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than the literal `dark` means light.
    pub fn from_raw(raw: &str) -> Self {
        if raw == "dark" { Theme::Dark } else { Theme::Light }
    }
}

/// A named grouping of rules. Built-in sections are immutable seed data;
/// user-created ones are persisted with `is_custom = true`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleSection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub rules: Vec<RuleItem>,
    #[serde(default)]
    pub is_custom: bool,
}

/// A short pedagogical note. Built-in items live inside their section;
/// user-authored items sit in a flat list keyed by `category`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleItem {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub created_at: u64,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub category: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    /// Shuffled answer options, always at least two.
    pub answers: Vec<String>,
    /// Index of the correct option inside `answers`.
    pub correct_index: usize,
}

/// In-progress authoring buffer. Never persisted; cleared on publish.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub questions: Vec<Question>,
    pub updated: Option<u64>,
}

/// A published test. Its questions are a snapshot of the draft at publish
/// time and never change afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub nickname: String,
    #[serde(default)]
    pub created_at: u64,
    pub questions: Vec<Question>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    InProgress,
    Completed,
}

/// One attempt at a test. Never persisted while in progress; a completed
/// session leaves a `StatRecord` behind and nothing else.
#[derive(Debug, Clone)]
pub struct Session {
    pub test: Test,
    pub index: usize,
    pub correct: u32,
    pub participant: String,
    pub started: bool,
    pub start_time: Option<u64>,
    pub completed: bool,
    pub duration_ms: u64,
}

impl Session {
    pub fn phase(&self) -> SessionPhase {
        if self.completed {
            SessionPhase::Completed
        } else if self.started {
            SessionPhase::InProgress
        } else {
            SessionPhase::NotStarted
        }
    }

    pub fn total(&self) -> usize {
        self.test.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.test.questions.get(self.index)
    }
}

/// Historical record of one completed session, most recent first in the
/// stats list. Immutable once created.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatRecord {
    pub id: String,
    pub test_id: String,
    pub test_title: String,
    pub author: String,
    pub participant: String,
    pub correct: u32,
    pub total: u32,
    pub percent: u32,
    pub duration_ms: u64,
    pub created_at: u64,
}

/// Reduced per-student copy of a stat record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentResult {
    pub test_id: String,
    pub test_title: String,
    pub score: u32,
    pub total: u32,
    pub percent: u32,
    pub date: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub group: String,
    #[serde(default)]
    pub created_at: u64,
    #[serde(default)]
    pub results: Vec<StudentResult>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Mean percent over all results, rounded; 0 with no results.
    pub fn average_percent(&self) -> u32 {
        if self.results.is_empty() {
            return 0;
        }
        let sum: u32 = self.results.iter().map(|r| r.percent).sum();
        (sum as f64 / self.results.len() as f64).round() as u32
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub username: String,
    /// Stored in plaintext; the admin panel displays it as-is.
    pub password: String,
    #[serde(default)]
    pub created_at: u64,
}

/// Transient identity unlocked by the shared secret; never added to the
/// users list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AdminUser {
    #[serde(default = "admin_id")]
    pub id: String,
}

fn admin_id() -> String {
    "admin".to_string()
}

impl Default for AdminUser {
    fn default() -> Self {
        Self { id: admin_id() }
    }
}

/// Role-tagged account. The persisted JSON carries a `role` discriminator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum User {
    Student(Student),
    Teacher(Teacher),
    Admin(AdminUser),
}

impl User {
    pub fn id(&self) -> &str {
        match self {
            User::Student(s) => &s.id,
            User::Teacher(t) => &t.id,
            User::Admin(a) => &a.id,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            User::Student(s) => s.full_name(),
            User::Teacher(t) => t.username.clone(),
            User::Admin(_) => "admin".to_string(),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, User::Admin(_))
    }

    pub fn as_student(&self) -> Option<&Student> {
        match self {
            User::Student(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_student_mut(&mut self) -> Option<&mut Student> {
        match self {
            User::Student(s) => Some(s),
            _ => None,
        }
    }
}

/// Counters feeding the achievement engine.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Metrics {
    pub visited_sections: HashSet<String>,
    pub draft_questions_added: u32,
    pub dark_mode_used: bool,
}

/// Catalog entry for a badge; the unlocked set stores only ids.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_json_carries_role_tag() {
        let user = User::Teacher(Teacher {
            id: "t1".into(),
            username: "nastaunik".into(),
            password: "secret".into(),
            created_at: 1,
        });
        let raw = serde_json::to_string(&user).expect("serialize");
        assert!(raw.contains("\"role\":\"teacher\""));
        assert!(raw.contains("\"createdAt\":1"));
        let back: User = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(back, user);
    }

    #[test]
    fn student_fields_survive_missing_results() {
        let raw = r#"{"role":"student","id":"s1","firstName":"Анна",
                      "lastName":"Казлова","group":"11А","createdAt":5}"#;
        let user: User = serde_json::from_str(raw).expect("deserialize");
        let student = user.as_student().expect("student");
        assert!(student.results.is_empty());
        assert_eq!(student.full_name(), "Анна Казлова");
    }

    #[test]
    fn average_percent_rounds() {
        let mut student = Student {
            id: "s".into(),
            first_name: "a".into(),
            last_name: "b".into(),
            group: "g".into(),
            created_at: 0,
            results: Vec::new(),
        };
        assert_eq!(student.average_percent(), 0);
        for percent in [100, 67, 50] {
            student.results.push(StudentResult {
                test_id: "t".into(),
                test_title: "t".into(),
                score: 0,
                total: 3,
                percent,
                date: 0,
            });
        }
        assert_eq!(student.average_percent(), 72);
    }

    #[test]
    fn session_phase_follows_flags() {
        let mut session = Session {
            test: Test {
                id: "t".into(),
                title: "t".into(),
                description: String::new(),
                nickname: "n".into(),
                created_at: 0,
                questions: Vec::new(),
            },
            index: 0,
            correct: 0,
            participant: String::new(),
            started: false,
            start_time: None,
            completed: false,
            duration_ms: 0,
        };
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        session.started = true;
        assert_eq!(session.phase(), SessionPhase::InProgress);
        session.completed = true;
        assert_eq!(session.phase(), SessionPhase::Completed);
    }
}
