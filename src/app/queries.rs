use super::*;
use crate::model::{Student, StudentResult, Teacher};

impl App {
    pub fn test(&self, test_id: &str) -> Option<&Test> {
        self.tests.iter().find(|t| t.id == test_id)
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.users.iter().filter_map(User::as_student)
    }

    pub fn teachers(&self) -> impl Iterator<Item = &Teacher> {
        self.users.iter().filter_map(|u| match u {
            User::Teacher(t) => Some(t),
            _ => None,
        })
    }

    pub fn find_user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id() == user_id)
    }

    /// Per-student history, for the admin results popup.
    pub fn student_results(&self, student_id: &str) -> Option<&[StudentResult]> {
        self.find_user(student_id)
            .and_then(User::as_student)
            .map(|s| s.results.as_slice())
    }
}
