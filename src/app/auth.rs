use super::*;
use crate::error::{AppError, AppResult};
use crate::model::{AdminUser, Student, Teacher};
use crate::util;

/// Shared admin secret. It ships inside the client, so it gates convenience,
/// not security.
pub const ADMIN_KEY: &str = "belarus_admin_2024";

impl App {
    /// Creates a student account and signs it in. Students carry no
    /// credentials; they only ever resume through the persisted auth record.
    pub fn register_student(
        &mut self,
        first_name: &str,
        last_name: &str,
        group: &str,
    ) -> AppResult<()> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        let group = group.trim();
        if first_name.is_empty() || last_name.is_empty() || group.is_empty() {
            return Err(AppError::validation("all fields are required"));
        }

        let user = User::Student(Student {
            id: util::uid(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            group: group.to_string(),
            created_at: util::now_ms(),
            results: Vec::new(),
        });
        self.users.push(user.clone());
        self.save_users();
        self.set_current_user(user);
        Ok(())
    }

    /// Creates a teacher account and signs it in. Usernames are unique with
    /// a case-sensitive exact match.
    pub fn register_teacher(&mut self, username: &str, password: &str) -> AppResult<()> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::validation("all fields are required"));
        }
        let taken = self
            .users
            .iter()
            .any(|u| matches!(u, User::Teacher(t) if t.username == username));
        if taken {
            return Err(AppError::DuplicateUsername);
        }

        let user = User::Teacher(Teacher {
            id: util::uid(),
            username: username.to_string(),
            password: password.to_string(),
            created_at: util::now_ms(),
        });
        self.users.push(user.clone());
        self.save_users();
        self.set_current_user(user);
        Ok(())
    }

    /// Exact `(username, password)` match over teacher accounts. A missing
    /// account and a wrong password produce the same error.
    pub fn login(&mut self, username: &str, password: &str) -> AppResult<()> {
        let username = username.trim();
        let password = password.trim();
        let found = self
            .users
            .iter()
            .find(|u| {
                matches!(u, User::Teacher(t) if t.username == username && t.password == password)
            })
            .cloned();
        match found {
            Some(user) => {
                self.set_current_user(user);
                Ok(())
            }
            None => Err(AppError::Authentication),
        }
    }

    pub fn login_as_admin(&mut self, secret_key: &str) -> AppResult<()> {
        if secret_key != ADMIN_KEY {
            return Err(AppError::Authentication);
        }
        self.set_current_user(User::Admin(AdminUser::default()));
        Ok(())
    }

    /// Restores the persisted identity without re-validating credentials.
    pub fn resume_session(&mut self) {
        if let Some(user) = self.storage.load_or::<Option<User>>(keys::AUTH, None) {
            self.current_user = Some(user);
        }
    }

    pub fn logout(&mut self) {
        self.current_user = None;
        self.save_auth();
    }

    /// Admin-only. Deleting the signed-in account forces a logout.
    pub fn delete_user(&mut self, user_id: &str) -> AppResult<()> {
        if !self.current_user.as_ref().is_some_and(User::is_admin) {
            return Err(AppError::Authentication);
        }
        self.users.retain(|u| u.id() != user_id);
        if self.current_user.as_ref().is_some_and(|u| u.id() == user_id) {
            self.logout();
        }
        self.save_users();
        Ok(())
    }

    fn set_current_user(&mut self, user: User) {
        self.current_user = Some(user);
        self.save_auth();
    }
}
