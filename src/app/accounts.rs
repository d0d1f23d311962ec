use super::*;
use crate::error::{AppError, AuthError};

impl QuizApp {
    /// Checks the login form. A wrong pair only sets the inline message.
    pub fn login(&mut self) -> bool {
        let name = self.login_form.name.trim().to_owned();
        let (id, must_change_password) =
            match self.accounts.login(&name, &self.login_form.password) {
                Ok(account) => (account.id.clone(), account.must_change_password),
                Err(err) => {
                    info!("failed login for {name}");
                    self.message = err.to_string();
                    return false;
                }
            };
        info!("{name} logged in");
        self.current_user = Some(id);
        self.login_form = LoginForm::default();
        self.navigate(Action::LoginSucceeded {
            must_change_password,
        })
    }

    pub fn logout(&mut self) {
        self.navigate(Action::Logout);
        self.nav_epoch += 1;
        self.in_flight = None;
        self.current_user = None;
        self.selection = Selection::default();
        self.resource_kind = ResourceKind::Quiz;
        self.session = None;
        self.topics.clear();
        self.sources.clear();
        self.last_result = None;
        self.last_questions.clear();
        self.last_responses.clear();
        self.pending_delete = None;
        self.has_saved_progress = false;
    }

    /// Sets the new password typed on the password screen.
    pub fn change_password(&mut self) -> bool {
        let Some(id) = self.current_user.clone() else {
            self.message = AuthError::NotAuthenticated.to_string();
            return false;
        };
        let new_password = std::mem::take(&mut self.new_password);
        match self.accounts.change_password(&id, &new_password) {
            Ok(_) => {
                if self.step == Step::ChangePasswordRequired {
                    self.navigate(Action::PasswordChanged);
                } else {
                    self.message = "Password changed".to_owned();
                }
                true
            }
            Err(err) => {
                self.message = err.to_string();
                false
            }
        }
    }

    /// Creates the account described by the admin form.
    pub fn add_account(&mut self) -> Result<(), AppError> {
        let actor = self.current_user.clone().unwrap_or_default();
        let form = &self.new_account_form;
        let result = self
            .accounts
            .add_account(&actor, &form.name, &form.password, form.role)
            .map(|account| account.name.clone());
        match result {
            Ok(name) => {
                self.message = format!("Account {name} created");
                self.new_account_form = NewAccountForm::default();
                Ok(())
            }
            Err(err) => {
                self.message = err.to_string();
                Err(err)
            }
        }
    }

    /// First half of a deletion: remembers the target so the UI can ask for
    /// confirmation. The logged-in account is never a candidate.
    pub fn request_delete(&mut self, target_id: &str) {
        if self.current_user.as_deref() == Some(target_id) {
            self.message = AuthError::CannotDeleteSelf.to_string();
            return;
        }
        self.pending_delete = Some(target_id.to_owned());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Result<(), AuthError> {
        let Some(target) = self.pending_delete.take() else {
            return Ok(());
        };
        self.delete_account(&target)
    }

    pub fn delete_account(&mut self, target_id: &str) -> Result<(), AuthError> {
        let actor = self.current_user.clone().ok_or(AuthError::NotAuthenticated)?;
        match self.accounts.delete_account(&actor, target_id) {
            Ok(removed) => {
                self.message = format!("Account {} deleted", removed.name);
                Ok(())
            }
            Err(err) => {
                self.message = err.to_string();
                Err(err)
            }
        }
    }

    /// Accounts listed with a delete button on the admin dashboard.
    pub fn deletable_accounts(&self) -> Vec<&Account> {
        match self.current_user.as_deref() {
            Some(actor) => self.accounts.deletable_by(actor).collect(),
            None => Vec::new(),
        }
    }

    pub fn set_min_passing_score(&mut self, percent: u8) {
        if self.current_role() == Some(Role::Admin) {
            self.config.min_passing_score = percent.min(100);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{NullGateway, app_with};

    fn logged_in_admin() -> QuizApp {
        let mut app = app_with(NullGateway);
        app.login_form.name = "admin".into();
        app.login_form.password = "123".into();
        assert!(app.login());
        app.new_password = "secret".into();
        assert!(app.change_password());
        app
    }

    #[test]
    fn wrong_password_stays_on_login_with_message() {
        let mut app = app_with(NullGateway);
        app.login_form.name = "admin".into();
        app.login_form.password = "nope".into();
        assert!(!app.login());
        assert_eq!(app.step, Step::Login);
        assert_eq!(app.message, AuthError::InvalidCredentials.to_string());
        assert!(app.current_account().is_none());
    }

    #[test]
    fn seed_admin_is_forced_to_change_password() {
        let mut app = app_with(NullGateway);
        app.login_form.name = "admin".into();
        app.login_form.password = "123".into();
        assert!(app.login());
        assert_eq!(app.step, Step::ChangePasswordRequired);
        app.go_home();
        assert_eq!(app.step, Step::ChangePasswordRequired);

        app.new_password = "ab".into();
        assert!(!app.change_password());
        assert_eq!(app.step, Step::ChangePasswordRequired);

        app.new_password = "abc".into();
        assert!(app.change_password());
        assert_eq!(app.step, Step::AdminDashboard);
    }

    #[test]
    fn admin_creates_and_deletes_accounts() {
        let mut app = logged_in_admin();
        app.new_account_form.name = "Mona".into();
        app.new_account_form.password = "pw1".into();
        app.new_account_form.role = Role::Teacher;
        app.add_account().unwrap();
        assert_eq!(app.accounts.accounts().len(), 2);

        let self_id = app.current_account().unwrap().id.clone();
        assert!(app.deletable_accounts().iter().all(|a| a.id != self_id));
        app.request_delete(&self_id);
        assert_eq!(app.pending_delete, None);

        let mona = app.deletable_accounts()[0].id.clone();
        app.request_delete(&mona);
        app.confirm_delete().unwrap();
        assert_eq!(app.accounts.accounts().len(), 1);
        assert_eq!(app.delete_account(&self_id), Err(AuthError::CannotDeleteSelf));
    }

    #[test]
    fn logout_forgets_the_user() {
        let mut app = logged_in_admin();
        app.selection.grade = "Grade 9 (intermediate)".into();
        app.selection.topic = "Fractions".into();
        app.resource_kind = ResourceKind::Worksheet;
        app.logout();
        assert_eq!(app.step, Step::Login);
        assert!(app.current_account().is_none());
        assert_eq!(app.selection, Selection::default());
        assert_eq!(app.resource_kind, ResourceKind::Quiz);
    }
}
