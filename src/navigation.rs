use crate::accounts::{Account, Role};
use crate::model::Step;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    LoginSucceeded { must_change_password: bool },
    PasswordChanged,
    TopicsFound,
    QuizReady,
    ResumeQuiz,
    SubmitQuiz,
    OpenReports,
    OpenNotifications,
    GoHome,
    Logout,
}

/// Landing screen for a role.
pub fn home(role: Role) -> Step {
    match role {
        Role::Admin => Step::AdminDashboard,
        Role::Teacher => Step::TeacherDashboard,
        Role::Student => Step::Selection,
    }
}

/// The transition table. `None` means the action is not allowed from `from`
/// for this viewer. Without a viewer only the login screen is reachable.
pub fn transition(from: Step, action: Action, viewer: Option<&Account>) -> Option<Step> {
    use Action::*;
    use Step::*;

    let Some(viewer) = viewer else {
        return match action {
            Logout => Some(Login),
            _ => None,
        };
    };

    match (from, action) {
        (_, Logout) => Some(Login),

        (Login, LoginSucceeded { must_change_password: true }) => Some(ChangePasswordRequired),
        (Login, LoginSucceeded { must_change_password: false }) => Some(home(viewer.role)),
        (ChangePasswordRequired, PasswordChanged) => Some(home(viewer.role)),
        // Nothing else leaves the forced password change.
        (ChangePasswordRequired, _) | (Login, _) => None,

        (Selection, TopicsFound) => Some(Topics),
        (TeacherDashboard, TopicsFound) if viewer.permissions.can_create_tests => Some(Topics),
        (Topics, QuizReady) => Some(Quiz),
        (Selection, ResumeQuiz) => Some(Quiz),
        (Quiz, SubmitQuiz) => Some(Results),

        (_, OpenReports) if viewer.permissions.can_view_reports => Some(Reports),
        (_, OpenNotifications) => Some(Notifications),
        (_, GoHome) => Some(home(viewer.role)),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{AccountBook, Credential, Permissions};

    fn account(role: Role) -> Account {
        Account {
            id: format!("{role:?}"),
            name: format!("{role:?}"),
            role,
            credential: Credential::new("pw"),
            must_change_password: false,
            permissions: Permissions::for_role(role),
        }
    }

    #[test]
    fn unauthenticated_viewer_only_reaches_login() {
        for action in [Action::GoHome, Action::OpenReports, Action::TopicsFound] {
            assert_eq!(transition(Step::Selection, action, None), None);
        }
        assert_eq!(transition(Step::Quiz, Action::Logout, None), Some(Step::Login));
    }

    #[test]
    fn seed_admin_login_forces_password_change() {
        let book = AccountBook::default();
        let admin = book.login("admin", "123").unwrap();
        let step = transition(
            Step::Login,
            Action::LoginSucceeded {
                must_change_password: admin.must_change_password,
            },
            Some(admin),
        );
        assert_eq!(step, Some(Step::ChangePasswordRequired));
        assert_eq!(transition(Step::ChangePasswordRequired, Action::GoHome, Some(admin)), None);
        assert_eq!(
            transition(Step::ChangePasswordRequired, Action::PasswordChanged, Some(admin)),
            Some(Step::AdminDashboard)
        );
    }

    #[test]
    fn login_routes_by_role() {
        let ok = Action::LoginSucceeded {
            must_change_password: false,
        };
        assert_eq!(transition(Step::Login, ok, Some(&account(Role::Student))), Some(Step::Selection));
        assert_eq!(
            transition(Step::Login, ok, Some(&account(Role::Teacher))),
            Some(Step::TeacherDashboard)
        );
        assert_eq!(
            transition(Step::Login, ok, Some(&account(Role::Admin))),
            Some(Step::AdminDashboard)
        );
    }

    #[test]
    fn quiz_flow_for_a_student() {
        let student = account(Role::Student);
        let viewer = Some(&student);
        let topics = transition(Step::Selection, Action::TopicsFound, viewer).unwrap();
        let quiz = transition(topics, Action::QuizReady, viewer).unwrap();
        assert_eq!(quiz, Step::Quiz);
        assert_eq!(transition(quiz, Action::SubmitQuiz, viewer), Some(Step::Results));
        assert_eq!(transition(Step::Results, Action::SubmitQuiz, viewer), None);
        assert_eq!(transition(Step::Results, Action::GoHome, viewer), Some(Step::Selection));
    }

    #[test]
    fn reports_need_permission() {
        let student = account(Role::Student);
        let teacher = account(Role::Teacher);
        assert_eq!(transition(Step::Selection, Action::OpenReports, Some(&student)), None);
        assert_eq!(
            transition(Step::TeacherDashboard, Action::OpenReports, Some(&teacher)),
            Some(Step::Reports)
        );
    }

    #[test]
    fn student_cannot_search_from_teacher_dashboard() {
        let student = account(Role::Student);
        assert_eq!(
            transition(Step::TeacherDashboard, Action::TopicsFound, Some(&student)),
            None
        );
    }

    #[test]
    fn home_and_logout_are_always_reachable_after_login() {
        let teacher = account(Role::Teacher);
        for from in [
            Step::Selection,
            Step::Topics,
            Step::Quiz,
            Step::Results,
            Step::Reports,
            Step::Notifications,
            Step::TeacherDashboard,
        ] {
            assert_eq!(
                transition(from, Action::GoHome, Some(&teacher)),
                Some(Step::TeacherDashboard)
            );
            assert_eq!(transition(from, Action::Logout, Some(&teacher)), Some(Step::Login));
        }
    }
}
