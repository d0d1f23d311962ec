use crate::error::{AppError, AuthError, ValidationError};
use log::info;
use sha2::{Digest, Sha256};

pub const MIN_PASSWORD_LEN: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Admin];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Admin => "System admin",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Permissions {
    pub can_create_tests: bool,
    pub can_view_reports: bool,
    pub can_manage_users: bool,
}

impl Permissions {
    pub fn for_role(role: Role) -> Self {
        Self {
            can_create_tests: role != Role::Student,
            can_view_reports: role != Role::Student,
            can_manage_users: role == Role::Admin,
        }
    }
}

/// Salted SHA-256 of a password. The plaintext is never kept.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    salt: String,
    digest: String,
}

impl Credential {
    pub fn new(password: &str) -> Self {
        let salt = uuid::Uuid::new_v4().simple().to_string();
        let digest = hash(&salt, password);
        Self { salt, digest }
    }

    pub fn verify(&self, password: &str) -> bool {
        hash(&self.salt, password) == self.digest
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(..)")
    }
}

fn hash(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub credential: Credential,
    pub must_change_password: bool,
    pub permissions: Permissions,
}

/// The account list. Starts with a single `admin` / `123` account that has
/// to change its password on first login.
#[derive(Clone, Debug)]
pub struct AccountBook {
    accounts: Vec<Account>,
}

impl Default for AccountBook {
    fn default() -> Self {
        Self {
            accounts: vec![Account {
                id: "admin_1".to_owned(),
                name: "admin".to_owned(),
                role: Role::Admin,
                credential: Credential::new("123"),
                must_change_password: true,
                permissions: Permissions::for_role(Role::Admin),
            }],
        }
    }
}

impl AccountBook {
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn get(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn login(&self, name: &str, password: &str) -> Result<&Account, AuthError> {
        self.accounts
            .iter()
            .find(|a| a.name == name && a.credential.verify(password))
            .ok_or(AuthError::InvalidCredentials)
    }

    pub fn change_password(&mut self, id: &str, new_password: &str) -> Result<&Account, AppError> {
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            }
            .into());
        }
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AuthError::UnknownAccount(id.to_owned()))?;
        account.credential = Credential::new(new_password);
        account.must_change_password = false;
        info!("password changed for {}", account.name);
        Ok(account)
    }

    /// Admin-only. New accounts get role-based permissions and must change
    /// their password on first login.
    pub fn add_account(
        &mut self,
        actor_id: &str,
        name: &str,
        password: &str,
        role: Role,
    ) -> Result<&Account, AppError> {
        self.require_manager(actor_id)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("user name").into());
        }
        if password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }
        if self.accounts.iter().any(|a| a.name == name) {
            return Err(ValidationError::DuplicateAccount(name.to_owned()).into());
        }
        self.accounts.push(Account {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_owned(),
            role,
            credential: Credential::new(password),
            must_change_password: true,
            permissions: Permissions::for_role(role),
        });
        info!("{} added {} account {name}", actor_id, role.label());
        Ok(&self.accounts[self.accounts.len() - 1])
    }

    /// Admin-only. The actor's own account can never be deleted.
    pub fn delete_account(&mut self, actor_id: &str, target_id: &str) -> Result<Account, AuthError> {
        self.require_manager(actor_id)?;
        if actor_id == target_id {
            return Err(AuthError::CannotDeleteSelf);
        }
        let position = self
            .accounts
            .iter()
            .position(|a| a.id == target_id)
            .ok_or_else(|| AuthError::UnknownAccount(target_id.to_owned()))?;
        let removed = self.accounts.remove(position);
        info!("{actor_id} deleted account {}", removed.name);
        Ok(removed)
    }

    /// Accounts the actor may delete: everything but itself.
    pub fn deletable_by<'a>(&'a self, actor_id: &'a str) -> impl Iterator<Item = &'a Account> + 'a {
        self.accounts.iter().filter(move |a| a.id != actor_id)
    }

    fn require_manager(&self, actor_id: &str) -> Result<(), AuthError> {
        match self.get(actor_id) {
            Some(actor) if actor.permissions.can_manage_users => Ok(()),
            Some(_) => Err(AuthError::PermissionDenied),
            None => Err(AuthError::NotAuthenticated),
        }
    }
}
