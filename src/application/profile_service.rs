use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{Identity, NewUser, User, UserChanges};

#[derive(Debug, Clone)]
pub struct ProfileInput {
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub contact_number: String,
    pub permanent_address: String,
    pub country: String,
    pub city: String,
    pub contact_number_2: Option<String>,
}

pub struct ProfileService<U> {
    users: U,
}

impl<U: UserRepository> ProfileService<U> {
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Create the profile of the authenticated user. The profile id is the
    /// identity's subject.
    pub fn create_profile(
        &self,
        identity: &Identity,
        input: ProfileInput,
    ) -> Result<User, DomainError> {
        if let Some(token_email) = identity.email.as_deref() {
            if !token_email.eq_ignore_ascii_case(&input.email) {
                return Err(DomainError::Unauthorized(
                    "Token/email mismatch".to_string(),
                ));
            }
        }
        if self.users.username_taken(&input.username)? {
            return Err(DomainError::Conflict("Username already registered".to_string()));
        }
        if self.users.email_taken(&input.email)? {
            return Err(DomainError::Conflict("Email already registered".to_string()));
        }

        let user = self.users.create(NewUser {
            id: identity.user_id.clone(),
            username: input.username,
            email: input.email,
            name: input.name,
            contact_number: input.contact_number,
            permanent_address: input.permanent_address,
            country: input.country,
            city: input.city,
            contact_number_2: input.contact_number_2,
        })?;
        log::info!("profile {} created for {}", user.id, user.username);
        Ok(user)
    }

    pub fn get_user(&self, id: &str) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    pub fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.users.list()
    }

    pub fn update_user(&self, id: &str, changes: UserChanges) -> Result<User, DomainError> {
        if changes.is_empty() {
            return self.get_user(id);
        }
        self.users
            .update(id, changes)?
            .ok_or_else(|| DomainError::not_found("User"))
    }
}
