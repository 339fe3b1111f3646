use diesel::dsl::exists;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{NewUser, User, UserChanges};
use crate::schema::users;

use super::models::{NewUserRow, UserChangeset, UserRow};

#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for DieselUserRepository {
    fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(User::from))
    }

    fn username_taken(&self, username: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(
            diesel::select(exists(users::table.filter(users::username.eq(username))))
                .get_result(&mut conn)?,
        )
    }

    fn email_taken(&self, email: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(
            diesel::select(exists(users::table.filter(users::email.eq(email))))
                .get_result(&mut conn)?,
        )
    }

    fn list(&self) -> Result<Vec<User>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = users::table
            .order(users::username)
            .select(UserRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::update(users::table.find(id))
            .set(UserChangeset::from(changes))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        Ok(row.map(User::from))
    }
}
