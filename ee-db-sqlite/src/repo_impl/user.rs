use super::*;

impl<'a> UserRepo for DbReadOnly<'a> {
    fn create_user(&self, _user: &User) -> Result<()> {
        unreachable!();
    }
    fn update_user(&self, _user: &User) -> Result<()> {
        unreachable!();
    }

    fn get_user(&self, id: &Id) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        try_get_user_by_username(&mut self.conn.borrow_mut(), username)
    }
    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }

    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }
}

impl<'a> UserRepo for DbReadWrite<'a> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }

    fn get_user(&self, id: &Id) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        try_get_user_by_username(&mut self.conn.borrow_mut(), username)
    }
    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }

    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }
}

impl<'a> UserRepo for DbConnection<'a> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }

    fn get_user(&self, id: &Id) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        try_get_user_by_username(&mut self.conn.borrow_mut(), username)
    }
    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }

    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }
}

fn into_new_user(u: &User) -> models::NewUser {
    models::NewUser {
        id: u.id.as_str(),
        username: &u.username,
        email: u.email.as_str(),
        password: u.password.as_ref(),
        role: RolePrimitive::from(u.role),
        failed_login_attempts: u.failed_login_attempts as i16,
        locked_until: u.locked_until.map(Timestamp::as_secs),
        last_login_at: u.last_login_at.map(Timestamp::as_secs),
        created_at: u.created_at.as_secs(),
    }
}

fn create_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    let new_user = into_new_user(u);
    diesel::insert_into(schema::users::table)
        .values(&new_user)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    use schema::users::dsl;
    let new_user = into_new_user(u);
    let count = diesel::update(dsl::users.filter(dsl::id.eq(u.id.as_str())))
        .set(&new_user)
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_user(conn: &mut SqliteConnection, id: &Id) -> Result<User> {
    use schema::users::dsl;
    let entity = dsl::users
        .filter(dsl::id.eq(id.as_str()))
        .first::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?;
    user_from_entity(entity)
}

fn try_get_user_by_username(conn: &mut SqliteConnection, username: &str) -> Result<Option<User>> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::username.eq(username))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(user_from_entity)
        .transpose()
}

fn try_get_user_by_email(conn: &mut SqliteConnection, email: &EmailAddress) -> Result<Option<User>> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::email.eq(email.as_str()))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(user_from_entity)
        .transpose()
}

fn count_users(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::users::dsl;
    Ok(dsl::users
        .select(diesel::dsl::count(dsl::id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}
