use super::*;

impl<'a> UserTokenRepo for DbReadOnly<'a> {
    fn replace_user_token(&self, _token: UserToken) -> Result<EmailNonce> {
        unreachable!();
    }
    fn consume_user_token(&self, _email_nonce: &EmailNonce) -> Result<UserToken> {
        unreachable!();
    }
    fn delete_expired_user_tokens(&self, _expired_before: Timestamp) -> Result<usize> {
        unreachable!();
    }
}

impl<'a> UserTokenRepo for DbReadWrite<'a> {
    fn replace_user_token(&self, token: UserToken) -> Result<EmailNonce> {
        replace_user_token(&mut self.conn.borrow_mut(), token)
    }
    fn consume_user_token(&self, email_nonce: &EmailNonce) -> Result<UserToken> {
        consume_user_token(&mut self.conn.borrow_mut(), email_nonce)
    }
    fn delete_expired_user_tokens(&self, expired_before: Timestamp) -> Result<usize> {
        delete_expired_user_tokens(&mut self.conn.borrow_mut(), expired_before)
    }
}

impl<'a> UserTokenRepo for DbConnection<'a> {
    fn replace_user_token(&self, token: UserToken) -> Result<EmailNonce> {
        replace_user_token(&mut self.conn.borrow_mut(), token)
    }
    fn consume_user_token(&self, email_nonce: &EmailNonce) -> Result<UserToken> {
        consume_user_token(&mut self.conn.borrow_mut(), email_nonce)
    }
    fn delete_expired_user_tokens(&self, expired_before: Timestamp) -> Result<usize> {
        delete_expired_user_tokens(&mut self.conn.borrow_mut(), expired_before)
    }
}

fn replace_user_token(conn: &mut SqliteConnection, token: UserToken) -> Result<EmailNonce> {
    let nonce = token.email_nonce.nonce.to_string();
    let new_token = models::NewUserToken {
        email: token.email_nonce.email.as_str(),
        nonce: &nonce,
        expires_at: token.expires_at.as_secs(),
    };
    diesel::replace_into(schema::user_tokens::table)
        .values(&new_token)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(token.email_nonce)
}

fn consume_user_token(conn: &mut SqliteConnection, email_nonce: &EmailNonce) -> Result<UserToken> {
    use schema::user_tokens::dsl;
    let entity = dsl::user_tokens
        .filter(dsl::email.eq(email_nonce.email.as_str()))
        .filter(dsl::nonce.eq(email_nonce.nonce.to_string()))
        .first::<models::UserTokenEntity>(conn)
        .map_err(from_diesel_err)?;
    diesel::delete(
        dsl::user_tokens
            .filter(dsl::email.eq(email_nonce.email.as_str()))
            .filter(dsl::nonce.eq(email_nonce.nonce.to_string())),
    )
    .execute(conn)
    .map_err(from_diesel_err)?;
    let nonce = entity
        .nonce
        .parse()
        .map_err(|_| repo::Error::Other(anyhow!("Malformed nonce in database")))?;
    Ok(UserToken {
        email_nonce: EmailNonce {
            email: EmailAddress::new_unchecked(entity.email),
            nonce,
        },
        expires_at: Timestamp::from_secs(entity.expires_at),
    })
}

fn delete_expired_user_tokens(
    conn: &mut SqliteConnection,
    expired_before: Timestamp,
) -> Result<usize> {
    use schema::user_tokens::dsl;
    diesel::delete(dsl::user_tokens.filter(dsl::expires_at.lt(expired_before.as_secs())))
        .execute(conn)
        .map_err(from_diesel_err)
}
