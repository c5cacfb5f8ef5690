use actix_web::{FromRequest, HttpRequest, HttpMessage};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::{entities::token::Claims, errors::AuthError};

/// Extractor for the verified caller, ensuring the request is authenticated.
/// Returns 401 if no token was sent or the sent one was rejected.
/// Usage: add `user: AuthUser` as a parameter to your handler function.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

impl AuthUser {
    pub fn id(&self) -> &Uuid {
        &self.0
    }
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let extensions = req.extensions();
        let result = match (extensions.get::<Claims>(), extensions.get::<AuthError>()) {
            (Some(claims), _) => Uuid::parse_str(&claims.sub)
                .map(AuthUser)
                .map_err(|_| AuthError::InvalidToken.into()),
            (None, Some(rejection)) => Err((*rejection).into()),
            (None, None) => Err(AuthError::MissingCredentials.into()),
        };
        ready(result)
    }
}
