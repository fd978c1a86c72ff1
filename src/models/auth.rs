//! Identity of the doctor making a request.
//!
//! Sign-in happens in an external auth service. It stores a signed JWT as the
//! `actix-identity` id; this module only decodes it.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::types::{DoctorId, TypeConstraintError};
use crate::models::config::ServerConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    /// Doctor identifier.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Tenant identity used to scope every query made on behalf of this user.
    pub fn doctor_id(&self) -> Result<DoctorId, TypeConstraintError> {
        self.sub.parse()
    }

    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let key = DecodingKey::from_secret(secret.as_bytes());
        decode::<Self>(token, &key, &Validation::default()).map(|data| data.claims)
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::error!("Server config is not registered");
            return ready(Err(ErrorUnauthorized("Unauthorized")));
        };

        let Some(token) = req
            .get_identity()
            .ok()
            .and_then(|identity| identity.id().ok())
        else {
            return ready(Err(ErrorUnauthorized("Unauthorized")));
        };

        let user = AuthenticatedUser::from_jwt(&token, &config.secret).map_err(|err| {
            log::warn!("Rejected identity token: {err}");
            ErrorUnauthorized("Unauthorized")
        });

        ready(user)
    }
}
