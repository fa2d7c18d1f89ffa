use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use domain_rental::{
    exception::RentalException,
    model::vo::{Caller, Role},
};
use futures::future::LocalBoxFuture;
use jsonwebtoken::{decode as jwt_decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::ApiError;
use crate::infrastructure::config::JwtValidationConfig;

/// 令牌载荷
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Claims {
    pub sub: Uuid,
    pub user_type: Role,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Identity attached to a request once its bearer token validates.
#[derive(Clone, Copy, Debug)]
pub struct UserInfo {
    pub id: Uuid,
    pub user_type: Role,
}

impl UserInfo {
    pub fn caller(&self) -> Caller {
        Caller::new(self.id, self.user_type)
    }
}

impl FromRequest for UserInfo {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserInfo>()
                .copied()
                .ok_or_else(|| ApiError::from(RentalException::Unauthenticated)),
        )
    }
}

pub struct AddUserInfo {
    config: Rc<JwtValidationConfig>,
}

impl AddUserInfo {
    pub fn new(config: JwtValidationConfig) -> Self {
        Self {
            config: Rc::new(config),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AddUserInfo
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = UserInfoMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(UserInfoMiddleware {
            service: Rc::new(service),
            config: self.config.clone(),
        }))
    }
}

pub struct UserInfoMiddleware<S> {
    service: Rc<S>,
    config: Rc<JwtValidationConfig>,
}

impl<S, B> Service<ServiceRequest> for UserInfoMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let config = self.config.clone();
        Box::pin(async move {
            let user_info = match req.headers().get("Authorization") {
                Some(head) => match head.to_str().map_err(anyhow::Error::from).and_then(|value| {
                    parse_jwt_token_payload(value, &config)
                }) {
                    Ok(claims) => Some(UserInfo {
                        id: claims.sub,
                        user_type: claims.user_type,
                    }),
                    Err(e) => {
                        tracing::debug!("{}", e);
                        None
                    }
                },
                None => {
                    tracing::debug!("No Token.");
                    None
                }
            };
            if let Some(user_info) = user_info {
                req.extensions_mut().insert(user_info);
            }
            service.call(req).await
        })
    }
}

fn parse_jwt_token_payload(
    authorization_str: &str,
    config: &JwtValidationConfig,
) -> anyhow::Result<Claims> {
    let token = match authorization_str.split_whitespace().collect::<Vec<&str>>()[..] {
        ["Bearer", token] => token,
        _ => anyhow::bail!("Not Bearer Token."),
    };
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = *config.leeway();
    validation.validate_exp = *config.validate_exp();
    match config.aud() {
        Some(aud) => validation.aud = Some(aud.clone()),
        None => validation.validate_aud = false,
    }
    validation.iss = config.iss().clone();
    let token = jwt_decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret().as_bytes()),
        &validation,
    )?;
    Ok(token.claims)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    fn token(secret: &str, exp: u64) -> String {
        let claims = Claims {
            sub: Uuid::new_v4(),
            user_type: Role::Landlord,
            exp,
            aud: None,
            iss: None,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn far_future() -> u64 {
        chrono::Utc::now().timestamp() as u64 + 3600
    }

    #[test]
    fn accepts_bearer_token_signed_with_secret() {
        let config = JwtValidationConfig::with_secret("s3cret");
        let header = format!("Bearer {}", token("s3cret", far_future()));
        let claims = parse_jwt_token_payload(&header, &config).unwrap();
        assert_eq!(claims.user_type, Role::Landlord);
    }

    #[test]
    fn rejects_foreign_signature_and_expired_tokens() {
        let config = JwtValidationConfig::with_secret("s3cret");
        let forged = format!("Bearer {}", token("other", far_future()));
        assert!(parse_jwt_token_payload(&forged, &config).is_err());
        let expired = format!("Bearer {}", token("s3cret", 1_000));
        assert!(parse_jwt_token_payload(&expired, &config).is_err());
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        let config = JwtValidationConfig::with_secret("s3cret");
        let header = format!("Basic {}", token("s3cret", far_future()));
        assert!(parse_jwt_token_payload(&header, &config).is_err());
    }
}
