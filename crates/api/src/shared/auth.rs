use crate::error::MediscanError;
use actix_web::HttpRequest;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mediscan_domain::{User, ID};
use mediscan_infra::MediscanContext;
use serde::{Deserialize, Serialize};

/// Name of the cookie holding the token of browser clients
const TOKEN_COOKIE: &str = "token";
const TOKEN_LIFETIME_SECS: i64 = 60 * 60 * 24 * 7;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Id of the `User` the token was issued to
    id: String,
    exp: usize, // Expiration time (as UTC timestamp)
}

/// Issues a token for the `User` which is valid for a week
pub fn create_token(user_id: &ID, secret: &str) -> anyhow::Result<String> {
    let claims = Claims {
        id: user_id.as_string(),
        exp: (Utc::now().timestamp() + TOKEN_LIFETIME_SECS) as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

fn decode_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?
    .claims;

    Ok(claims)
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .trim_start_matches("Bearer")
        .trim_start_matches("bearer")
        .trim()
        .to_string()
}

fn get_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(TOKEN_COOKIE) {
        return Some(cookie.value().to_string());
    }
    let header = req.headers().get("authorization")?;
    header.to_str().ok().map(parse_authtoken_header)
}

/// Resolves the `User` making the request from its token
pub async fn protect_route(req: &HttpRequest, ctx: &MediscanContext) -> Result<User, MediscanError> {
    let token = get_token(req)
        .ok_or_else(|| MediscanError::Unauthorized("No token, authorization denied".into()))?;
    let claims = decode_token(&token, &ctx.config.jwt_secret)
        .map_err(|_| MediscanError::Unauthorized("Token is not valid".into()))?;
    let user_id = claims
        .id
        .parse::<ID>()
        .map_err(|_| MediscanError::Unauthorized("Token is not valid".into()))?;

    match ctx.repos.users.find(&user_id).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(MediscanError::Unauthorized(
            "Unable to find user from credentials".into(),
        )),
        Err(_) => Err(MediscanError::InternalError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_decodes_issued_tokens() {
        let user_id = ID::new();
        let token = create_token(&user_id, "secret").unwrap();
        let claims = decode_token(&token, "secret").unwrap();
        assert_eq!(claims.id, user_id.as_string());
    }

    #[test]
    fn it_rejects_tokens_signed_with_other_secret() {
        let token = create_token(&ID::new(), "secret").unwrap();
        assert!(decode_token(&token, "other secret").is_err());
    }

    #[test]
    fn it_parses_authorization_header() {
        assert_eq!(parse_authtoken_header("Bearer abc.def"), "abc.def");
        assert_eq!(parse_authtoken_header("abc.def"), "abc.def");
    }
}
