//! Middleware de autenticación JWT
//!
//! La autenticación real (login, sesiones, alta de usuarios) vive fuera de
//! este servicio. Aquí solo se extrae y valida el contexto de identidad del
//! Bearer token: quién actúa y con qué rol. El core confía en ese contexto;
//! los checks de capacidad (staff/propietario) los hace cada controller
//! explícitamente antes de invocar la operación.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Claims del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    /// Check de capacidad de taller, explícito en cada operación que lo requiere
    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.is_staff() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Staff privileges are required for this operation".to_string(),
            ))
        }
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    // Decodificar y validar JWT
    let token_data = decode::<Claims>(
        auth_header,
        &DecodingKey::from_secret(state.config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

    let claims = token_data.claims;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".to_string()))?;

    let role = UserRole::parse(&claims.role)
        .ok_or_else(|| AppError::Unauthorized("Invalid role in token".to_string()))?;

    // Inyectar usuario autenticado en las extensions
    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id, role });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    // El token lo emite el colaborador de identidad; acá solo se firma uno
    // equivalente para ejercitar la validación
    fn sign_token(user_id: Uuid, role: UserRole, secret: &str) -> String {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.as_str().to_string(),
            exp: (now + chrono::Duration::seconds(3600)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap()
    }

    #[test]
    fn test_jwt_roundtrip() {
        let user_id = Uuid::new_v4();
        let secret = "test-secret";
        let token = sign_token(user_id, UserRole::Staff, secret);

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, user_id.to_string());
        assert_eq!(decoded.claims.role, "staff");
    }

    #[test]
    fn test_jwt_wrong_secret_rejected() {
        let token = sign_token(Uuid::new_v4(), UserRole::Customer, "secret-a");

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("secret-b".as_ref()),
            &Validation::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_require_staff() {
        let staff = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role: UserRole::Staff,
        };
        let customer = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role: UserRole::Customer,
        };

        assert!(staff.require_staff().is_ok());
        assert!(customer.require_staff().is_err());
    }
}
