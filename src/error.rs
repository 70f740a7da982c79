//! Error Types
//!
//! Every failure is contained locally and surfaced to the user as a notice,
//! so the Display text is user-facing.

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("Falha de autenticação: {0}")]
    Auth(String),
    #[error("Erro de rede: {0}")]
    Network(String),
    #[error("Erro do servidor ({status}): {message}")]
    Storage { status: u16, message: String },
    #[error("Resposta inválida: {0}")]
    Decode(String),
    #[error("Não encontrado: {0}")]
    NotFound(String),
    #[error("Conflito: {0}")]
    Conflict(String),
    #[error("Configuração inválida: {0}")]
    Config(String),
}

/// Which Supabase API answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// GoTrue, `/auth/v1`
    Auth,
    /// PostgREST, `/rest/v1`
    Rest,
}

impl Service {
    pub fn from_path(path: &str) -> Self {
        if path.contains("/auth/v1/") {
            Service::Auth
        } else {
            Service::Rest
        }
    }
}

impl AppError {
    /// Map an HTTP failure to the matching variant.
    ///
    /// 400/422 are credential errors only on GoTrue; on PostgREST they
    /// are bad queries.
    pub fn from_status(service: Service, status: u16, message: String) -> Self {
        match (service, status) {
            (_, 401 | 403) | (Service::Auth, 400 | 422) => AppError::Auth(message),
            (_, 404) => AppError::NotFound(message),
            (_, 409) => AppError::Conflict(message),
            _ => AppError::Storage { status, message },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::Decode(e.to_string())
        } else {
            AppError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Decode(e.to_string())
    }
}

/// Pull a human message out of a Supabase error body.
///
/// GoTrue uses `error_description`/`msg`, PostgREST uses `message`.
pub fn extract_error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(|m| m.as_str()))
        })
        .map(str::to_string)
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() { "sem detalhes".to_string() } else { trimmed.to_string() }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(AppError::from_status(Service::Auth, 400, "x".into()).is_auth());
        assert!(AppError::from_status(Service::Rest, 401, "JWT expired".into()).is_auth());
        assert_eq!(AppError::from_status(Service::Rest, 404, "x".into()), AppError::NotFound("x".into()));
        assert_eq!(
            AppError::from_status(Service::Rest, 500, "boom".into()),
            AppError::Storage { status: 500, message: "boom".into() }
        );
    }

    #[test]
    fn test_bad_rest_query_is_not_an_auth_failure() {
        let err = AppError::from_status(Service::Rest, 400, "column time_entries.foo does not exist".into());
        assert!(!err.is_auth());
        assert_eq!(
            err,
            AppError::Storage { status: 400, message: "column time_entries.foo does not exist".into() }
        );
        assert!(!AppError::from_status(Service::Rest, 422, "x".into()).is_auth());
        assert!(AppError::from_status(Service::Auth, 422, "x".into()).is_auth());
    }

    #[test]
    fn test_service_from_path() {
        assert_eq!(Service::from_path("/auth/v1/token"), Service::Auth);
        assert_eq!(Service::from_path("/rest/v1/time_entries"), Service::Rest);
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(extract_error_message(r#"{"code":"23505","message":"duplicate key"}"#), "duplicate key");
        assert_eq!(extract_error_message(r#"{"msg":"User already registered"}"#), "User already registered");
        assert_eq!(extract_error_message("gateway timeout"), "gateway timeout");
        assert_eq!(extract_error_message(""), "sem detalhes");
    }

    #[test]
    fn test_display_is_user_facing() {
        let err = AppError::Storage { status: 503, message: "indisponível".into() };
        assert_eq!(err.to_string(), "Erro do servidor (503): indisponível");
    }
}
