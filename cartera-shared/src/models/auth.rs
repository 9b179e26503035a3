use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Global role assignments for a user account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RolUsuario {
    Administrador,
    Cobrador,
}

impl RolUsuario {
    /// Return the canonical string representation expected by the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Administrador => "administrador",
            Self::Cobrador => "cobrador",
        }
    }
}

impl fmt::Display for RolUsuario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RolUsuario {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "administrador" => Ok(Self::Administrador),
            "cobrador" => Ok(Self::Cobrador),
            _ => Err("unknown user role"),
        }
    }
}

/// Represents an authenticated user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usuario {
    /// Unique identifier for the user.
    pub id: i64,

    /// The user's display name.
    pub nombre: String,

    /// The user's email address.
    pub email: String,

    /// The user's global role.
    pub rol: RolUsuario,
}

/// Worker/employee profile tied to a user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Perfil {
    /// Unique identifier for the profile.
    pub id: i64,

    /// The owning user id.
    pub usuario_id: i64,

    /// The worker's full name.
    pub nombre: String,

    /// Government identity document number.
    pub documento: String,

    /// Contact phone number.
    pub telefono: String,
}

/// Request to authenticate against the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// The user's login name or email address.
    pub usuario: String,

    /// The user's password.
    pub password: String,
}

/// Successful login payload returned by the backend.
///
/// Field names are the wire contract and must not be renamed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Opaque bearer access token.
    pub token: String,

    /// Opaque refresh token. Persisted for compatibility; no renewal flow
    /// exists against the current backend.
    pub refresh: String,

    /// The authenticated user.
    pub user: Usuario,

    /// The worker profile tied to the user.
    pub perfil: Perfil,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_usuario() -> Usuario {
        Usuario {
            id: 7,
            nombre: "Marta Rojas".to_string(),
            email: "marta@cartera.test".to_string(),
            rol: RolUsuario::Cobrador,
        }
    }

    fn sample_perfil() -> Perfil {
        Perfil {
            id: 3,
            usuario_id: 7,
            nombre: "Marta Rojas".to_string(),
            documento: "1023456789".to_string(),
            telefono: "3001234567".to_string(),
        }
    }

    #[test]
    fn rol_usuario_roundtrip() {
        for (text, rol) in [
            ("administrador", RolUsuario::Administrador),
            ("cobrador", RolUsuario::Cobrador),
        ] {
            assert_eq!(rol.as_str(), text);
            assert_eq!(rol.to_string(), text);
            assert_eq!(RolUsuario::from_str(text).unwrap(), rol);
        }
    }

    #[test]
    fn rol_usuario_invalid() {
        assert!(RolUsuario::from_str("gerente").is_err());
    }

    #[test]
    fn login_response_wire_field_names() {
        let response = LoginResponse {
            token: "tok-abc".to_string(),
            refresh: "ref-xyz".to_string(),
            user: sample_usuario(),
            perfil: sample_perfil(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token"], "tok-abc");
        assert_eq!(json["refresh"], "ref-xyz");
        assert_eq!(json["user"]["nombre"], "Marta Rojas");
        assert_eq!(json["perfil"]["documento"], "1023456789");
    }

    #[test]
    fn login_response_deserializes_backend_payload() {
        let raw = r#"{
            "token": "tok-abc",
            "refresh": "ref-xyz",
            "user": {"id": 7, "nombre": "Marta Rojas", "email": "marta@cartera.test", "rol": "cobrador"},
            "perfil": {"id": 3, "usuario_id": 7, "nombre": "Marta Rojas", "documento": "1023456789", "telefono": "3001234567"}
        }"#;

        let response: LoginResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.token, "tok-abc");
        assert_eq!(response.user, sample_usuario());
        assert_eq!(response.perfil, sample_perfil());
    }

    #[test]
    fn usuario_serialization_roundtrip() {
        let usuario = sample_usuario();
        let serialized = serde_json::to_string(&usuario).unwrap();
        let deserialized: Usuario = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, usuario);
    }
}
