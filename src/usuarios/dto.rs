use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

pub(crate) fn is_valid_correo(correo: &str) -> bool {
    lazy_static! {
        static ref CORREO_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    CORREO_RE.is_match(correo)
}

/// Body of POST /usuario/registro. Fields default to empty so that a missing
/// field reports the same itemized message as an empty one.
#[derive(Debug, Deserialize)]
pub struct RegistroRequest {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub contrasena: String,
}

impl RegistroRequest {
    pub fn validar(&self) -> Result<(), Vec<FieldError>> {
        let mut errores = Vec::new();
        if self.nombre.trim().is_empty() {
            errores.push(FieldError {
                campo: "nombre",
                mensaje: "El campo nombre es requerido",
            });
        }
        if !is_valid_correo(&self.correo) {
            errores.push(FieldError {
                campo: "correo",
                mensaje: "El campo correo debe ser una dirección de correo válida",
            });
        }
        if self.contrasena.chars().count() < 6 {
            errores.push(FieldError {
                campo: "contrasena",
                mensaje: "El campo contraseña debe tener al menos 6 caracteres",
            });
        }
        if errores.is_empty() {
            Ok(())
        } else {
            Err(errores)
        }
    }
}

/// Body of POST /usuario/login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub contrasena: String,
}

impl LoginRequest {
    pub fn validar(&self) -> Result<(), Vec<FieldError>> {
        let mut errores = Vec::new();
        if !is_valid_correo(&self.correo) {
            errores.push(FieldError {
                campo: "correo",
                mensaje: "El campo correo debe ser una dirección de correo válida",
            });
        }
        if self.contrasena.is_empty() {
            errores.push(FieldError {
                campo: "contrasena",
                mensaje: "El campo contraseña es requerido",
            });
        }
        if errores.is_empty() {
            Ok(())
        } else {
            Err(errores)
        }
    }
}

/// Body of PUT /usuario/:id. The password only changes when a non-empty
/// contrasena is supplied.
#[derive(Debug, Deserialize)]
pub struct ActualizarUsuarioRequest {
    pub nombre: String,
    pub correo: String,
    #[serde(default)]
    pub contrasena: Option<String>,
}

/// Issued after a successful registro or login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registro_valido_passes() {
        let req = RegistroRequest {
            nombre: "Ana".into(),
            correo: "ana@x.com".into(),
            contrasena: "secret1".into(),
        };
        assert!(req.validar().is_ok());
    }

    #[test]
    fn registro_itemizes_every_invalid_field() {
        let req = RegistroRequest {
            nombre: "".into(),
            correo: "no-es-correo".into(),
            contrasena: "corta".into(),
        };
        let errores = req.validar().unwrap_err();
        let campos: Vec<_> = errores.iter().map(|e| e.campo).collect();
        assert_eq!(campos, vec!["nombre", "correo", "contrasena"]);
    }

    #[test]
    fn registro_rejects_short_password() {
        let req = RegistroRequest {
            nombre: "Ana".into(),
            correo: "ana@x.com".into(),
            contrasena: "12345".into(),
        };
        let errores = req.validar().unwrap_err();
        assert_eq!(errores.len(), 1);
        assert_eq!(errores[0].campo, "contrasena");
    }

    #[test]
    fn login_requires_valid_correo_and_contrasena() {
        let req = LoginRequest {
            correo: "sin-arroba".into(),
            contrasena: "".into(),
        };
        let errores = req.validar().unwrap_err();
        assert_eq!(errores.len(), 2);
    }

    #[test]
    fn correo_regex_accepts_common_addresses() {
        assert!(is_valid_correo("ana@x.com"));
        assert!(is_valid_correo("usuario1@example.com"));
        assert!(!is_valid_correo("ana@x"));
        assert!(!is_valid_correo("@x.com"));
        assert!(!is_valid_correo("ana x@x.com"));
    }
}
