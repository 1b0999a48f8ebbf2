use serde::Deserialize;

use crate::error::FieldError;

/// Body of POST /categoria/ and PUT /categoria/:id. Ownership comes from the
/// authenticated identity, never from the body.
#[derive(Debug, Deserialize)]
pub struct CategoriaRequest {
    #[serde(default)]
    pub nombre: String,
}

impl CategoriaRequest {
    pub fn validar(&self) -> Result<(), Vec<FieldError>> {
        let len = self.nombre.chars().count();
        if self.nombre.trim().is_empty() {
            return Err(vec![FieldError {
                campo: "nombre",
                mensaje: "El nombre es obligatorio",
            }]);
        }
        if !(2..=255).contains(&len) {
            return Err(vec![FieldError {
                campo: "nombre",
                mensaje: "El nombre debe tener entre 2 y 255 caracteres",
            }]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nombre_valido_passes() {
        let req = CategoriaRequest {
            nombre: "Categoría1".into(),
        };
        assert!(req.validar().is_ok());
    }

    #[test]
    fn nombre_vacio_is_obligatorio() {
        let req = CategoriaRequest { nombre: "".into() };
        let errores = req.validar().unwrap_err();
        assert_eq!(errores[0].mensaje, "El nombre es obligatorio");
    }

    #[test]
    fn nombre_demasiado_corto_fails_length_rule() {
        let req = CategoriaRequest { nombre: "a".into() };
        let errores = req.validar().unwrap_err();
        assert_eq!(
            errores[0].mensaje,
            "El nombre debe tener entre 2 y 255 caracteres"
        );
    }
}
