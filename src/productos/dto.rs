use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::FieldError;

fn validar_nombre(nombre: &str, errores: &mut Vec<FieldError>) {
    if nombre.trim().is_empty() {
        errores.push(FieldError {
            campo: "nombre",
            mensaje: "El nombre es obligatorio",
        });
    } else if !(2..=255).contains(&nombre.chars().count()) {
        errores.push(FieldError {
            campo: "nombre",
            mensaje: "El nombre debe tener entre 2 y 255 caracteres",
        });
    }
}

fn validar_precio(precio: Decimal, errores: &mut Vec<FieldError>) {
    if precio < Decimal::ZERO {
        errores.push(FieldError {
            campo: "precioUnitario",
            mensaje: "El precio unitario no puede ser negativo",
        });
    }
}

/// Body of POST /producto/. The owner is the authenticated user, never a
/// body field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrearProductoRequest {
    #[serde(default)]
    pub nombre: String,
    pub precio_unitario: Decimal,
    #[serde(default = "default_estado")]
    pub estado: bool,
    pub categoria_id: i64,
}

fn default_estado() -> bool {
    true
}

impl CrearProductoRequest {
    pub fn validar(&self) -> Result<(), Vec<FieldError>> {
        let mut errores = Vec::new();
        validar_nombre(&self.nombre, &mut errores);
        validar_precio(self.precio_unitario, &mut errores);
        if errores.is_empty() {
            Ok(())
        } else {
            Err(errores)
        }
    }
}

/// Body of PUT /producto/:id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarProductoRequest {
    #[serde(default)]
    pub nombre: String,
    pub precio_unitario: Decimal,
    pub estado: bool,
}

impl ActualizarProductoRequest {
    pub fn validar(&self) -> Result<(), Vec<FieldError>> {
        let mut errores = Vec::new();
        validar_nombre(&self.nombre, &mut errores);
        validar_precio(self.precio_unitario, &mut errores);
        if errores.is_empty() {
            Ok(())
        } else {
            Err(errores)
        }
    }
}
