//! Utilidades de validación
//!
//! Este módulo contiene la validación de matrículas usada por los DTOs
//! de vehículos.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    // Matrículas tipo "KA-01-AB-1234" o "ABC1234" - alfanumérico con guiones/espacios
    static ref REGISTRATION_NUMBER_REGEX: Regex =
        Regex::new(r"^[A-Z0-9][A-Z0-9 -]{2,18}[A-Z0-9]$").unwrap();
}

/// Validar formato de matrícula (se normaliza a mayúsculas antes de validar)
pub fn validate_registration_number(value: &str) -> Result<(), ValidationError> {
    let normalized = value.trim().to_uppercase();
    if REGISTRATION_NUMBER_REGEX.is_match(&normalized) {
        Ok(())
    } else {
        let mut error = ValidationError::new("registration_number");
        error.add_param("value".into(), &value.to_string());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_registration_number() {
        assert!(validate_registration_number("KA-01-AB-1234").is_ok());
        assert!(validate_registration_number("abc1234").is_ok()); // normalizado a mayúsculas
        assert!(validate_registration_number("").is_err());
        assert!(validate_registration_number("X").is_err());
        assert!(validate_registration_number("!!invalid!!").is_err());
    }
}
