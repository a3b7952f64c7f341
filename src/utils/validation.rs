//! Utilidades de validación
//!
//! Normalización y validación del CPF del motorista (código de 11 dígitos
//! con dos dígitos verificadores en base 11).

use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::errors::IdentityError;

/// Cantidad de dígitos de un CPF
pub const CPF_LENGTH: usize = 11;

lazy_static! {
    static ref NON_DIGIT: Regex = Regex::new(r"[^0-9]").unwrap();
}

/// Quitar puntuación (puntos, guiones, espacios...) y dejar solo dígitos ASCII
pub fn strip_cpf(raw: &str) -> String {
    NON_DIGIT.replace_all(raw, "").into_owned()
}

/// Normalizar y validar un CPF
///
/// Devuelve los 11 dígitos sin puntuación, o el primer error encontrado:
/// longitud incorrecta, todos los dígitos iguales, o dígito verificador
/// inválido.
pub fn normalize_and_validate_cpf(raw: &str) -> Result<String, IdentityError> {
    let cpf = strip_cpf(raw);

    let digits: Vec<u32> = cpf.bytes().map(|b| u32::from(b - b'0')).collect();
    if digits.len() != CPF_LENGTH {
        return Err(IdentityError::WrongLength(digits.len()));
    }

    if digits.iter().all(|&d| d == digits[0]) {
        return Err(IdentityError::DegenerateCode);
    }

    if digits[9] != check_digit(&digits[..9]) {
        return Err(IdentityError::InvalidCheckDigit);
    }

    if digits[10] != check_digit(&digits[..10]) {
        return Err(IdentityError::InvalidCheckDigit);
    }

    Ok(cpf)
}

/// Dígito verificador sobre un prefijo de 9 o 10 dígitos.
/// Pesos decrecientes desde `len + 1` hasta 2.
fn check_digit(prefix: &[u32]) -> u32 {
    let top_weight = prefix.len() as u32 + 1;
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (top_weight - i as u32))
        .sum();

    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cpf_with_and_without_formatting() {
        assert_eq!(normalize_and_validate_cpf("11144477735").unwrap(), "11144477735");
        assert_eq!(normalize_and_validate_cpf("111.444.777-35").unwrap(), "11144477735");
        assert_eq!(normalize_and_validate_cpf(" 111 444 777 35 ").unwrap(), "11144477735");
    }

    #[test]
    fn test_known_valid_fixtures() {
        for cpf in ["52998224725", "529.982.247-25", "12345678909"] {
            let normalized = normalize_and_validate_cpf(cpf).unwrap();
            assert_eq!(normalized.len(), CPF_LENGTH);
        }
    }

    #[test]
    fn test_all_same_digits_is_degenerate() {
        for d in 0..=9 {
            let cpf = d.to_string().repeat(11);
            assert_eq!(normalize_and_validate_cpf(&cpf), Err(IdentityError::DegenerateCode));
        }
        assert_eq!(
            normalize_and_validate_cpf("111.111.111-11"),
            Err(IdentityError::DegenerateCode)
        );
    }

    #[test]
    fn test_invalid_check_digits() {
        assert_eq!(
            normalize_and_validate_cpf("12345678900"),
            Err(IdentityError::InvalidCheckDigit)
        );
        assert_eq!(
            normalize_and_validate_cpf("123.456.789-00"),
            Err(IdentityError::InvalidCheckDigit)
        );
        // primer dígito correcto, segundo incorrecto
        assert_eq!(
            normalize_and_validate_cpf("11144477734"),
            Err(IdentityError::InvalidCheckDigit)
        );
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(normalize_and_validate_cpf("123456789"), Err(IdentityError::WrongLength(9)));
        assert_eq!(normalize_and_validate_cpf("111444777350"), Err(IdentityError::WrongLength(12)));
        assert_eq!(normalize_and_validate_cpf(""), Err(IdentityError::WrongLength(0)));
        assert_eq!(normalize_and_validate_cpf("abc.def"), Err(IdentityError::WrongLength(0)));
    }

    #[test]
    fn test_strip_cpf_keeps_only_ascii_digits() {
        assert_eq!(strip_cpf("529.982.247-25"), "52998224725");
        assert_eq!(strip_cpf("١٢٣"), "");
    }
}
