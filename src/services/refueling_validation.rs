use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::dto::refueling_dto::CreateRefuelingRequest;
use crate::models::FuelType;
use crate::utils::errors::{RecordRule, RecordValidationError};
use crate::utils::validation::strip_cpf;

/// Casas decimales de precio y volumen (NUMERIC(10,2))
pub const MONEY_SCALE: u32 = 2;

/// Límite superior exclusivo de precio y volumen (8 dígitos enteros)
pub const MONEY_UPPER_BOUND: Decimal = dec!(100000000);

/// Abastecimiento que pasó las reglas de negocio, con valores normalizados
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRefueling {
    pub station_id: i32,
    pub timestamp: DateTime<Utc>,
    pub fuel_type: FuelType,
    pub price_per_liter: Decimal,
    pub volume_liters: Decimal,
    /// Solo dígitos; el checksum se decide en el pipeline de admisión
    pub driver_cpf: String,
}

/// Validar reglas de negocio en orden: precio > 0, volumen > 0,
/// precio < 10^8, volumen < 10^8.
///
/// Devuelve el primer error. Precio y volumen se redondean a 2 casas antes
/// de comparar, así que un valor que redondea a `0.00` se rechaza.
pub fn validate_refueling(request: &CreateRefuelingRequest) -> Result<ValidatedRefueling, RecordValidationError> {
    let price_per_liter = round_money(request.price_per_liter);
    if price_per_liter <= Decimal::ZERO {
        return Err(RecordValidationError {
            field: "price_per_liter",
            reason: RecordRule::NonPositivePrice,
        });
    }

    let volume_liters = round_money(request.volume_liters);
    if volume_liters <= Decimal::ZERO {
        return Err(RecordValidationError {
            field: "volume_liters",
            reason: RecordRule::NonPositiveVolume,
        });
    }

    if price_per_liter >= MONEY_UPPER_BOUND {
        return Err(RecordValidationError {
            field: "price_per_liter",
            reason: RecordRule::PriceOutOfRange,
        });
    }

    if volume_liters >= MONEY_UPPER_BOUND {
        return Err(RecordValidationError {
            field: "volume_liters",
            reason: RecordRule::VolumeOutOfRange,
        });
    }

    Ok(ValidatedRefueling {
        station_id: request.station_id,
        timestamp: request.timestamp,
        fuel_type: request.fuel_type,
        price_per_liter,
        volume_liters,
        driver_cpf: strip_cpf(&request.driver_cpf),
    })
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request(price: Decimal, volume: Decimal, cpf: &str) -> CreateRefuelingRequest {
        CreateRefuelingRequest {
            station_id: 12,
            timestamp: Utc.with_ymd_and_hms(2024, 12, 20, 10, 0, 0).unwrap(),
            fuel_type: FuelType::Gasoline,
            price_per_liter: price,
            volume_liters: volume,
            driver_cpf: cpf.to_string(),
        }
    }

    #[test]
    fn test_valid_request_is_normalized() {
        let validated = validate_refueling(&request(dec!(5.499), dec!(30.5), "111.444.777-35")).unwrap();
        assert_eq!(validated.price_per_liter, dec!(5.50));
        assert_eq!(validated.volume_liters, dec!(30.50));
        assert_eq!(validated.driver_cpf, "11144477735");
        assert_eq!(validated.station_id, 12);
    }

    #[test]
    fn test_non_positive_price_is_rejected() {
        for price in [dec!(0), dec!(-1.00), dec!(0.004)] {
            let err = validate_refueling(&request(price, dec!(10), "11144477735")).unwrap_err();
            assert_eq!(err.reason, RecordRule::NonPositivePrice);
            assert_eq!(err.field, "price_per_liter");
        }
    }

    #[test]
    fn test_non_positive_volume_is_rejected() {
        let err = validate_refueling(&request(dec!(5.00), dec!(-10), "11144477735")).unwrap_err();
        assert_eq!(err.reason, RecordRule::NonPositiveVolume);
        assert_eq!(err.field, "volume_liters");
    }

    #[test]
    fn test_price_rule_is_checked_before_volume() {
        let err = validate_refueling(&request(dec!(0), dec!(0), "11144477735")).unwrap_err();
        assert_eq!(err.reason, RecordRule::NonPositivePrice);
    }

    #[test]
    fn test_values_must_fit_numeric_10_2() {
        let largest = validate_refueling(&request(dec!(99999999.99), dec!(99999999.994), "11144477735")).unwrap();
        assert_eq!(largest.price_per_liter, dec!(99999999.99));
        assert_eq!(largest.volume_liters, dec!(99999999.99));

        let err = validate_refueling(&request(dec!(100000000), dec!(10), "11144477735")).unwrap_err();
        assert_eq!(err.reason, RecordRule::PriceOutOfRange);
        assert_eq!(err.field, "price_per_liter");

        // 99999999.995 redondea a 100000000.00
        let err = validate_refueling(&request(dec!(5.00), dec!(99999999.995), "11144477735")).unwrap_err();
        assert_eq!(err.reason, RecordRule::VolumeOutOfRange);
        assert_eq!(err.field, "volume_liters");

        let err = validate_refueling(&request(Decimal::MAX, dec!(10), "11144477735")).unwrap_err();
        assert_eq!(err.reason, RecordRule::PriceOutOfRange);
    }

    #[test]
    fn test_positivity_is_checked_before_range() {
        let err = validate_refueling(&request(dec!(1000000000), dec!(0), "11144477735")).unwrap_err();
        assert_eq!(err.reason, RecordRule::NonPositiveVolume);
    }

    #[test]
    fn test_malformed_cpf_is_only_stripped() {
        let validated = validate_refueling(&request(dec!(5.00), dec!(10), "12-3")).unwrap();
        assert_eq!(validated.driver_cpf, "123");
    }
}
