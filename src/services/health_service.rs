//! Puntaje de salud del vehículo
//!
//! Función pura sobre el historial de servicios de un vehículo. Devuelve un
//! puntaje acotado en [0, 100]; 50 es el valor neutro cuando no hay historial.
//! El caller materializa los records antes de llamar; no se asume orden.

use chrono::NaiveDate;

use crate::models::service_record::ServiceRecord;

/// Calcular el puntaje de salud (0-100) a partir del historial materializado
pub fn calculate_vehicle_health_score(records: &[ServiceRecord], today: NaiveDate) -> i32 {
    let last_service_date = records.iter().map(|r| r.service_date).max();
    score_from_history(records.len(), last_service_date, today)
}

/// Puntaje a partir del resumen del historial. `None` en la fecha del último
/// servicio (historial vacío o sin fecha) devuelve el neutro 50.
pub fn score_from_history(
    total_services: usize,
    last_service_date: Option<NaiveDate>,
    today: NaiveDate,
) -> i32 {
    if total_services == 0 {
        return 50;
    }
    let last_service_date = match last_service_date {
        Some(date) => date,
        None => return 50,
    };

    let days_since_service = (today - last_service_date).num_days();

    let count_score = std::cmp::min(40, total_services as i32 * 5);

    let recency_score = if days_since_service <= 90 {
        40
    } else if days_since_service <= 180 {
        30
    } else if days_since_service <= 365 {
        20
    } else {
        10
    };

    // Constante heredada: no se hace análisis real de regularidad
    let regularity_score = 10;

    (count_score + recency_score + regularity_score).clamp(0, 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn record(service_date: NaiveDate) -> ServiceRecord {
        ServiceRecord {
            id: Uuid::new_v4(),
            record_seq: 1,
            service_request_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            service_date,
            service_type: "Regular Service".to_string(),
            parts_replaced: None,
            labor_charge: Decimal::ZERO,
            additional_cost: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            service_notes: None,
            odometer_reading: None,
            created_at: Utc::now(),
            is_deleted: false,
        }
    }

    #[test]
    fn test_zero_records_is_neutral() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(calculate_vehicle_health_score(&[], today), 50);
    }

    #[test]
    fn test_missing_last_date_is_neutral() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(score_from_history(3, None, today), 50);
    }

    #[test]
    fn test_three_records_200_days_ago() {
        // count=15, recency=20 (200 días), regularity=10 -> 45
        let today = NaiveDate::from_ymd_opt(2024, 9, 17).unwrap();
        let last = today - Duration::days(200);
        let records = vec![
            record(last - Duration::days(400)),
            record(last - Duration::days(200)),
            record(last),
        ];
        assert_eq!(calculate_vehicle_health_score(&records, today), 45);
    }

    #[test]
    fn test_recency_bands() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        // Un solo record: count=5, regularity=10
        for (days, expected_recency) in [(90, 40), (91, 30), (180, 30), (181, 20), (365, 20), (366, 10)] {
            let records = vec![record(today - Duration::days(days))];
            assert_eq!(
                calculate_vehicle_health_score(&records, today),
                5 + expected_recency + 10,
                "days_since_service = {}",
                days
            );
        }
    }

    #[test]
    fn test_count_score_saturates() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let records: Vec<ServiceRecord> =
            (0..20).map(|i| record(today - Duration::days(i))).collect();
        // count saturado en 40, recency 40, regularity 10 -> clamp a 90
        assert_eq!(calculate_vehicle_health_score(&records, today), 90);
    }

    #[test]
    fn test_unordered_input_finds_latest() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let records = vec![
            record(today - Duration::days(30)),
            record(today - Duration::days(500)),
            record(today - Duration::days(300)),
        ];
        // El más reciente (30 días) define la recencia: 15 + 40 + 10 = 65
        assert_eq!(calculate_vehicle_health_score(&records, today), 65);
    }

    #[test]
    fn test_score_is_bounded() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        for n in 0..50usize {
            let records: Vec<ServiceRecord> = (0..n)
                .map(|i| record(today - Duration::days(i as i64 * 97)))
                .collect();
            let score = calculate_vehicle_health_score(&records, today);
            assert!((0..=100).contains(&score));
        }
    }
}
