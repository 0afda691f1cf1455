//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y los valores por
//! defecto del negocio (intervalos de servicio y ventana de recordatorios).

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub cors_origins: Vec<String>,
    // Intervalos por defecto para recordatorios de servicio
    pub service_interval_days: i64,
    pub service_interval_km: i32,
    pub reminder_window_days: i64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "dev-secret-key-change-in-production".to_string()),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            service_interval_days: env::var("SERVICE_INTERVAL_DAYS")
                .unwrap_or_else(|_| "180".to_string())
                .parse()
                .expect("SERVICE_INTERVAL_DAYS must be a valid number"),
            service_interval_km: env::var("SERVICE_INTERVAL_KM")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .expect("SERVICE_INTERVAL_KM must be a valid number"),
            reminder_window_days: env::var("REMINDER_WINDOW_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("REMINDER_WINDOW_DAYS must be a valid number"),
        }
    }
}

impl EnvironmentConfig {
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intervals() {
        // Sin variables de entorno, los defaults de negocio aplican
        let config = EnvironmentConfig::default();
        assert_eq!(config.service_interval_days, 180);
        assert_eq!(config.service_interval_km, 10_000);
        assert_eq!(config.reminder_window_days, 30);
    }
}
