//! Modelo de ServiceRequest y su máquina de estados
//!
//! Este módulo contiene el struct ServiceRequest y el enum RequestStatus
//! con la tabla de transiciones legales. La máquina de estados solo valida
//! alcanzabilidad; la política de permisos la aplica el controller antes
//! de invocar la transición.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado de una solicitud de servicio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    InProgress,
    Completed,
    Cancelled,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(RequestStatus::Pending),
            "approved" => Some(RequestStatus::Approved),
            "in_progress" => Some(RequestStatus::InProgress),
            "completed" => Some(RequestStatus::Completed),
            "cancelled" => Some(RequestStatus::Cancelled),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }

    /// Estados desde los que ya no hay transición posible
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Completed | RequestStatus::Cancelled | RequestStatus::Rejected
        )
    }

    /// Tabla de transiciones legales. Repetir el estado actual es un no-op
    /// válido, no un error.
    pub fn can_transition_to(&self, target: RequestStatus) -> bool {
        if *self == target {
            return true;
        }
        match self {
            RequestStatus::Pending => matches!(
                target,
                RequestStatus::Approved | RequestStatus::Rejected | RequestStatus::Cancelled
            ),
            RequestStatus::Approved => {
                matches!(target, RequestStatus::InProgress | RequestStatus::Cancelled)
            }
            RequestStatus::InProgress => {
                matches!(target, RequestStatus::Completed | RequestStatus::Cancelled)
            }
            RequestStatus::Completed | RequestStatus::Cancelled | RequestStatus::Rejected => false,
        }
    }
}

/// ServiceRequest - mapea exactamente a la tabla service_requests
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceRequest {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub user_id: Uuid,
    pub service_type: String,
    pub custom_service_description: Option<String>,
    pub preferred_date: NaiveDate,
    pub preferred_time: Option<NaiveTime>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl ServiceRequest {
    /// Estado actual parseado; un valor corrupto en storage se trata como error aguas arriba
    pub fn current_status(&self) -> Option<RequestStatus> {
        RequestStatus::parse(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        let from = RequestStatus::Pending;
        assert!(from.can_transition_to(RequestStatus::Approved));
        assert!(from.can_transition_to(RequestStatus::Rejected));
        assert!(from.can_transition_to(RequestStatus::Cancelled));
        assert!(!from.can_transition_to(RequestStatus::InProgress));
        assert!(!from.can_transition_to(RequestStatus::Completed));
    }

    #[test]
    fn test_approved_transitions() {
        let from = RequestStatus::Approved;
        assert!(from.can_transition_to(RequestStatus::InProgress));
        assert!(from.can_transition_to(RequestStatus::Cancelled));
        assert!(!from.can_transition_to(RequestStatus::Completed));
        assert!(!from.can_transition_to(RequestStatus::Pending));
        assert!(!from.can_transition_to(RequestStatus::Rejected));
    }

    #[test]
    fn test_in_progress_transitions() {
        let from = RequestStatus::InProgress;
        assert!(from.can_transition_to(RequestStatus::Completed));
        assert!(from.can_transition_to(RequestStatus::Cancelled));
        assert!(!from.can_transition_to(RequestStatus::Approved));
    }

    #[test]
    fn test_terminal_states() {
        for terminal in [
            RequestStatus::Completed,
            RequestStatus::Cancelled,
            RequestStatus::Rejected,
        ] {
            assert!(terminal.is_terminal());
            for target in [
                RequestStatus::Pending,
                RequestStatus::Approved,
                RequestStatus::InProgress,
                RequestStatus::Completed,
                RequestStatus::Cancelled,
                RequestStatus::Rejected,
            ] {
                if target != terminal {
                    assert!(!terminal.can_transition_to(target));
                }
            }
        }
    }

    #[test]
    fn test_same_state_is_noop() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::InProgress,
            RequestStatus::Completed,
        ] {
            assert!(status.can_transition_to(status));
        }
    }

    #[test]
    fn test_parse_roundtrip() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::InProgress,
            RequestStatus::Completed,
            RequestStatus::Cancelled,
            RequestStatus::Rejected,
        ] {
            assert_eq!(RequestStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RequestStatus::parse("unknown"), None);
    }
}
