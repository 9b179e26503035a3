use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A collection ("recaudo") applied against a credit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recaudo {
    /// Unique identifier for the collection.
    pub id: i64,

    /// The credit the payment applies to.
    pub credito_id: i64,

    /// Amount collected, in pesos.
    pub valor: f64,

    /// Collection date.
    pub fecha: NaiveDate,
}

/// Request to register a collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecaudoRequest {
    /// The credit the payment applies to.
    pub credito_id: i64,

    /// Amount collected, in pesos.
    pub valor: f64,

    /// Collection date.
    pub fecha: NaiveDate,
}

/// Request to record a visit where the client did not pay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoPagoRequest {
    /// The credit that went unpaid.
    pub credito_id: i64,

    /// Reason given by the client.
    pub motivo: String,

    /// Visit date.
    pub fecha: NaiveDate,
}

/// In-progress payment entry, persisted so a reload mid-collection restores
/// the form. Cleared on submit and on logout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AbonoDraft {
    /// The credit being paid.
    pub credito_id: i64,

    /// Amount typed so far, in pesos.
    pub valor: f64,
}

/// In-progress no-payment entry, persisted alongside [`AbonoDraft`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoPagoDraft {
    /// The credit that went unpaid.
    pub credito_id: i64,

    /// Reason typed so far.
    pub motivo: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recaudo_serialization_roundtrip() {
        let recaudo = Recaudo {
            id: 9,
            credito_id: 4,
            valor: 4_000.0,
            fecha: NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
        };

        let serialized = serde_json::to_string(&recaudo).unwrap();
        let deserialized: Recaudo = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, recaudo);
    }

    #[test]
    fn drafts_roundtrip() {
        let abono = AbonoDraft {
            credito_id: 4,
            valor: 2_500.0,
        };
        let no_pago = NoPagoDraft {
            credito_id: 4,
            motivo: "viajó".to_string(),
        };

        let abono_back: AbonoDraft =
            serde_json::from_str(&serde_json::to_string(&abono).unwrap()).unwrap();
        let no_pago_back: NoPagoDraft =
            serde_json::from_str(&serde_json::to_string(&no_pago).unwrap()).unwrap();
        assert_eq!(abono_back, abono);
        assert_eq!(no_pago_back, no_pago);
    }
}
