use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Payment cadence for a credit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Frecuencia {
    Diario,
    Semanal,
    Quincenal,
    Mensual,
}

impl Frecuencia {
    /// Return the canonical string representation expected by the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Diario => "diario",
            Self::Semanal => "semanal",
            Self::Quincenal => "quincenal",
            Self::Mensual => "mensual",
        }
    }
}

impl fmt::Display for Frecuencia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frecuencia {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "diario" => Ok(Self::Diario),
            "semanal" => Ok(Self::Semanal),
            "quincenal" => Ok(Self::Quincenal),
            "mensual" => Ok(Self::Mensual),
            _ => Err("unknown payment cadence"),
        }
    }
}

/// Lifecycle state of a credit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EstadoCredito {
    Activo,
    Pagado,
    Vencido,
}

impl EstadoCredito {
    /// Return the canonical string representation expected by the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activo => "activo",
            Self::Pagado => "pagado",
            Self::Vencido => "vencido",
        }
    }
}

impl fmt::Display for EstadoCredito {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstadoCredito {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "activo" => Ok(Self::Activo),
            "pagado" => Ok(Self::Pagado),
            "vencido" => Ok(Self::Vencido),
            _ => Err("unknown credit state"),
        }
    }
}

/// A credit sale ("venta a crédito") granted to a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credito {
    /// Unique identifier for the credit.
    pub id: i64,

    /// The borrowing client.
    pub cliente_id: i64,

    /// The store that granted the credit.
    pub tienda_id: i64,

    /// Principal lent, in pesos.
    pub monto: f64,

    /// Flat interest over the whole term, in percent.
    pub interes: f64,

    /// Number of installments.
    pub cuotas: u32,

    /// Payment cadence.
    pub frecuencia: Frecuencia,

    /// Outstanding balance, in pesos.
    pub saldo: f64,

    /// Date the credit was granted.
    pub fecha: NaiveDate,

    /// Lifecycle state.
    pub estado: EstadoCredito,
}

impl Credito {
    /// Principal plus flat interest.
    #[must_use]
    pub fn total_a_pagar(&self) -> f64 {
        self.monto * (1.0 + self.interes / 100.0)
    }

    /// Value of a single installment. A zero-installment credit is due in
    /// one payment.
    #[must_use]
    pub fn valor_cuota(&self) -> f64 {
        let total = self.total_a_pagar();
        if self.cuotas == 0 {
            total
        } else {
            total / f64::from(self.cuotas)
        }
    }

    /// Share of the total already collected, in percent.
    #[must_use]
    pub fn porcentaje_pagado(&self) -> f64 {
        let total = self.total_a_pagar();
        if total <= 0.0 {
            return 0.0;
        }
        ((total - self.saldo) / total) * 100.0
    }
}

/// Request to open a new credit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditoRequest {
    /// The borrowing client.
    pub cliente_id: i64,

    /// The store granting the credit.
    pub tienda_id: i64,

    /// Principal to lend, in pesos.
    pub monto: f64,

    /// Flat interest over the whole term, in percent.
    pub interes: f64,

    /// Number of installments.
    pub cuotas: u32,

    /// Payment cadence.
    pub frecuencia: Frecuencia,

    /// Date the credit is granted.
    pub fecha: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credito(monto: f64, interes: f64, cuotas: u32, saldo: f64) -> Credito {
        Credito {
            id: 1,
            cliente_id: 1,
            tienda_id: 1,
            monto,
            interes,
            cuotas,
            frecuencia: Frecuencia::Diario,
            saldo,
            fecha: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            estado: EstadoCredito::Activo,
        }
    }

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
    }

    #[test]
    fn total_includes_flat_interest() {
        approx(credito(100_000.0, 20.0, 30, 120_000.0).total_a_pagar(), 120_000.0);
    }

    #[test]
    fn installment_value_divides_total() {
        approx(credito(100_000.0, 20.0, 30, 120_000.0).valor_cuota(), 4_000.0);
    }

    #[test]
    fn zero_installments_due_in_one_payment() {
        approx(credito(50_000.0, 10.0, 0, 55_000.0).valor_cuota(), 55_000.0);
    }

    #[test]
    fn paid_share_tracks_balance() {
        approx(credito(100_000.0, 20.0, 30, 60_000.0).porcentaje_pagado(), 50.0);
        approx(credito(100_000.0, 20.0, 30, 0.0).porcentaje_pagado(), 100.0);
    }

    #[test]
    fn paid_share_guards_zero_total() {
        approx(credito(0.0, 0.0, 10, 0.0).porcentaje_pagado(), 0.0);
    }

    #[test]
    fn frecuencia_roundtrip() {
        for (text, frecuencia) in [
            ("diario", Frecuencia::Diario),
            ("semanal", Frecuencia::Semanal),
            ("quincenal", Frecuencia::Quincenal),
            ("mensual", Frecuencia::Mensual),
        ] {
            assert_eq!(frecuencia.as_str(), text);
            assert_eq!(Frecuencia::from_str(text).unwrap(), frecuencia);
        }
        assert!(Frecuencia::from_str("anual").is_err());
    }

    #[test]
    fn estado_roundtrip() {
        for (text, estado) in [
            ("activo", EstadoCredito::Activo),
            ("pagado", EstadoCredito::Pagado),
            ("vencido", EstadoCredito::Vencido),
        ] {
            assert_eq!(estado.as_str(), text);
            assert_eq!(EstadoCredito::from_str(text).unwrap(), estado);
        }
        assert!(EstadoCredito::from_str("mora").is_err());
    }

    #[test]
    fn credito_serialization_roundtrip() {
        let c = credito(80_000.0, 15.0, 20, 46_000.0);
        let serialized = serde_json::to_string(&c).unwrap();
        let deserialized: Credito = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, c);
    }
}
