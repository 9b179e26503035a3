use serde::{Deserialize, Serialize};

/// Aggregated financial snapshot for a store over its whole history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResumenFinanciero {
    /// Total principal lent out, in pesos.
    pub total_prestado: f64,

    /// Total collected back (principal plus interest), in pesos.
    pub total_recaudado: f64,

    /// Total operating expenses, in pesos.
    pub total_gastos: f64,

    /// Total capital contributions, in pesos.
    pub total_aportes: f64,

    /// Total profit withdrawals, in pesos.
    pub total_retiros: f64,

    /// Outstanding balance across active credits, in pesos.
    pub cartera_activa: f64,

    /// Clients with at least one active credit.
    pub clientes_activos: u32,
}

impl ResumenFinanciero {
    /// Realized earnings: collections minus what went out in loans and
    /// expenses. Negative while capital is still on the street.
    #[must_use]
    pub fn utilidad(&self) -> f64 {
        self.total_recaudado - self.total_prestado - self.total_gastos
    }

    /// Cash currently in the drawer.
    #[must_use]
    pub fn caja(&self) -> f64 {
        self.total_aportes + self.total_recaudado
            - self.total_prestado
            - self.total_gastos
            - self.total_retiros
    }

    /// Cash that can be withdrawn without going negative.
    #[must_use]
    pub fn disponible_para_retiro(&self) -> f64 {
        self.caja().max(0.0)
    }

    /// Share of lent principal already collected back, in percent.
    #[must_use]
    pub fn porcentaje_recuperacion(&self) -> f64 {
        if self.total_prestado <= 0.0 {
            return 0.0;
        }
        (self.total_recaudado / self.total_prestado) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resumen() -> ResumenFinanciero {
        ResumenFinanciero {
            total_prestado: 1_000_000.0,
            total_recaudado: 800_000.0,
            total_gastos: 50_000.0,
            total_aportes: 400_000.0,
            total_retiros: 100_000.0,
            cartera_activa: 380_000.0,
            clientes_activos: 14,
        }
    }

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
    }

    #[test]
    fn utilidad_is_collections_minus_outflows() {
        approx(resumen().utilidad(), -250_000.0);
    }

    #[test]
    fn caja_includes_contributions_and_withdrawals() {
        approx(resumen().caja(), 50_000.0);
    }

    #[test]
    fn disponible_never_negative() {
        let mut r = resumen();
        r.total_retiros = 500_000.0;
        assert!(r.caja() < 0.0);
        approx(r.disponible_para_retiro(), 0.0);
    }

    #[test]
    fn recovery_share_guards_zero_lending() {
        approx(ResumenFinanciero::default().porcentaje_recuperacion(), 0.0);
        approx(resumen().porcentaje_recuperacion(), 80.0);
    }

    #[test]
    fn resumen_serialization_roundtrip() {
        let r = resumen();
        let serialized = serde_json::to_string(&r).unwrap();
        let deserialized: ResumenFinanciero = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, r);
    }
}
