use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Kind of cash movement outside the lending cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TipoMovimiento {
    /// Operating expense.
    Gasto,
    /// Capital contribution into the store.
    Aporte,
    /// Profit withdrawal out of the store.
    Retiro,
}

impl TipoMovimiento {
    /// Return the canonical string representation expected by the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gasto => "gasto",
            Self::Aporte => "aporte",
            Self::Retiro => "retiro",
        }
    }

    /// Human-readable Spanish label for UI display.
    #[must_use]
    pub fn etiqueta(self) -> &'static str {
        match self {
            Self::Gasto => "Gasto",
            Self::Aporte => "Aporte",
            Self::Retiro => "Retiro",
        }
    }
}

impl fmt::Display for TipoMovimiento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipoMovimiento {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "gasto" => Ok(Self::Gasto),
            "aporte" => Ok(Self::Aporte),
            "retiro" => Ok(Self::Retiro),
            _ => Err("unknown movement kind"),
        }
    }
}

/// A cash movement registered against a store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movimiento {
    /// Unique identifier for the movement.
    pub id: i64,

    /// The store the movement belongs to.
    pub tienda_id: i64,

    /// Kind of movement.
    pub tipo: TipoMovimiento,

    /// Amount, in pesos.
    pub valor: f64,

    /// Free-form description.
    pub descripcion: String,

    /// Movement date.
    pub fecha: NaiveDate,
}

/// Request to register a cash movement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovimientoRequest {
    /// The store the movement belongs to.
    pub tienda_id: i64,

    /// Kind of movement.
    pub tipo: TipoMovimiento,

    /// Amount, in pesos.
    pub valor: f64,

    /// Free-form description.
    pub descripcion: String,

    /// Movement date.
    pub fecha: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tipo_movimiento_roundtrip() {
        for (text, tipo) in [
            ("gasto", TipoMovimiento::Gasto),
            ("aporte", TipoMovimiento::Aporte),
            ("retiro", TipoMovimiento::Retiro),
        ] {
            assert_eq!(tipo.as_str(), text);
            assert_eq!(tipo.to_string(), text);
            assert_eq!(TipoMovimiento::from_str(text).unwrap(), tipo);
        }
        assert!(TipoMovimiento::from_str("prestamo").is_err());
    }

    #[test]
    fn movimiento_serialization_roundtrip() {
        let movimiento = Movimiento {
            id: 12,
            tienda_id: 2,
            tipo: TipoMovimiento::Gasto,
            valor: 35_000.0,
            descripcion: "gasolina moto".to_string(),
            fecha: NaiveDate::from_ymd_opt(2026, 8, 18).unwrap(),
        };

        let serialized = serde_json::to_string(&movimiento).unwrap();
        let deserialized: Movimiento = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, movimiento);
        assert_eq!(
            serde_json::to_value(&movimiento).unwrap()["tipo"],
            "gasto"
        );
    }
}
