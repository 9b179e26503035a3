use serde::{Deserialize, Serialize};

/// A store/branch ("tienda") the authenticated user operates against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tienda {
    /// Unique identifier for the store.
    pub id: i64,

    /// The store's display name.
    pub nombre: String,

    /// Street address.
    pub direccion: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tienda_serialization_roundtrip() {
        let tienda = Tienda {
            id: 2,
            nombre: "Sucursal Centro".to_string(),
            direccion: "Calle 10 #4-21".to_string(),
        };

        let serialized = serde_json::to_string(&tienda).unwrap();
        let deserialized: Tienda = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, tienda);
    }
}
