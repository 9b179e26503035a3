use serde::{Deserialize, Serialize};

/// A credit client, including the payment-behavior counters the backend
/// maintains for scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cliente {
    /// Unique identifier for the client.
    pub id: i64,

    /// The store the client belongs to.
    pub tienda_id: i64,

    /// Full name.
    pub nombre: String,

    /// Government identity document number.
    pub documento: String,

    /// Contact phone number.
    pub telefono: String,

    /// Street address used by collectors.
    pub direccion: String,

    /// Credits ever opened for this client.
    pub creditos_totales: u32,

    /// Credits fully paid off.
    pub creditos_pagados: u32,

    /// Installments currently in arrears.
    pub cuotas_atrasadas: u32,

    /// Worst observed arrears, in days.
    pub dias_max_atraso: u32,
}

impl Cliente {
    /// Star rating from 1 to 5 derived from payment behavior.
    ///
    /// Clients with no credit history sit at a neutral 3. Established
    /// clients start at 5 and lose stars for installments in arrears and
    /// for how deep the worst arrears ran, never dropping below 1.
    #[must_use]
    pub fn calificacion(&self) -> u8 {
        if self.creditos_totales == 0 {
            return 3;
        }

        let mut estrellas: i32 = 5;
        if self.cuotas_atrasadas > 0 {
            estrellas -= 1;
        }
        if self.cuotas_atrasadas > 3 {
            estrellas -= 1;
        }
        if self.dias_max_atraso > 15 {
            estrellas -= 1;
        }
        if self.dias_max_atraso > 30 {
            estrellas -= 1;
        }

        estrellas.max(1) as u8
    }
}

/// Request to register a new client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClienteRequest {
    /// The store the client belongs to.
    pub tienda_id: i64,

    /// Full name.
    pub nombre: String,

    /// Government identity document number.
    pub documento: String,

    /// Contact phone number.
    pub telefono: String,

    /// Street address used by collectors.
    pub direccion: String,
}
