pub mod auth;
pub mod cliente;
pub mod credito;
pub mod movimiento;
pub mod recaudo;
pub mod reporte;
pub mod tienda;

pub use auth::{LoginRequest, LoginResponse, Perfil, RolUsuario, Usuario};
pub use cliente::{Cliente, ClienteRequest};
pub use credito::{Credito, CreditoRequest, EstadoCredito, Frecuencia};
pub use movimiento::{Movimiento, MovimientoRequest, TipoMovimiento};
pub use recaudo::{AbonoDraft, NoPagoDraft, NoPagoRequest, Recaudo, RecaudoRequest};
pub use reporte::ResumenFinanciero;
pub use tienda::Tienda;
