mod clientes;
mod creditos;
mod dashboard;
mod error;
pub mod login;
mod movimientos;
mod recaudos;
mod reportes;
mod select_store;

pub use clientes::ClientesPage;
pub use creditos::CreditosPage;
pub use dashboard::DashboardPage;
pub use error::ErrorPage;
pub use login::LoginPage;
pub use movimientos::MovimientosPage;
pub use recaudos::RecaudosPage;
pub use reportes::ReportesPage;
pub use select_store::SelectStorePage;
