use crate::components::route_guard::RequireSession;
use crate::containers::layout::Layout;
use crate::pages::*;
use strum::EnumIter;
use yew::prelude::*;
use yew_router::prelude::*;

/// The application routes.
#[derive(Debug, Clone, PartialEq, Routable, EnumIter)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/select-store")]
    SelectStore,
    #[at("/dashboard")]
    Dashboard,
    #[at("/clientes")]
    Clientes,
    #[at("/creditos")]
    Creditos,
    #[at("/recaudos")]
    Recaudos,
    #[at("/movimientos")]
    Movimientos,
    #[at("/reportes")]
    Reportes,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Navigation label shown in the header. Routes outside the main menu
    /// return `None`.
    pub fn etiqueta(&self) -> Option<&'static str> {
        match self {
            Route::Dashboard => Some("Inicio"),
            Route::Clientes => Some("Clientes"),
            Route::Creditos => Some("Créditos"),
            Route::Recaudos => Some("Recaudos"),
            Route::Movimientos => Some("Movimientos"),
            Route::Reportes => Some("Reportes"),
            Route::Home | Route::Login | Route::SelectStore | Route::NotFound => None,
        }
    }
}

/// Wrap a protected page in the session guard and the shared layout.
fn protected(route: Route, page: Html) -> Html {
    html! {
        <RequireSession>
            <Layout current_route={route}>
                { page }
            </Layout>
        </RequireSession>
    }
}

/// Switch function for the application routes.
pub fn switch(route: Route) -> Html {
    match route {
        Route::Login => html! { <LoginPage /> },
        Route::SelectStore => html! {
            <RequireSession require_store={false}>
                <SelectStorePage />
            </RequireSession>
        },
        Route::Home => html! { <Redirect<Route> to={Route::Dashboard} /> },
        Route::Dashboard => protected(Route::Dashboard, html! { <DashboardPage /> }),
        Route::Clientes => protected(Route::Clientes, html! { <ClientesPage /> }),
        Route::Creditos => protected(Route::Creditos, html! { <CreditosPage /> }),
        Route::Recaudos => protected(Route::Recaudos, html! { <RecaudosPage /> }),
        Route::Movimientos => protected(Route::Movimientos, html! { <MovimientosPage /> }),
        Route::Reportes => protected(Route::Reportes, html! { <ReportesPage /> }),
        Route::NotFound => html! { <ErrorPage /> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    /// Tests route path definitions against the legacy client's URLs.
    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Login.to_path(), "/login");
        assert_eq!(Route::SelectStore.to_path(), "/select-store");
        assert_eq!(Route::Dashboard.to_path(), "/dashboard");
        assert_eq!(Route::Recaudos.to_path(), "/recaudos");
        assert_eq!(Route::NotFound.to_path(), "/404");
    }

    /// Tests route recognition from paths.
    #[test]
    fn test_route_recognition() {
        assert_eq!(Route::recognize("/login"), Some(Route::Login));
        assert_eq!(Route::recognize("/select-store"), Some(Route::SelectStore));
        assert_eq!(Route::recognize("/clientes"), Some(Route::Clientes));
        assert_eq!(Route::recognize("/"), Some(Route::Home));
        assert_eq!(Route::recognize("/no-such-page"), Some(Route::NotFound));
    }

    /// Tests route equality and cloning.
    #[test]
    fn test_route_equality() {
        let route = Route::Recaudos;
        assert_eq!(route.clone(), Route::Recaudos);
        assert_ne!(Route::Clientes, Route::Creditos);
    }

    /// Tests that exactly the menu routes carry labels.
    #[test]
    fn test_menu_labels() {
        let labeled = Route::iter().filter(|route| route.etiqueta().is_some()).count();
        assert_eq!(labeled, 6);
        assert!(Route::Login.etiqueta().is_none());
        assert_eq!(Route::Recaudos.etiqueta(), Some("Recaudos"));
    }
}
