use crate::routes::{Route, switch};
use crate::session::SessionProvider;
use yew::{Html, function_component, html};
use yew_router::prelude::*;

/// Root component: router outside, session context inside, so the
/// provider can navigate on login and expiry.
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <SessionProvider>
                <Switch<Route> render={switch} />
            </SessionProvider>
        </BrowserRouter>
    }
}
