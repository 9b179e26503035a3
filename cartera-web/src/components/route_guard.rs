use crate::components::loading::Loading;
use crate::routes::Route;
use crate::session::SessionHandle;
use yew::{function_component, html, use_context, Children, Html, Properties};
use yew_router::prelude::Redirect;

#[derive(Properties, PartialEq)]
pub struct RequireSessionProps {
    pub children: Children,

    /// Protected pages need a selected store; the store-selection page
    /// itself opts out.
    #[prop_or(true)]
    pub require_store: bool,
}

/// Gate for protected views.
///
/// While the session is hydrating nothing is known yet, so a neutral
/// placeholder renders and no redirect happens. Once hydration settles, an
/// unauthenticated visitor goes to the login route, an authenticated one
/// without a selected store goes to store selection, and only then do the
/// children render.
#[function_component(RequireSession)]
pub fn require_session(props: &RequireSessionProps) -> Html {
    let Some(session) = use_context::<SessionHandle>() else {
        // No provider above us; render nothing rather than guess.
        return html! {};
    };

    if session.loading() {
        return html! { <Loading /> };
    }

    if !session.is_authenticated() {
        return html! { <Redirect<Route> to={Route::Login} /> };
    }

    if props.require_store && session.selected_store().is_none() {
        return html! { <Redirect<Route> to={Route::SelectStore} /> };
    }

    html! { <>{ props.children.clone() }</> }
}
