use crate::routes::Route;
use crate::session::SessionHandle;
use strum::IntoEnumIterator;
use yew::{classes, function_component, html, use_context, Callback, Html, Properties};
use yew_icons::{Icon, IconId};
use yew_router::prelude::Link;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    #[prop_or_default]
    pub current_route: Option<Route>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let session = use_context::<SessionHandle>();

    let nav_items = Route::iter()
        .filter_map(|route| route.etiqueta().map(|label| (route, label)))
        .map(|(route, label)| {
            let active = props.current_route.as_ref() == Some(&route);
            html! {
                <li>
                    <Link<Route> to={route} classes={classes!(active.then_some("active"))}>
                        { label }
                    </Link<Route>>
                </li>
            }
        })
        .collect::<Html>();

    let (user_name, store_name) = match session.as_ref() {
        Some(session) => (
            session.user().map(|user| user.nombre),
            session.selected_store().map(|tienda| tienda.nombre),
        ),
        None => (None, None),
    };

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_| {
            if let Some(session) = session.as_ref() {
                session.logout();
            }
        })
    };

    html! {
        <div class="navbar bg-base-200 shadow-sm">
            <div class="navbar-start">
                <span class="text-lg font-bold px-2">{"Cartera Financiera"}</span>
            </div>
            <div class="navbar-center hidden lg:flex">
                <ul class="menu menu-horizontal px-1">
                    { nav_items }
                </ul>
            </div>
            <div class="navbar-end gap-2">
                if let Some(store) = store_name {
                    <span class="badge badge-outline">
                        <Icon icon_id={IconId::HeroiconsOutlineBuildingStorefront} class="w-4 h-4" />
                        { store }
                    </span>
                }
                if let Some(name) = user_name {
                    <span class="text-sm">{ name }</span>
                }
                <button class="btn btn-ghost btn-sm" onclick={on_logout}>
                    <Icon icon_id={IconId::HeroiconsOutlineArrowRightOnRectangle} class="w-4 h-4" />
                    {"Salir"}
                </button>
            </div>
        </div>
    }
}
