use crate::{api::CarteraClient, routes::Route, session::SessionHandle};
use shared::models::Tienda;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::hooks::use_navigator;

#[function_component(SelectStorePage)]
pub fn select_store_page() -> Html {
    let session = use_context::<SessionHandle>();
    let tiendas = use_state(Vec::<Tienda>::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| true);
    let navigator = use_navigator();

    {
        let tiendas = tiendas.clone();
        let error = error.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match CarteraClient::shared().list_tiendas().await {
                    Ok(list) => tiendas.set(list),
                    Err(_) => error.set(Some("No se pudieron cargar las tiendas".to_string())),
                }
                loading.set(false);
            });
            || ()
        });
    }

    let on_retry = {
        let error = error.clone();
        let loading = loading.clone();
        let tiendas = tiendas.clone();
        Callback::from(move |_| {
            let error = error.clone();
            let loading = loading.clone();
            let tiendas = tiendas.clone();
            error.set(None);
            loading.set(true);
            spawn_local(async move {
                match CarteraClient::shared().list_tiendas().await {
                    Ok(list) => tiendas.set(list),
                    Err(_) => error.set(Some("No se pudieron cargar las tiendas".to_string())),
                }
                loading.set(false);
            });
        })
    };

    let on_pick = {
        let session = session.clone();
        let navigator = navigator;
        Callback::from(move |tienda: Tienda| {
            if let Some(session) = session.as_ref() {
                session.select_store(tienda);
            }
            if let Some(ref nav) = navigator {
                nav.push(&Route::Dashboard);
            }
        })
    };

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-lg shadow-lg bg-base-100">
                <div class="card-body">
                    <h2 class="card-title text-2xl">{"Seleccione una tienda"}</h2>
                    if *loading {
                        <span class="loading loading-dots loading-md"></span>
                    } else if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{message.clone()}</span>
                        </div>
                        <button class="btn btn-outline" onclick={on_retry}>{"Reintentar"}</button>
                    } else if tiendas.is_empty() {
                        <p>{"No hay tiendas asignadas a este usuario."}</p>
                    } else {
                        <ul class="menu bg-base-100 w-full">
                            { for tiendas.iter().cloned().map(|tienda| {
                                let on_pick = on_pick.clone();
                                let label = format!("{} · {}", tienda.nombre, tienda.direccion);
                                let onclick = Callback::from(move |_| on_pick.emit(tienda.clone()));
                                html! {
                                    <li>
                                        <button class="justify-start" {onclick}>{ label }</button>
                                    </li>
                                }
                            }) }
                        </ul>
                    }
                </div>
            </div>
        </div>
    }
}
