use crate::{api::CarteraClient, routes::Route, session::SessionHandle};
use reqwest::StatusCode;
use shared::models::LoginRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::hooks::use_navigator;
use yew_router::prelude::Redirect;

/// Where an already-authenticated visitor lands: the dashboard once a store
/// is selected, otherwise store selection.
fn destino_autenticado(tiene_tienda: bool) -> Route {
    if tiene_tienda {
        Route::Dashboard
    } else {
        Route::SelectStore
    }
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_context::<SessionHandle>();
    let usuario = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let navigator = use_navigator();

    // Already signed in: nothing to do here.
    if let Some(ref session) = session {
        if !session.loading() && session.is_authenticated() {
            let destino = destino_autenticado(session.selected_store().is_some());
            return html! { <Redirect<Route> to={destino} /> };
        }
    }

    let onsubmit = {
        let usuario_handle = usuario.clone();
        let password_handle = password.clone();
        let error_handle = error.clone();
        let loading_handle = loading.clone();
        let session = session.clone();
        let navigator = navigator;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let usuario_value = (*usuario_handle).clone();
            let password_value = (*password_handle).clone();
            loading_handle.set(true);
            error_handle.set(None);
            let session = session.clone();
            let loading_ref = loading_handle.clone();
            let error_ref = error_handle.clone();
            let navigator_handle = navigator.clone();
            spawn_local(async move {
                let client = CarteraClient::shared();
                let request = LoginRequest {
                    usuario: usuario_value,
                    password: password_value,
                };
                match client.login(&request).await {
                    Ok(response) => {
                        if let Some(session) = session {
                            session.login(response);
                        }
                        if let Some(ref nav) = navigator_handle {
                            nav.push(&Route::SelectStore);
                        }
                    }
                    Err(err) => {
                        let message = err.status().map_or_else(
                            || "No se pudo conectar con el servidor".to_string(),
                            |status| match status {
                                StatusCode::UNAUTHORIZED => {
                                    "Usuario o contraseña incorrectos".to_string()
                                }
                                _ => format!("Error al iniciar sesión: {status}"),
                            },
                        );
                        error_ref.set(Some(message));
                    }
                }
                loading_ref.set(false);
            });
        })
    };

    let on_usuario_change = {
        let usuario = usuario.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                usuario.set(input.value());
            }
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                password.set(input.value());
            }
        })
    };

    let is_busy = *loading;
    let disable_submit = (*usuario).is_empty() || (*password).is_empty() || is_busy;

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" onsubmit={onsubmit}>
                    <h2 class="card-title text-2xl">{"Iniciar sesión"}</h2>
                    if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{message.clone()}</span>
                        </div>
                    }
                    <div class="form-control">
                        <label class="label" for="usuario">
                            <span class="label-text">{"Usuario"}</span>
                        </label>
                        <input
                            id="usuario"
                            class="input input-bordered"
                            type="text"
                            required=true
                            value={(*usuario).clone()}
                            oninput={on_usuario_change}
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{"Contraseña"}</span>
                        </label>
                        <input
                            id="password"
                            class="input input-bordered"
                            type="password"
                            required=true
                            value={(*password).clone()}
                            oninput={on_password_change}
                        />
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={disable_submit}>
                            {if is_busy { "Ingresando..." } else { "Ingresar" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
