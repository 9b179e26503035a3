use crate::{api::CarteraClient, session::SessionHandle};
use shared::models::{Cliente, ClienteRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::classes;
use yew::prelude::*;

fn estrellas(calificacion: u8) -> String {
    let llenas = usize::from(calificacion.min(5));
    format!("{}{}", "★".repeat(llenas), "☆".repeat(5 - llenas))
}

#[function_component(ClientesPage)]
pub fn clientes_page() -> Html {
    let session = use_context::<SessionHandle>();
    let clientes = use_state(Vec::<Cliente>::new);
    let error = use_state(|| None::<String>);
    let nombre = use_state(String::new);
    let documento = use_state(String::new);
    let telefono = use_state(String::new);
    let direccion = use_state(String::new);
    let saving = use_state(|| false);

    let tienda_id = session
        .as_ref()
        .and_then(|session| session.selected_store())
        .map(|tienda| tienda.id);

    // Last client the collector was looking at, restored across reloads.
    let resaltado = use_state(|| {
        session
            .as_ref()
            .and_then(|session| session.scratch_read("cliente"))
            .and_then(|raw| raw.parse::<i64>().ok())
    });

    {
        let clientes = clientes.clone();
        let error = error.clone();
        use_effect_with(tienda_id, move |tienda_id| {
            if let Some(tienda_id) = *tienda_id {
                spawn_local(async move {
                    match CarteraClient::shared().list_clientes(tienda_id).await {
                        Ok(list) => clientes.set(list),
                        Err(_) => {
                            error.set(Some("No se pudieron cargar los clientes".to_string()));
                        }
                    }
                });
            }
            || ()
        });
    }

    let onsubmit = {
        let nombre = nombre.clone();
        let documento = documento.clone();
        let telefono = telefono.clone();
        let direccion = direccion.clone();
        let saving = saving.clone();
        let clientes = clientes.clone();
        let error = error.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(tienda_id) = tienda_id else { return };
            let request = ClienteRequest {
                tienda_id,
                nombre: (*nombre).clone(),
                documento: (*documento).clone(),
                telefono: (*telefono).clone(),
                direccion: (*direccion).clone(),
            };
            saving.set(true);
            let saving = saving.clone();
            let clientes = clientes.clone();
            let error = error.clone();
            let nombre = nombre.clone();
            let documento = documento.clone();
            let telefono = telefono.clone();
            let direccion = direccion.clone();
            spawn_local(async move {
                match CarteraClient::shared().create_cliente(&request).await {
                    Ok(nuevo) => {
                        let mut list = (*clientes).clone();
                        list.push(nuevo);
                        clientes.set(list);
                        nombre.set(String::new());
                        documento.set(String::new());
                        telefono.set(String::new());
                        direccion.set(String::new());
                    }
                    Err(_) => error.set(Some("No se pudo registrar el cliente".to_string())),
                }
                saving.set(false);
            });
        })
    };

    let text_input = |label: &'static str, handle: &UseStateHandle<String>| -> Html {
        let handle_setter = handle.clone();
        let oninput = Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                handle_setter.set(input.value());
            }
        });
        html! {
            <div class="form-control">
                <label class="label"><span class="label-text">{ label }</span></label>
                <input class="input input-bordered" type="text" value={(**handle).clone()} {oninput} />
            </div>
        }
    };

    let rows = clientes
        .iter()
        .map(|cliente| {
            let session = session.clone();
            let resaltado_handle = resaltado.clone();
            let cliente_id = cliente.id;
            let onclick = Callback::from(move |_| {
                if let Some(session) = session.as_ref() {
                    session.scratch_write("cliente", &cliente_id.to_string());
                }
                resaltado_handle.set(Some(cliente_id));
            });
            let marked = *resaltado == Some(cliente.id);
            html! {
                <tr class={classes!(marked.then_some("active"))} {onclick}>
                    <td>{ cliente.nombre.clone() }</td>
                    <td>{ cliente.documento.clone() }</td>
                    <td>{ cliente.telefono.clone() }</td>
                    <td>{ cliente.direccion.clone() }</td>
                    <td title={format!("{} de 5", cliente.calificacion())}>
                        { estrellas(cliente.calificacion()) }
                    </td>
                </tr>
            }
        })
        .collect::<Html>();

    html! {
        <div class="p-4 space-y-6">
            <h1 class="text-2xl font-bold">{"Clientes"}</h1>

            if let Some(message) = &*error {
                <div class="alert alert-error"><span>{message.clone()}</span></div>
            }

            <form class="card bg-base-200 p-4 grid grid-cols-1 md:grid-cols-2 gap-4" onsubmit={onsubmit}>
                { text_input("Nombre", &nombre) }
                { text_input("Documento", &documento) }
                { text_input("Teléfono", &telefono) }
                { text_input("Dirección", &direccion) }
                <div class="form-control md:col-span-2">
                    <button
                        class="btn btn-primary"
                        type="submit"
                        disabled={*saving || (*nombre).is_empty() || (*documento).is_empty()}
                    >
                        { if *saving { "Guardando..." } else { "Registrar cliente" } }
                    </button>
                </div>
            </form>

            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>{"Nombre"}</th>
                            <th>{"Documento"}</th>
                            <th>{"Teléfono"}</th>
                            <th>{"Dirección"}</th>
                            <th>{"Calificación"}</th>
                        </tr>
                    </thead>
                    <tbody>{ rows }</tbody>
                </table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::estrellas;

    #[test]
    fn star_strings_match_rating() {
        assert_eq!(estrellas(5), "★★★★★");
        assert_eq!(estrellas(3), "★★★☆☆");
        assert_eq!(estrellas(1), "★☆☆☆☆");
    }
}
