use crate::{api::CarteraClient, session::SessionHandle};
use chrono::Utc;
use shared::models::{Movimiento, MovimientoRequest, TipoMovimiento};
use std::str::FromStr;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Expenses, capital contributions and profit withdrawals share one ledger.
#[function_component(MovimientosPage)]
pub fn movimientos_page() -> Html {
    let session = use_context::<SessionHandle>();
    let movimientos = use_state(Vec::<Movimiento>::new);
    let error = use_state(|| None::<String>);
    let filtro = use_state(|| None::<TipoMovimiento>);
    let tipo = use_state(|| TipoMovimiento::Gasto);
    let valor = use_state(String::new);
    let descripcion = use_state(String::new);
    let saving = use_state(|| false);

    let tienda_id = session
        .as_ref()
        .and_then(|session| session.selected_store())
        .map(|tienda| tienda.id);

    {
        let movimientos = movimientos.clone();
        let error = error.clone();
        let filtro_value = *filtro;
        use_effect_with((tienda_id, filtro_value), move |(tienda_id, filtro)| {
            if let Some(tienda_id) = *tienda_id {
                let filtro = *filtro;
                spawn_local(async move {
                    match CarteraClient::shared()
                        .list_movimientos(tienda_id, filtro)
                        .await
                    {
                        Ok(list) => movimientos.set(list),
                        Err(_) => {
                            error.set(Some("No se pudieron cargar los movimientos".to_string()));
                        }
                    }
                });
            }
            || ()
        });
    }

    let on_filtro_change = {
        let filtro = filtro.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                filtro.set(TipoMovimiento::from_str(&select.value()).ok());
            }
        })
    };

    let on_tipo_change = {
        let tipo = tipo.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                if let Ok(parsed) = TipoMovimiento::from_str(&select.value()) {
                    tipo.set(parsed);
                }
            }
        })
    };

    let on_valor = {
        let valor = valor.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                valor.set(input.value());
            }
        })
    };

    let on_descripcion = {
        let descripcion = descripcion.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                descripcion.set(input.value());
            }
        })
    };

    let onsubmit = {
        let tipo = tipo.clone();
        let valor = valor.clone();
        let descripcion = descripcion.clone();
        let saving = saving.clone();
        let movimientos = movimientos.clone();
        let error = error.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(tienda_id) = tienda_id else { return };
            let Ok(valor_value) = (*valor).parse::<f64>() else {
                error.set(Some("El valor debe ser numérico".to_string()));
                return;
            };
            let request = MovimientoRequest {
                tienda_id,
                tipo: *tipo,
                valor: valor_value,
                descripcion: (*descripcion).clone(),
                fecha: Utc::now().date_naive(),
            };
            saving.set(true);
            let saving = saving.clone();
            let movimientos = movimientos.clone();
            let error = error.clone();
            let valor = valor.clone();
            let descripcion = descripcion.clone();
            spawn_local(async move {
                match CarteraClient::shared().registrar_movimiento(&request).await {
                    Ok(nuevo) => {
                        let mut list = (*movimientos).clone();
                        list.push(nuevo);
                        movimientos.set(list);
                        valor.set(String::new());
                        descripcion.set(String::new());
                    }
                    Err(_) => error.set(Some("No se pudo registrar el movimiento".to_string())),
                }
                saving.set(false);
            });
        })
    };

    let opciones = [
        TipoMovimiento::Gasto,
        TipoMovimiento::Aporte,
        TipoMovimiento::Retiro,
    ];

    let rows = movimientos
        .iter()
        .map(|movimiento| {
            html! {
                <tr>
                    <td>{ movimiento.fecha.to_string() }</td>
                    <td>{ movimiento.tipo.etiqueta() }</td>
                    <td>{ format!("${:.0}", movimiento.valor) }</td>
                    <td>{ movimiento.descripcion.clone() }</td>
                </tr>
            }
        })
        .collect::<Html>();

    html! {
        <div class="p-4 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{"Movimientos de caja"}</h1>
                <select class="select select-bordered" onchange={on_filtro_change}>
                    <option value="todos" selected={filtro.is_none()}>{"Todos"}</option>
                    { for opciones.into_iter().map(|t| html! {
                        <option value={t.as_str()} selected={*filtro == Some(t)}>{ t.etiqueta() }</option>
                    }) }
                </select>
            </div>

            if let Some(message) = &*error {
                <div class="alert alert-error"><span>{message.clone()}</span></div>
            }

            <form class="card bg-base-200 p-4 grid grid-cols-1 md:grid-cols-4 gap-4" onsubmit={onsubmit}>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"Tipo"}</span></label>
                    <select class="select select-bordered" onchange={on_tipo_change}>
                        { for opciones.into_iter().map(|t| html! {
                            <option value={t.as_str()} selected={*tipo == t}>{ t.etiqueta() }</option>
                        }) }
                    </select>
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"Valor"}</span></label>
                    <input class="input input-bordered" type="number" value={(*valor).clone()} oninput={on_valor} />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"Descripción"}</span></label>
                    <input class="input input-bordered" type="text" value={(*descripcion).clone()} oninput={on_descripcion} />
                </div>
                <div class="form-control self-end">
                    <button class="btn btn-primary" type="submit" disabled={*saving || (*valor).is_empty()}>
                        { if *saving { "Guardando..." } else { "Registrar" } }
                    </button>
                </div>
            </form>

            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>{"Fecha"}</th>
                            <th>{"Tipo"}</th>
                            <th>{"Valor"}</th>
                            <th>{"Descripción"}</th>
                        </tr>
                    </thead>
                    <tbody>{ rows }</tbody>
                </table>
            </div>
        </div>
    }
}
