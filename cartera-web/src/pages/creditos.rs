use crate::{api::CarteraClient, session::SessionHandle};
use chrono::Utc;
use shared::models::{Credito, CreditoRequest, Frecuencia};
use std::str::FromStr;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[function_component(CreditosPage)]
pub fn creditos_page() -> Html {
    let session = use_context::<SessionHandle>();
    let creditos = use_state(Vec::<Credito>::new);
    let error = use_state(|| None::<String>);
    let cliente_id = use_state(String::new);
    let monto = use_state(String::new);
    let interes = use_state(|| "20".to_string());
    let cuotas = use_state(|| "30".to_string());
    let frecuencia = use_state(|| Frecuencia::Diario);
    let saving = use_state(|| false);

    let tienda_id = session
        .as_ref()
        .and_then(|session| session.selected_store())
        .map(|tienda| tienda.id);

    {
        let creditos = creditos.clone();
        let error = error.clone();
        use_effect_with(tienda_id, move |tienda_id| {
            if let Some(tienda_id) = *tienda_id {
                spawn_local(async move {
                    match CarteraClient::shared().list_creditos(tienda_id).await {
                        Ok(list) => creditos.set(list),
                        Err(_) => {
                            error.set(Some("No se pudieron cargar los créditos".to_string()));
                        }
                    }
                });
            }
            || ()
        });
    }

    // Installment preview from the numbers typed so far.
    let vista_previa = {
        let monto = (*monto).parse::<f64>().unwrap_or(0.0);
        let interes = (*interes).parse::<f64>().unwrap_or(0.0);
        let cuotas = (*cuotas).parse::<u32>().unwrap_or(0);
        let total = monto * (1.0 + interes / 100.0);
        let cuota = if cuotas == 0 { total } else { total / f64::from(cuotas) };
        (total, cuota)
    };

    let onsubmit = {
        let cliente_id = cliente_id.clone();
        let monto = monto.clone();
        let interes = interes.clone();
        let cuotas = cuotas.clone();
        let frecuencia = frecuencia.clone();
        let saving = saving.clone();
        let creditos = creditos.clone();
        let error = error.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(tienda_id) = tienda_id else { return };
            let (Ok(cliente_id_value), Ok(monto_value), Ok(interes_value), Ok(cuotas_value)) = (
                (*cliente_id).parse::<i64>(),
                (*monto).parse::<f64>(),
                (*interes).parse::<f64>(),
                (*cuotas).parse::<u32>(),
            ) else {
                error.set(Some("Revise los valores del formulario".to_string()));
                return;
            };
            let request = CreditoRequest {
                cliente_id: cliente_id_value,
                tienda_id,
                monto: monto_value,
                interes: interes_value,
                cuotas: cuotas_value,
                frecuencia: *frecuencia,
                fecha: Utc::now().date_naive(),
            };
            saving.set(true);
            let saving = saving.clone();
            let creditos = creditos.clone();
            let error = error.clone();
            spawn_local(async move {
                match CarteraClient::shared().create_credito(&request).await {
                    Ok(nuevo) => {
                        let mut list = (*creditos).clone();
                        list.push(nuevo);
                        creditos.set(list);
                    }
                    Err(_) => error.set(Some("No se pudo registrar el crédito".to_string())),
                }
                saving.set(false);
            });
        })
    };

    let numeric_input = |label: &'static str, handle: &UseStateHandle<String>| -> Html {
        let handle_setter = handle.clone();
        let oninput = Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                handle_setter.set(input.value());
            }
        });
        html! {
            <div class="form-control">
                <label class="label"><span class="label-text">{ label }</span></label>
                <input class="input input-bordered" type="number" value={(**handle).clone()} {oninput} />
            </div>
        }
    };

    let on_frecuencia_change = {
        let frecuencia = frecuencia.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                if let Ok(parsed) = Frecuencia::from_str(&select.value()) {
                    frecuencia.set(parsed);
                }
            }
        })
    };

    let rows = creditos
        .iter()
        .map(|credito| {
            html! {
                <tr>
                    <td>{ credito.cliente_id }</td>
                    <td>{ format!("${:.0}", credito.monto) }</td>
                    <td>{ format!("{:.1}%", credito.interes) }</td>
                    <td>{ format!("{} × ${:.0}", credito.cuotas, credito.valor_cuota()) }</td>
                    <td>{ format!("${:.0}", credito.saldo) }</td>
                    <td>{ format!("{:.1}%", credito.porcentaje_pagado()) }</td>
                    <td>{ credito.estado.as_str() }</td>
                </tr>
            }
        })
        .collect::<Html>();

    html! {
        <div class="p-4 space-y-6">
            <h1 class="text-2xl font-bold">{"Créditos"}</h1>

            if let Some(message) = &*error {
                <div class="alert alert-error"><span>{message.clone()}</span></div>
            }

            <form class="card bg-base-200 p-4 grid grid-cols-1 md:grid-cols-2 gap-4" onsubmit={onsubmit}>
                { numeric_input("Cliente (id)", &cliente_id) }
                { numeric_input("Monto", &monto) }
                { numeric_input("Interés %", &interes) }
                { numeric_input("Cuotas", &cuotas) }
                <div class="form-control">
                    <label class="label"><span class="label-text">{"Frecuencia"}</span></label>
                    <select class="select select-bordered" onchange={on_frecuencia_change}>
                        { for [Frecuencia::Diario, Frecuencia::Semanal, Frecuencia::Quincenal, Frecuencia::Mensual]
                            .into_iter()
                            .map(|f| html! {
                                <option value={f.as_str()} selected={*frecuencia == f}>{ f.as_str() }</option>
                            }) }
                    </select>
                </div>
                <div class="form-control self-end">
                    <p class="text-sm">
                        { format!("Total a pagar ${:.0} · cuota ${:.0}", vista_previa.0, vista_previa.1) }
                    </p>
                    <button class="btn btn-primary" type="submit" disabled={*saving || (*monto).is_empty()}>
                        { if *saving { "Guardando..." } else { "Registrar crédito" } }
                    </button>
                </div>
            </form>

            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>{"Cliente"}</th>
                            <th>{"Monto"}</th>
                            <th>{"Interés"}</th>
                            <th>{"Cuotas"}</th>
                            <th>{"Saldo"}</th>
                            <th>{"Pagado"}</th>
                            <th>{"Estado"}</th>
                        </tr>
                    </thead>
                    <tbody>{ rows }</tbody>
                </table>
            </div>
        </div>
    }
}
