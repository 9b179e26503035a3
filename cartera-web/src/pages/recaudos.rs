use crate::{api::CarteraClient, session::SessionHandle};
use chrono::{NaiveDate, Utc};
use futures::join;
use shared::models::{AbonoDraft, Credito, EstadoCredito, NoPagoDraft, NoPagoRequest, Recaudo, RecaudoRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

fn draft_to_json<T: serde::Serialize>(draft: &T) -> Option<String> {
    serde_json::to_string(draft).ok()
}

#[function_component(RecaudosPage)]
pub fn recaudos_page() -> Html {
    let session = use_context::<SessionHandle>();
    let creditos = use_state(Vec::<Credito>::new);
    let recaudos = use_state(Vec::<Recaudo>::new);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let tienda_id = session
        .as_ref()
        .and_then(|session| session.selected_store())
        .map(|tienda| tienda.id);

    // Settlement date filter, remembered across reloads.
    let fecha = use_state(|| {
        session
            .as_ref()
            .and_then(|session| session.scratch_read("liquidarFecha"))
            .and_then(|raw| raw.parse::<NaiveDate>().ok())
            .unwrap_or_else(|| Utc::now().date_naive())
    });

    // In-progress entries survive a mid-route reload.
    let abono = use_state(|| {
        session
            .as_ref()
            .and_then(|session| session.scratch_read("abono"))
            .and_then(|raw| serde_json::from_str::<AbonoDraft>(&raw).ok())
            .unwrap_or(AbonoDraft {
                credito_id: 0,
                valor: 0.0,
            })
    });
    let no_pago = use_state(|| {
        session
            .as_ref()
            .and_then(|session| session.scratch_read("noPago"))
            .and_then(|raw| serde_json::from_str::<NoPagoDraft>(&raw).ok())
            .unwrap_or(NoPagoDraft {
                credito_id: 0,
                motivo: String::new(),
            })
    });

    {
        let creditos = creditos.clone();
        let recaudos = recaudos.clone();
        let error = error.clone();
        let fecha_value = *fecha;
        use_effect_with((tienda_id, fecha_value), move |(tienda_id, fecha)| {
            if let Some(tienda_id) = *tienda_id {
                let fecha = *fecha;
                spawn_local(async move {
                    let client = CarteraClient::shared();
                    let (creditos_result, recaudos_result) = join!(
                        client.list_creditos(tienda_id),
                        client.list_recaudos(tienda_id, fecha)
                    );
                    match (creditos_result, recaudos_result) {
                        (Ok(credito_list), Ok(recaudo_list)) => {
                            creditos.set(credito_list);
                            recaudos.set(recaudo_list);
                        }
                        _ => error.set(Some("No se pudo cargar la ruta del día".to_string())),
                    }
                });
            }
            || ()
        });
    }

    let on_fecha_change = {
        let fecha = fecha.clone();
        let session = session.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                if let Ok(parsed) = input.value().parse::<NaiveDate>() {
                    if let Some(session) = session.as_ref() {
                        session.scratch_write("liquidarFecha", &parsed.to_string());
                    }
                    fecha.set(parsed);
                }
            }
        })
    };

    let on_abono_credito = {
        let abono = abono.clone();
        let session = session.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                let draft = AbonoDraft {
                    credito_id: input.value().parse().unwrap_or(0),
                    valor: abono.valor,
                };
                if let (Some(session), Some(json)) = (session.as_ref(), draft_to_json(&draft)) {
                    session.scratch_write("abono", &json);
                }
                abono.set(draft);
            }
        })
    };

    let on_abono_valor = {
        let abono = abono.clone();
        let session = session.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                let draft = AbonoDraft {
                    credito_id: abono.credito_id,
                    valor: input.value().parse().unwrap_or(0.0),
                };
                if let (Some(session), Some(json)) = (session.as_ref(), draft_to_json(&draft)) {
                    session.scratch_write("abono", &json);
                }
                abono.set(draft);
            }
        })
    };

    let on_abono_submit = {
        let abono = abono.clone();
        let session = session.clone();
        let recaudos = recaudos.clone();
        let error = error.clone();
        let saving = saving.clone();
        let fecha = fecha.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let request = RecaudoRequest {
                credito_id: abono.credito_id,
                valor: abono.valor,
                fecha: *fecha,
            };
            saving.set(true);
            let abono = abono.clone();
            let session = session.clone();
            let recaudos = recaudos.clone();
            let error = error.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match CarteraClient::shared().registrar_recaudo(&request).await {
                    Ok(nuevo) => {
                        let mut list = (*recaudos).clone();
                        list.push(nuevo);
                        recaudos.set(list);
                        if let Some(session) = session.as_ref() {
                            session.scratch_delete("abono");
                        }
                        abono.set(AbonoDraft {
                            credito_id: 0,
                            valor: 0.0,
                        });
                    }
                    Err(_) => error.set(Some("No se pudo registrar el abono".to_string())),
                }
                saving.set(false);
            });
        })
    };

    let on_no_pago_credito = {
        let no_pago = no_pago.clone();
        let session = session.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                let draft = NoPagoDraft {
                    credito_id: input.value().parse().unwrap_or(0),
                    motivo: no_pago.motivo.clone(),
                };
                if let (Some(session), Some(json)) = (session.as_ref(), draft_to_json(&draft)) {
                    session.scratch_write("noPago", &json);
                }
                no_pago.set(draft);
            }
        })
    };

    let on_no_pago_motivo = {
        let no_pago = no_pago.clone();
        let session = session.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                let draft = NoPagoDraft {
                    credito_id: no_pago.credito_id,
                    motivo: input.value(),
                };
                if let (Some(session), Some(json)) = (session.as_ref(), draft_to_json(&draft)) {
                    session.scratch_write("noPago", &json);
                }
                no_pago.set(draft);
            }
        })
    };

    let on_no_pago_submit = {
        let no_pago = no_pago.clone();
        let session = session.clone();
        let error = error.clone();
        let saving = saving.clone();
        let fecha = fecha.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let request = NoPagoRequest {
                credito_id: no_pago.credito_id,
                motivo: no_pago.motivo.clone(),
                fecha: *fecha,
            };
            saving.set(true);
            let no_pago = no_pago.clone();
            let session = session.clone();
            let error = error.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match CarteraClient::shared().registrar_no_pago(&request).await {
                    Ok(()) => {
                        if let Some(session) = session.as_ref() {
                            session.scratch_delete("noPago");
                        }
                        no_pago.set(NoPagoDraft {
                            credito_id: 0,
                            motivo: String::new(),
                        });
                    }
                    Err(_) => error.set(Some("No se pudo registrar el no-pago".to_string())),
                }
                saving.set(false);
            });
        })
    };

    let total_dia: f64 = recaudos.iter().map(|recaudo| recaudo.valor).sum();

    let activos = creditos
        .iter()
        .filter(|credito| credito.estado == EstadoCredito::Activo)
        .map(|credito| {
            html! {
                <tr>
                    <td>{ credito.id }</td>
                    <td>{ credito.cliente_id }</td>
                    <td>{ format!("${:.0}", credito.valor_cuota()) }</td>
                    <td>{ format!("${:.0}", credito.saldo) }</td>
                </tr>
            }
        })
        .collect::<Html>();

    html! {
        <div class="p-4 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{"Recaudos del día"}</h1>
                <input
                    class="input input-bordered"
                    type="date"
                    value={fecha.to_string()}
                    oninput={on_fecha_change}
                />
            </div>

            if let Some(message) = &*error {
                <div class="alert alert-error"><span>{message.clone()}</span></div>
            }

            <div class="stats shadow">
                <div class="stat">
                    <div class="stat-title">{"Recaudado"}</div>
                    <div class="stat-value">{ format!("${:.0}", total_dia) }</div>
                    <div class="stat-desc">{ format!("{} pagos", recaudos.len()) }</div>
                </div>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <form class="card bg-base-200 p-4 space-y-2" onsubmit={on_abono_submit}>
                    <h2 class="font-bold">{"Registrar abono"}</h2>
                    <input
                        class="input input-bordered"
                        type="number"
                        placeholder="Crédito (id)"
                        value={abono.credito_id.to_string()}
                        oninput={on_abono_credito}
                    />
                    <input
                        class="input input-bordered"
                        type="number"
                        placeholder="Valor"
                        value={abono.valor.to_string()}
                        oninput={on_abono_valor}
                    />
                    <button
                        class="btn btn-primary"
                        type="submit"
                        disabled={*saving || abono.credito_id == 0 || abono.valor <= 0.0}
                    >
                        {"Abonar"}
                    </button>
                </form>

                <form class="card bg-base-200 p-4 space-y-2" onsubmit={on_no_pago_submit}>
                    <h2 class="font-bold">{"Registrar no-pago"}</h2>
                    <input
                        class="input input-bordered"
                        type="number"
                        placeholder="Crédito (id)"
                        value={no_pago.credito_id.to_string()}
                        oninput={on_no_pago_credito}
                    />
                    <input
                        class="input input-bordered"
                        type="text"
                        placeholder="Motivo"
                        value={no_pago.motivo.clone()}
                        oninput={on_no_pago_motivo}
                    />
                    <button
                        class="btn btn-secondary"
                        type="submit"
                        disabled={*saving || no_pago.credito_id == 0 || no_pago.motivo.is_empty()}
                    >
                        {"Registrar"}
                    </button>
                </form>
            </div>

            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>{"Crédito"}</th>
                            <th>{"Cliente"}</th>
                            <th>{"Cuota"}</th>
                            <th>{"Saldo"}</th>
                        </tr>
                    </thead>
                    <tbody>{ activos }</tbody>
                </table>
            </div>
        </div>
    }
}
