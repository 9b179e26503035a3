use crate::{api::CarteraClient, session::SessionHandle};
use shared::models::ResumenFinanciero;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

fn fila(titulo: &str, valor: f64) -> Html {
    let tone = if valor < 0.0 { "text-error" } else { "" };
    html! {
        <tr>
            <td>{ titulo.to_string() }</td>
            <td class={tone}>{ format!("${:.0}", valor) }</td>
        </tr>
    }
}

#[function_component(ReportesPage)]
pub fn reportes_page() -> Html {
    let session = use_context::<SessionHandle>();
    let resumen = use_state(|| None::<ResumenFinanciero>);
    let error = use_state(|| None::<String>);

    let tienda_id = session
        .as_ref()
        .and_then(|session| session.selected_store())
        .map(|tienda| tienda.id);

    {
        let resumen = resumen.clone();
        let error = error.clone();
        use_effect_with(tienda_id, move |tienda_id| {
            if let Some(tienda_id) = *tienda_id {
                spawn_local(async move {
                    match CarteraClient::shared().resumen_financiero(tienda_id).await {
                        Ok(summary) => resumen.set(Some(summary)),
                        Err(_) => {
                            error.set(Some("No se pudo cargar el resumen financiero".to_string()));
                        }
                    }
                });
            }
            || ()
        });
    }

    html! {
        <div class="p-4 space-y-6">
            <h1 class="text-2xl font-bold">{"Reportes"}</h1>

            if let Some(message) = &*error {
                <div class="alert alert-error"><span>{message.clone()}</span></div>
            }

            if let Some(resumen) = &*resumen {
                <div class="stats shadow w-full">
                    <div class="stat">
                        <div class="stat-title">{"Utilidad"}</div>
                        <div class={classes!("stat-value", (resumen.utilidad() < 0.0).then_some("text-error"))}>
                            { format!("${:.0}", resumen.utilidad()) }
                        </div>
                        <div class="stat-desc">{"Recaudos menos préstamos y gastos"}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">{"Disponible para retiro"}</div>
                        <div class="stat-value text-success">
                            { format!("${:.0}", resumen.disponible_para_retiro()) }
                        </div>
                        <div class="stat-desc">{ format!("Caja ${:.0}", resumen.caja()) }</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">{"Recuperación"}</div>
                        <div class="stat-value">
                            { format!("{:.1}%", resumen.porcentaje_recuperacion()) }
                        </div>
                        <div class="stat-desc">{ format!("{} clientes activos", resumen.clientes_activos) }</div>
                    </div>
                </div>

                <div class="overflow-x-auto">
                    <table class="table max-w-xl">
                        <thead>
                            <tr>
                                <th>{"Concepto"}</th>
                                <th>{"Valor"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { fila("Total prestado", resumen.total_prestado) }
                            { fila("Total recaudado", resumen.total_recaudado) }
                            { fila("Gastos", resumen.total_gastos) }
                            { fila("Aportes", resumen.total_aportes) }
                            { fila("Retiros", resumen.total_retiros) }
                            { fila("Cartera activa", resumen.cartera_activa) }
                        </tbody>
                    </table>
                </div>
            } else if error.is_none() {
                <span class="loading loading-dots loading-md"></span>
            }
        </div>
    }
}
