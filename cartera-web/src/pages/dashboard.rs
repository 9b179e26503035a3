use crate::{api::CarteraClient, routes::Route, session::SessionHandle};
use shared::models::ResumenFinanciero;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::prelude::Link;

fn pesos(valor: f64) -> String {
    format!("${:.0}", valor)
}

/// Dashboard page component
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let session = use_context::<SessionHandle>();
    let resumen = use_state(|| None::<ResumenFinanciero>);

    let tienda_id = session
        .as_ref()
        .and_then(|session| session.selected_store())
        .map(|tienda| tienda.id);

    {
        let resumen = resumen.clone();
        use_effect_with(tienda_id, move |tienda_id| {
            if let Some(tienda_id) = *tienda_id {
                spawn_local(async move {
                    if let Ok(summary) = CarteraClient::shared().resumen_financiero(tienda_id).await
                    {
                        resumen.set(Some(summary));
                    }
                });
            }
            || ()
        });
    }

    let stats = match &*resumen {
        Some(resumen) => html! {
            <div class="stats shadow w-full">
                <div class="stat">
                    <div class="stat-figure text-primary">
                        <Icon icon_id={IconId::HeroiconsOutlineBanknotes} class="w-8 h-8" />
                    </div>
                    <div class="stat-title">{"Cartera activa"}</div>
                    <div class="stat-value text-primary">{ pesos(resumen.cartera_activa) }</div>
                    <div class="stat-desc">{"Saldo en la calle"}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-secondary">
                        <Icon icon_id={IconId::HeroiconsOutlineUsers} class="w-8 h-8" />
                    </div>
                    <div class="stat-title">{"Clientes activos"}</div>
                    <div class="stat-value text-secondary">{ resumen.clientes_activos }</div>
                    <div class="stat-desc">{"Con crédito vigente"}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-success">
                        <Icon icon_id={IconId::HeroiconsOutlineCurrencyDollar} class="w-8 h-8" />
                    </div>
                    <div class="stat-title">{"Caja"}</div>
                    <div class="stat-value text-success">{ pesos(resumen.caja()) }</div>
                    <div class="stat-desc">{ format!("Recuperación {:.1}%", resumen.porcentaje_recuperacion()) }</div>
                </div>
            </div>
        },
        None => html! { <span class="loading loading-dots loading-md"></span> },
    };

    html! {
        <div class="p-4 space-y-6">
            <h1 class="text-2xl font-bold">{"Panel de control"}</h1>

            { stats }

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                <div class="card bg-base-200 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">
                            <Icon icon_id={IconId::HeroiconsOutlineUsers} class="w-6 h-6" />
                            {"Clientes"}
                        </h2>
                        <p>{"Registre clientes y consulte su calificación de pago."}</p>
                        <div class="card-actions justify-end">
                            <Link<Route> to={Route::Clientes} classes="btn btn-primary">
                                {"Ir a clientes"}
                            </Link<Route>>
                        </div>
                    </div>
                </div>

                <div class="card bg-base-200 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">
                            <Icon icon_id={IconId::HeroiconsOutlineBanknotes} class="w-6 h-6" />
                            {"Recaudos"}
                        </h2>
                        <p>{"Registre los pagos y no-pagos de la ruta del día."}</p>
                        <div class="card-actions justify-end">
                            <Link<Route> to={Route::Recaudos} classes="btn btn-secondary">
                                {"Ir a recaudos"}
                            </Link<Route>>
                        </div>
                    </div>
                </div>

                <div class="card bg-base-200 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">
                            <Icon icon_id={IconId::HeroiconsOutlineChartBar} class="w-6 h-6" />
                            {"Reportes"}
                        </h2>
                        <p>{"Resumen financiero de la tienda seleccionada."}</p>
                        <div class="card-actions justify-end">
                            <Link<Route> to={Route::Reportes} classes="btn btn-outline">
                                {"Ver reportes"}
                            </Link<Route>>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::pesos;

    #[test]
    fn pesos_formats_whole_amounts() {
        assert_eq!(pesos(120_000.0), "$120000");
        assert_eq!(pesos(0.0), "$0");
    }
}
