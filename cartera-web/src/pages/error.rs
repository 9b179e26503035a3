use crate::routes::Route;
use yew::{Html, function_component, html};
use yew_router::prelude::Link;

/// `ErrorPage` page component
#[function_component(ErrorPage)]
pub fn error_page() -> Html {
    html! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md space-y-4">
                    <h1 class="text-5xl font-bold">{"404"}</h1>
                    <p>{"La página que busca no existe."}</p>
                    <Link<Route> to={Route::Home} classes="btn btn-primary">
                        {"Volver al inicio"}
                    </Link<Route>>
                </div>
            </div>
        </div>
    }
}
