//! Cafe Spot application shell using Yew.
//! Wires routing, the navbar, and the injected stores together.

use cafe_spot::config::summary_label;
use cafe_spot::navigation::View;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod hooks;
mod pages;
mod services;

use components::{FavoritesPanel, FilterPanel};
use hooks::use_revision;
use pages::{
    AdminCafesPage, AdminDashboard, CafeDetailPage, CafeListPage, LoginPage, NotFoundPage,
    Protected,
};
use services::{Services, ServicesProps};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/cafes/:id")]
    CafeDetail { id: String },
    #[at("/login")]
    Login,
    #[at("/admin")]
    Admin,
    #[at("/admin/cafes")]
    AdminCafes,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    fn hides_navbar(&self) -> bool {
        matches!(self, Route::Login | Route::Admin | Route::AdminCafes)
    }
}

fn view_for(route: &Route) -> View {
    match route {
        Route::Home => View::List,
        // 404s keep their own URL; only the list view carries the query.
        Route::CafeDetail { .. } | Route::NotFound => View::Detail,
        Route::Login => View::Login,
        Route::Admin | Route::AdminCafes => View::Admin,
    }
}

/// Top navigation bar: search field, filter panel trigger, favorites
/// drawer. All filter interaction goes through the staged copy; only the
/// panel's apply button and the search icon commit anything.
#[function_component(Navbar)]
fn navbar(props: &ServicesProps) -> Html {
    let services = props.services.clone();
    let filters = services.filters.clone();
    let _revision = use_revision(filters.clone());
    let show_favorites = use_state(|| false);

    let staged = filters.staged();

    let on_search_input = {
        let filters = filters.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            filters.stage_query(&input.value());
        })
    };
    let on_search_commit = {
        let filters = filters.clone();
        Callback::from(move |_: MouseEvent| filters.commit_query_only())
    };
    let on_filter_toggle = {
        let filters = filters.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            filters.toggle_panel();
        })
    };
    let on_logo_click = {
        let filters = filters.clone();
        Callback::from(move |_: MouseEvent| filters.reset())
    };
    let on_favorites_toggle = {
        let show_favorites = show_favorites.clone();
        Callback::from(move |_: MouseEvent| show_favorites.set(!*show_favorites))
    };
    let on_favorites_close = {
        let show_favorites = show_favorites.clone();
        Callback::from(move |_: MouseEvent| show_favorites.set(false))
    };

    let filter_label = if staged.summary.is_empty() {
        "필터".to_string()
    } else {
        summary_label(&staged.summary).to_string()
    };

    html! {
        <div class="w-full px-4 sm:px-6 lg:px-8 border-b-2">
            <div class="w-[90%] mx-auto">
                <header class="flex items-center justify-between py-4 px-6">
                    <div onclick={on_logo_click}>
                        <Link<Route> to={Route::Home} classes="flex items-center gap-2">
                            <img src="/logo.png" alt="Cafe Spot Logo" class="w-60 h-30 -ml-12" />
                        </Link<Route>>
                    </div>

                    <div class="relative hidden md:flex items-center gap-2 mx-4 flex-1 justify-center">
                        <div class="relative w-80">
                            <input type="text"
                                placeholder="Search cafes"
                                value={staged.query.clone()}
                                oninput={on_search_input}
                                class="w-full px-4 py-2 text-gray-500 border-b-2 border-[#B37E2E] focus:outline-none placeholder-gray-400" />
                            <span onclick={on_search_commit}
                                class="absolute right-2 top-1/2 transform -translate-y-1/2 text-gray-400 cursor-pointer">
                                <svg xmlns="http://www.w3.org/2000/svg"
                                    viewBox="0 0 24 24"
                                    fill="none"
                                    stroke="currentColor"
                                    stroke-width="2"
                                    class="w-5 h-5">
                                    <circle cx="11" cy="11" r="8" />
                                    <line x1="21" y1="21" x2="16.65" y2="16.65" />
                                </svg>
                            </span>
                        </div>

                        <button onclick={on_filter_toggle}
                            class="flex items-center gap-1 px-4 py-2 border border-primary text-primary rounded-full">
                            { filter_label }
                        </button>

                        <FilterPanel services={services.clone()} />
                    </div>

                    <div class="relative flex items-center gap-4">
                        <button onclick={on_favorites_toggle}
                            class="font-medium bg-secondary text-primary flex items-center gap-1 px-4 py-3 rounded-lg">
                            { "My ♥s List" }
                        </button>
                    </div>
                </header>

                if *show_favorites {
                    <FavoritesPanel services={services.clone()} on_close={on_favorites_close} />
                }
            </div>
        </div>
    }
}

#[function_component(AppShell)]
fn app_shell() -> Html {
    let services = use_memo((), |_| Services::new());
    let services: Rc<Services> = (*services).clone();
    let route = use_route::<Route>().unwrap_or(Route::NotFound);

    // Tell the filter state which view is active; entering the list view
    // restores the persisted criteria into the URL.
    {
        let filters = services.filters.clone();
        use_effect_with(route.clone(), move |route| {
            filters.set_view(view_for(route));
        });
    }

    let render = {
        let services = services.clone();
        move |route: Route| -> Html {
            match route {
                Route::Home => html! { <CafeListPage services={services.clone()} /> },
                Route::CafeDetail { id } => {
                    html! { <CafeDetailPage {id} services={services.clone()} /> }
                }
                Route::Login => html! { <LoginPage services={services.clone()} /> },
                Route::Admin => html! {
                    <Protected services={services.clone()}>
                        <AdminDashboard services={services.clone()} />
                    </Protected>
                },
                Route::AdminCafes => html! {
                    <Protected services={services.clone()}>
                        <AdminCafesPage services={services.clone()} />
                    </Protected>
                },
                Route::NotFound => html! { <NotFoundPage /> },
            }
        }
    };

    html! {
        <div>
            if !route.hides_navbar() {
                <Navbar services={services.clone()} />
            }
            <Switch<Route> render={render} />
        </div>
    }
}

/// App wrapper providing the router context.
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <AppShell />
        </BrowserRouter>
    }
}

/// Entry point: initializes the Yew renderer for the App component.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
