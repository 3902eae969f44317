//! Yew view components for the café directory UI.
//!
//! These render from props and the injected store handles; page-level
//! data fetching lives in `pages`.

use crate::hooks::use_revision;
use crate::services::Services;
use crate::Route;
use cafe_spot::config::SUMMARY_OPTIONS;
use cafe_spot::filter::PanelState;
use cafe_spot::Cafe;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoadingMessage)]
pub fn loading_message() -> Html {
    html! {
        <p class="text-center text-gray-500 mt-8">{ "카페 정보를 불러오는 중..." }</p>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorMessageProps {
    pub message: String,
}

#[function_component(ErrorMessage)]
pub fn error_message(props: &ErrorMessageProps) -> Html {
    html! {
        <p class="text-center text-red-600 mt-8">{ &props.message }</p>
    }
}

#[derive(Properties, PartialEq)]
pub struct CafeCardProps {
    pub cafe: Cafe,
    pub is_favorite: bool,
    pub on_toggle: Callback<String>,
}

/// One café tile in the list grid: photo, name, shortened address, and a
/// heart that toggles membership in the favorite set.
#[function_component(CafeCard)]
pub fn cafe_card(props: &CafeCardProps) -> Html {
    let cafe = &props.cafe;
    let on_heart = {
        let on_toggle = props.on_toggle.clone();
        let id = cafe.id.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_toggle.emit(id.clone());
        })
    };

    html! {
        <div class="flex-col cursor-pointer group flex">
            <div class="aspect-square w-full relative overflow-hidden rounded-xl">
                <Link<Route> to={Route::CafeDetail { id: cafe.id.clone() }}>
                    if let Some(photo) = cafe.photos.first() {
                        <img src={photo.clone()}
                            alt={cafe.name.clone()}
                            loading="lazy"
                            class="object-cover h-full w-full group-hover:scale-110 transition-transform duration-300" />
                    } else {
                        <div class="h-full w-full bg-secondary"></div>
                    }
                </Link<Route>>
            </div>
            <div class="font-semibold text-[15px] flex items-center justify-between">
                <Link<Route> to={Route::CafeDetail { id: cafe.id.clone() }}>
                    <span>{ &cafe.name }</span>
                </Link<Route>>
                <button class="p-1" onclick={on_heart}>
                    { if props.is_favorite { "♥" } else { "♡" } }
                </button>
            </div>
            <div class="text-sm text-gray-500">{ cafe.short_address() }</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CafeListViewProps {
    pub cafes: Vec<Cafe>,
    pub services: Rc<Services>,
}

#[function_component(CafeListView)]
pub fn cafe_list_view(props: &CafeListViewProps) -> Html {
    let favorites = props.services.favorites.clone();
    let _revision = use_revision(favorites.clone());

    let on_toggle = {
        let favorites = favorites.clone();
        Callback::from(move |id: String| favorites.toggle(&id))
    };

    html! {
        <div class="pt-24 grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 xl:grid-cols-5 2xl:grid-cols-6 gap-8">
            { props.cafes.iter().map(|cafe| {
                html! {
                    <CafeCard key={cafe.id.clone()}
                        cafe={cafe.clone()}
                        is_favorite={favorites.is_favorite(&cafe.id)}
                        on_toggle={on_toggle.clone()} />
                }
            }).collect::<Html>() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FilterPanelProps {
    pub services: Rc<Services>,
}

/// The staging panel: summary tag chips plus cancel/apply. Everything it
/// touches is the staged copy; only the apply button commits.
#[function_component(FilterPanel)]
pub fn filter_panel(props: &FilterPanelProps) -> Html {
    let filters = props.services.filters.clone();
    let _revision = use_revision(filters.clone());

    if filters.panel() != PanelState::Staging {
        return html! {};
    }
    let staged = filters.staged();

    let on_cancel = {
        let filters = filters.clone();
        Callback::from(move |_: MouseEvent| filters.dismiss())
    };
    let on_apply = {
        let filters = filters.clone();
        Callback::from(move |_: MouseEvent| filters.apply())
    };
    let on_overlay = {
        let filters = filters.clone();
        Callback::from(move |_: MouseEvent| filters.dismiss())
    };

    html! {
        <>
            // Any interaction outside the panel dismisses without committing.
            <div class="fixed inset-0 z-40" onclick={on_overlay}></div>
            <div class="absolute top-full mt-2 w-auto bg-white rounded-lg shadow-lg p-4 z-50">
                <div class="mb-4">
                    <div class="flex flex-wrap gap-2">
                        { SUMMARY_OPTIONS.iter().map(|(tag, label)| {
                            let selected = staged.summary == *tag;
                            let on_select = {
                                let filters = filters.clone();
                                let tag = tag.to_string();
                                Callback::from(move |_: MouseEvent| filters.stage_summary(&tag))
                            };
                            html! {
                                <button key={*tag}
                                    onclick={on_select}
                                    class={if selected {
                                        "px-4 py-2 rounded-full border bg-primary text-white border-primary-400"
                                    } else {
                                        "px-4 py-2 rounded-full border text-[#D1B282] border-[#D1B282]"
                                    }}>
                                    { label }
                                </button>
                            }
                        }).collect::<Html>() }
                    </div>
                </div>
                <div class="flex justify-end gap-2">
                    <button onclick={on_cancel}
                        class="px-4 py-2 text-gray-600 hover:text-gray-800">
                        { "취소" }
                    </button>
                    <button onclick={on_apply}
                        class="px-4 py-2 bg-primary text-white rounded-md hover:bg-primary-500">
                        { "적용하기" }
                    </button>
                </div>
            </div>
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct FavoritesPanelProps {
    pub services: Rc<Services>,
    pub on_close: Callback<MouseEvent>,
}

/// Slide-in drawer listing favorited cafés. Every change to the favorite
/// set re-resolves the IDs through the detail cache; entries whose fetch
/// fails are simply omitted rather than emptying the drawer.
#[function_component(FavoritesPanel)]
pub fn favorites_panel(props: &FavoritesPanelProps) -> Html {
    let favorites = props.services.favorites.clone();
    let cache = props.services.cache.clone();
    let revision = use_revision(favorites.clone());
    let details = use_state(Vec::<Cafe>::new);

    {
        let favorites = favorites.clone();
        let cache = cache.clone();
        let details = details.clone();
        use_effect_with(revision, move |_| {
            let ids = favorites.ids();
            if ids.is_empty() {
                details.set(Vec::new());
            } else {
                spawn_local(async move {
                    let resolved = cache.resolve_available(&ids).await;
                    details.set(resolved);
                });
            }
        });
    }

    let on_toggle = {
        let favorites = favorites.clone();
        Callback::from(move |e: (MouseEvent, String)| {
            e.0.stop_propagation();
            favorites.toggle(&e.1);
        })
    };

    html! {
        <>
            <div class="fixed inset-0 bg-black bg-opacity-50 z-40 transition-opacity"
                onclick={props.on_close.clone()}></div>
            <div class="fixed top-0 right-0 w-80 h-full bg-[#F8E1C3] shadow-lg z-50 flex flex-col">
                <button class="absolute top-4 right-4 text-[#B37E2E]" onclick={props.on_close.clone()}>
                    { "✕" }
                </button>
                <div class="flex items-center justify-center h-32">
                    <h4 class="text-2xl font-semibold text-[#B37E2E]">{ "My ♥ Likes List" }</h4>
                </div>
                <ul class="flex-1 overflow-y-auto bg-white p-5">
                    { if details.is_empty() {
                        html! { <li class="text-gray-600">{ "No favorites added" }</li> }
                    } else {
                        details.iter().map(|cafe| {
                            let on_heart = {
                                let on_toggle = on_toggle.clone();
                                let id = cafe.id.clone();
                                Callback::from(move |e: MouseEvent| on_toggle.emit((e, id.clone())))
                            };
                            html! {
                                <li key={cafe.id.clone()} class="flex items-center justify-between mb-5">
                                    <Link<Route> to={Route::CafeDetail { id: cafe.id.clone() }}
                                        classes="text-gray-900 font-bold text-lg">
                                        { &cafe.name }
                                    </Link<Route>>
                                    <button class="text-[#B37E2E]" onclick={on_heart}>{ "♥" }</button>
                                </li>
                            }
                        }).collect::<Html>()
                    } }
                </ul>
            </div>
        </>
    }
}
