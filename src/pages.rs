//! Page-level components: per-route data fetching and rendering.

use crate::components::{CafeListView, ErrorMessage, LoadingMessage};
use crate::hooks::use_revision;
use crate::services::ServicesProps;
use crate::Route;
use cafe_spot::filter::FilterCriteria;
use cafe_spot::Cafe;
use log::warn;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

const LIST_FETCH_FAILED: &str =
    "카페 정보를 불러오는 데 실패했습니다. 잠시 후 다시 시도해 주세요.";

/// Root list view. Fetches with the *applied* criteria and re-fetches
/// only when they change; staged edits never reach this effect.
#[function_component(CafeListPage)]
pub fn cafe_list_page(props: &ServicesProps) -> Html {
    let services = props.services.clone();
    let _revision = use_revision(services.filters.clone());

    let cafes = use_state(Vec::<Cafe>::new);
    let is_loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    let applied = services.filters.applied();
    {
        let api = services.api.clone();
        let cafes = cafes.clone();
        let is_loading = is_loading.clone();
        let error = error.clone();
        use_effect_with(applied, move |criteria: &FilterCriteria| {
            let criteria = criteria.clone();
            is_loading.set(true);
            error.set(None);
            spawn_local(async move {
                match api.list_cafes(&criteria).await {
                    Ok(mut list) => {
                        // Newest listings first.
                        list.reverse();
                        cafes.set(list);
                    }
                    Err(err) => {
                        warn!("failed to fetch cafes: {}", err);
                        error.set(Some(LIST_FETCH_FAILED.to_string()));
                    }
                }
                is_loading.set(false);
            });
        });
    }

    html! {
        <div class="w-[90%] mx-auto">
            if *is_loading {
                <LoadingMessage />
            } else if let Some(message) = (*error).clone() {
                <ErrorMessage {message} />
            } else if cafes.is_empty() {
                <p class="text-center text-gray-500 mt-2">{ "카페 정보가 없습니다" }</p>
            } else {
                <CafeListView cafes={(*cafes).clone()} services={services.clone()} />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CafeDetailProps {
    pub id: String,
    pub services: Rc<crate::services::Services>,
}

#[function_component(CafeDetailPage)]
pub fn cafe_detail_page(props: &CafeDetailProps) -> Html {
    let services = props.services.clone();
    let favorites = services.favorites.clone();
    let _revision = use_revision(favorites.clone());

    let cafe = use_state(|| None::<Cafe>);
    let error = use_state(|| None::<String>);

    {
        let api = services.api.clone();
        let cafe = cafe.clone();
        let error = error.clone();
        use_effect_with(props.id.clone(), move |id: &String| {
            let id = id.clone();
            spawn_local(async move {
                match api.fetch_cafe_by_id(&id).await {
                    Ok(found) => cafe.set(Some(found)),
                    Err(err) => {
                        warn!("failed to fetch cafe {}: {}", id, err);
                        error.set(Some(LIST_FETCH_FAILED.to_string()));
                    }
                }
            });
        });
    }

    let Some(cafe) = (*cafe).clone() else {
        return match (*error).clone() {
            Some(message) => html! { <ErrorMessage {message} /> },
            None => html! { <LoadingMessage /> },
        };
    };

    let on_heart = {
        let favorites = favorites.clone();
        let id = cafe.id.clone();
        Callback::from(move |_: MouseEvent| favorites.toggle(&id))
    };

    html! {
        <div class="max-w-screen-xl mx-auto p-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-semibold text-darkBrown">{ &cafe.name }</h1>
                <button class="p-2 text-[#B37E2E]" onclick={on_heart}>
                    { if favorites.is_favorite(&cafe.id) { "♥" } else { "♡" } }
                </button>
            </div>
            <p class="text-gray-700 mt-2">{ &cafe.address }</p>
            <p class="text-gray-600 mt-6 whitespace-pre-line">{ &cafe.description }</p>
            <div class="flex gap-4 mt-6 overflow-x-auto">
                { cafe.photos.iter().map(|photo| html! {
                    <img key={photo.clone()} src={photo.clone()} alt={cafe.name.clone()}
                        class="h-64 rounded-lg object-cover" />
                }).collect::<Html>() }
            </div>
        </div>
    }
}

#[function_component(LoginPage)]
pub fn login_page(props: &ServicesProps) -> Html {
    let services = props.services.clone();
    let navigator = use_navigator().expect("LoginPage is rendered inside the router");

    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let checking = use_state(|| true);

    // An already-authenticated admin skips the form.
    {
        let api = services.api.clone();
        let navigator = navigator.clone();
        let checking = checking.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api.check_auth().await {
                    Ok(true) => navigator.push(&Route::Admin),
                    _ => checking.set(false),
                }
            });
        });
    }

    let on_username = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let api = services.api.clone();
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let username = (*username).clone();
            let password = (*password).clone();
            let error = error.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match api.login(&username, &password).await {
                    Ok(true) => {
                        error.set(None);
                        navigator.push(&Route::Admin);
                    }
                    Ok(false) => {
                        error.set(Some(
                            "권한이 없습니다. 자격 증명을 확인해 주세요.".to_string(),
                        ));
                    }
                    Err(_) => {
                        error.set(Some(
                            "자격 증명이 잘못되었습니다. 다시 시도해 주세요.".to_string(),
                        ));
                    }
                }
            });
        })
    };

    if *checking {
        return html! {
            <div class="flex items-center justify-center min-h-screen">
                <div class="loader">{ "로딩 중..." }</div>
            </div>
        };
    }

    html! {
        <div class="bg-gray-100 min-h-screen flex items-center justify-center p-6">
            <div class="w-full max-w-lg bg-white rounded-lg shadow-lg p-8 md:p-12">
                <h1 class="text-3xl font-semibold text-center text-darkBrown mb-6">
                    { "관리자 로그인" }
                </h1>
                if let Some(message) = (*error).clone() {
                    <p class="text-red-600 text-center mb-6">{ message }</p>
                }
                <form class="flex flex-col gap-6" onsubmit={on_submit}>
                    <input type="text"
                        placeholder="사용자 이름"
                        value={(*username).clone()}
                        oninput={on_username}
                        class="w-full p-4 border rounded-lg focus:outline-none" />
                    <input type="password"
                        placeholder="비밀번호"
                        value={(*password).clone()}
                        oninput={on_password}
                        class="w-full p-4 border rounded-lg focus:outline-none" />
                    <button type="submit"
                        class="w-full py-3 bg-secondary text-primary rounded-lg font-semibold">
                        { "로그인" }
                    </button>
                </form>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProtectedProps {
    pub services: Rc<crate::services::Services>,
    pub children: Children,
}

/// Auth gate for admin routes: verifies the session once on mount, shows
/// a loading state meanwhile, and redirects to login on failure.
#[function_component(Protected)]
pub fn protected(props: &ProtectedProps) -> Html {
    let authenticated = use_state(|| None::<bool>);

    {
        let api = props.services.api.clone();
        let authenticated = authenticated.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let ok = api.check_auth().await.unwrap_or(false);
                authenticated.set(Some(ok));
            });
        });
    }

    match *authenticated {
        None => html! { <p>{ "로딩 중..." }</p> },
        Some(false) => html! { <Redirect<Route> to={Route::Login} /> },
        Some(true) => html! { <>{ props.children.clone() }</> },
    }
}

#[function_component(AdminDashboard)]
pub fn admin_dashboard(props: &ServicesProps) -> Html {
    let services = props.services.clone();
    let cafe_count = use_state(|| None::<usize>);
    let error = use_state(|| None::<String>);

    {
        let api = services.api.clone();
        let cafe_count = cafe_count.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api.list_cafes(&FilterCriteria::default()).await {
                    Ok(list) => cafe_count.set(Some(list.len())),
                    Err(err) => {
                        warn!("failed to count cafes: {}", err);
                        error.set(Some(LIST_FETCH_FAILED.to_string()));
                    }
                }
            });
        });
    }

    html! {
        <div class="bg-gray-100 min-h-screen flex items-center justify-center p-6">
            <div class="w-full max-w-lg bg-white rounded-lg shadow-lg p-8 md:p-12">
                <h1 class="text-3xl font-semibold text-center text-darkBrown mb-6">
                    { "관리자 대시보드" }
                </h1>
                if let Some(message) = (*error).clone() {
                    <p class="text-center text-red-600 mb-6">{ message }</p>
                } else {
                    <div class="text-center mb-6">
                        <p class="text-lg font-bold text-gray-800">
                            { "전체 카페 수: " }
                            <span class="text-2xl font-semibold">
                                { cafe_count.map_or("N/A".to_string(), |count| count.to_string()) }
                            </span>
                        </p>
                    </div>
                }
                <div class="flex flex-col gap-4">
                    <Link<Route> to={Route::AdminCafes}
                        classes="w-full py-3 bg-secondary text-primary text-center rounded-lg font-semibold">
                        { "카페 관리" }
                    </Link<Route>>
                </div>
            </div>
        </div>
    }
}

#[function_component(AdminCafesPage)]
pub fn admin_cafes_page(props: &ServicesProps) -> Html {
    let services = props.services.clone();
    let cafes = use_state(Vec::<Cafe>::new);
    let is_loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    {
        let api = services.api.clone();
        let cafes = cafes.clone();
        let is_loading = is_loading.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api.list_cafes(&FilterCriteria::default()).await {
                    Ok(mut list) => {
                        // Latest additions first.
                        list.sort_by_key(|cafe| {
                            std::cmp::Reverse(cafe.id.parse::<i64>().unwrap_or(0))
                        });
                        cafes.set(list);
                    }
                    Err(err) => {
                        warn!("failed to fetch cafes for admin: {}", err);
                        error.set(Some(LIST_FETCH_FAILED.to_string()));
                    }
                }
                is_loading.set(false);
            });
        });
    }

    let on_delete = {
        let api = services.api.clone();
        let cafes = cafes.clone();
        Callback::from(move |id: String| {
            let confirmed = gloo_utils::window()
                .confirm_with_message("정말 이 카페를 삭제하시겠습니까?")
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let api = api.clone();
            let cafes = cafes.clone();
            spawn_local(async move {
                match api.delete_cafe(&id).await {
                    Ok(()) => {
                        let remaining: Vec<Cafe> = cafes
                            .iter()
                            .filter(|cafe| cafe.id != id)
                            .cloned()
                            .collect();
                        cafes.set(remaining);
                    }
                    Err(err) => {
                        warn!("failed to delete cafe {}: {}", id, err);
                        let _ = gloo_utils::window()
                            .alert_with_message("카페 삭제에 실패했습니다. 다시 시도해 주세요.");
                    }
                }
            });
        })
    };

    if *is_loading {
        return html! { <div class="loader">{ "로딩 중..." }</div> };
    }
    if let Some(message) = (*error).clone() {
        return html! { <ErrorMessage {message} /> };
    }

    html! {
        <div class="bg-gray-100 min-h-screen flex items-center justify-center p-6">
            <div class="w-full max-w-3xl bg-white rounded-lg shadow-md p-8">
                <h1 class="text-2xl font-semibold text-darkBrown text-center mb-6">
                    { "카페 관리" }
                </h1>
                <div class="flex flex-col gap-4">
                    { cafes.iter().map(|cafe| {
                        let on_click = {
                            let on_delete = on_delete.clone();
                            let id = cafe.id.clone();
                            Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
                        };
                        let summary = if cafe.description.chars().count() > 100 {
                            let cut: String = cafe.description.chars().take(100).collect();
                            format!("{}...", cut)
                        } else {
                            cafe.description.clone()
                        };
                        html! {
                            <div key={cafe.id.clone()}
                                class="p-4 border border-gray-200 rounded-md flex justify-between items-center bg-white shadow-sm">
                                <div>
                                    <h3 class="text-lg font-medium text-darkBrown">{ &cafe.name }</h3>
                                    <p class="text-gray-700">{ &cafe.address }</p>
                                    <p class="text-gray-400 text-sm">{ summary }</p>
                                </div>
                                <button onclick={on_click}
                                    class="px-4 py-2 bg-secondary text-primary rounded-md text-sm font-medium">
                                    { "삭제" }
                                </button>
                            </div>
                        }
                    }).collect::<Html>() }
                </div>
            </div>
        </div>
    }
}

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center min-h-screen gap-4">
            <h1 class="text-4xl font-semibold text-darkBrown">{ "404" }</h1>
            <p class="text-gray-600">{ "페이지를 찾을 수 없습니다" }</p>
            <Link<Route> to={Route::Home} classes="text-primary underline">
                { "홈으로 돌아가기" }
            </Link<Route>>
        </div>
    }
}
