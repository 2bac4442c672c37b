//! レイアウト（サイドバー + メイン領域）

use leptos::prelude::*;
use pneumoscan_common::{Screen, ViewState};

#[component]
pub fn Layout<FN, FT>(
    state: ReadSignal<ViewState>,
    on_navigate: FN,
    on_toggle_role: FT,
    children: Children,
) -> impl IntoView
where
    FN: Fn(Screen) + 'static + Clone + Send,
    FT: Fn(()) + 'static + Clone + Send,
{
    let (menu_open, set_menu_open) = signal(false);

    let nav = move || {
        let on_navigate = on_navigate.clone();
        state.with(|s| {
            let active = s.active_screen();
            s.nav_items()
                .into_iter()
                .map(|screen| {
                    let on_navigate = on_navigate.clone();
                    let class = if screen == active { "nav-item active" } else { "nav-item" };
                    let section = match screen {
                        Screen::Dashboard => Some("Clinical"),
                        Screen::Admin => Some("Management"),
                        _ => None,
                    };
                    view! {
                        {section.map(|label| view! { <div class="nav-section">{label}</div> })}
                        <button
                            class=class
                            on:click=move |_| {
                                on_navigate(screen);
                                set_menu_open.set(false);
                            }
                        >
                            {screen.label()}
                        </button>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div class="layout">
            <div class="mobile-header">
                <span class="brand">"PneumoScan AI"</span>
                <button class="menu-toggle" on:click=move |_| set_menu_open.update(|open| *open = !*open)>
                    "☰"
                </button>
            </div>

            <aside class=move || if menu_open.get() { "sidebar open" } else { "sidebar" }>
                <div class="sidebar-brand">"PneumoScan AI"</div>

                <nav class="sidebar-nav">{nav}</nav>

                <div class="sidebar-footer">
                    <div class="user-card">
                        <p class="user-name">"Dr. Sarah Jenning"</p>
                        <p class="user-role">{move || state.with(|s| s.role().as_str())}</p>
                    </div>
                    <button class="role-switch" on:click=move |_| on_toggle_role(())>
                        {move || state.with(|s| s.role_switch_label())}
                    </button>
                    <button class="sign-out">"Sign Out"</button>
                </div>
            </aside>

            <main class="main">
                <div class="content">{children()}</div>
            </main>

            <Show when=move || menu_open.get()>
                <div class="menu-overlay" on:click=move |_| set_menu_open.set(false) />
            </Show>
        </div>
    }
}
