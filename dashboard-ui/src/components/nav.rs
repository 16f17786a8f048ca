//! Navigation Component
//!
//! Header bar with brand, collapsible link menu and theme toggle.

use leptos::*;
use leptos_router::*;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let (menu_open, set_menu_open) = create_signal(false);
    let close_menu = Callback::new(move |_| set_menu_open.set(false));

    let toggle_theme = move |_| {
        web_sys::console::log_1(&"Theme toggle clicked".into());
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"📈"</span>
                        <span class="text-xl font-bold text-white">"Telemetry Dash"</span>
                    </A>

                    <div class="flex items-center space-x-2">
                        // Hamburger (small screens)
                        <button
                            class="hamburger md:hidden px-3 py-2 rounded-lg text-gray-300 hover:bg-gray-700"
                            aria-label="Toggle menu"
                            on:click=move |_| set_menu_open.update(|open| *open = !*open)
                        >
                            "☰"
                        </button>

                        // Navigation links
                        <div class=move || {
                            if menu_open.get() {
                                "nav-menu active flex flex-col md:flex-row md:items-center md:space-x-1"
                            } else {
                                "nav-menu hidden md:flex md:items-center md:space-x-1"
                            }
                        }>
                            <NavLink href="/" label="Dashboard" on_navigate=close_menu />
                            <NavLink href="/settings" label="Settings" on_navigate=close_menu />
                        </div>

                        <button
                            class="theme-toggle px-3 py-2 rounded-lg text-gray-300 hover:bg-gray-700"
                            aria-label="Toggle theme"
                            on:click=toggle_theme
                        >
                            "🌓"
                        </button>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link; following it closes the menu
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
    on_navigate: Callback<()>,
) -> impl IntoView {
    view! {
        <span on:click=move |_| on_navigate.call(())>
            <A
                href=href
                class="nav-link block px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                active_class="bg-gray-700 text-white"
            >
                {label}
            </A>
        </span>
    }
}
