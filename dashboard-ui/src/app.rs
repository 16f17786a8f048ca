//! App Root Component
//!
//! Main application component with routing and dashboard state.

use leptos::*;
use leptos_router::*;

use crate::components::Nav;
use crate::pages::{Dashboard, Settings};
use crate::state::{provide_dashboard_state, DashboardState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_dashboard_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                // Navigation header
                <Nav />

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Dashboard />
                        <Route path="/settings" view=Settings />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />
            </div>
        </Router>
    }
}

/// Footer showing the endpoint and fetch activity
#[component]
fn Footer() -> impl IntoView {
    let state = expect_context::<DashboardState>();

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                <div class="text-gray-400">
                    {move || state.settings.get().endpoint()}
                </div>

                {move || {
                    if state.loading.get() {
                        view! {
                            <div class="flex items-center space-x-2 text-primary-400">
                                <div class="loading-spinner w-4 h-4" />
                                <span>"Loading..."</span>
                            </div>
                        }.into_view()
                    } else {
                        view! {
                            <div class="text-gray-400">
                                {state.last_updated.get()
                                    .map(|time| format!("Last updated: {}", time))
                                    .unwrap_or_else(|| "Not fetched yet".to_string())}
                            </div>
                        }.into_view()
                    }
                }}
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-6xl font-bold text-gray-600">"404"</h1>
            <p class="text-xl text-gray-400 mt-4">"Page not found"</p>
            <A href="/" class="mt-8 px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors">
                "Back to Dashboard"
            </A>
        </div>
    }
}
