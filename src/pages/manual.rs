//! Manual Actions Page
//!
//! Direct report, search and claim forms that talk to the backend
//! without the assistant. The shell currently routes everything
//! through the chat view and does not mount this page.

use leptos::*;

use crate::api;
use crate::components::ListSkeleton;
use crate::state::global::FoundItem;

/// Which form the page is showing
#[derive(Clone, Copy, PartialEq, Eq)]
enum FormView {
    Dashboard,
    Report,
    Search,
    Claim,
}

/// Inline form feedback, colored by kind
#[derive(Clone, PartialEq)]
enum Feedback {
    Success(String),
    Error(String),
    Info(String),
}

impl Feedback {
    fn text(&self) -> &str {
        match self {
            Feedback::Success(t) | Feedback::Error(t) | Feedback::Info(t) => t,
        }
    }

    fn class(&self) -> &'static str {
        match self {
            Feedback::Success(_) => "bg-green-900/50 text-green-300 border border-green-700",
            Feedback::Error(_) => "bg-red-900/50 text-red-300 border border-red-700",
            Feedback::Info(_) => "bg-blue-900/50 text-blue-300 border border-blue-700",
        }
    }
}

const NOT_AUTHENTICATED: &str = "Error: Not authenticated. Please log in.";

/// Manual report/search/claim flows, one form at a time
#[component]
pub fn ManualActions() -> impl IntoView {
    let (form_view, set_form_view) = create_signal(FormView::Dashboard);
    let (claim_item_id, set_claim_item_id) = create_signal(String::new());

    view! {
        <div class="max-w-3xl mx-auto">
            {move || match form_view.get() {
                FormView::Dashboard => view! {
                    <ActionDashboard
                        on_report=move || set_form_view.set(FormView::Report)
                        on_search=move || set_form_view.set(FormView::Search)
                        on_claim=move || {
                            set_claim_item_id.set(String::new());
                            set_form_view.set(FormView::Claim);
                        }
                    />
                }
                .into_view(),
                FormView::Report => view! {
                    <ReportForm on_back=move || set_form_view.set(FormView::Dashboard) />
                }
                .into_view(),
                FormView::Search => view! {
                    <SearchForm
                        on_back=move || set_form_view.set(FormView::Dashboard)
                        on_claim=move |item_id| {
                            set_claim_item_id.set(item_id);
                            set_form_view.set(FormView::Claim);
                        }
                    />
                }
                .into_view(),
                FormView::Claim => view! {
                    <ClaimForm
                        prefilled_id=claim_item_id.get()
                        on_back=move || {
                            set_claim_item_id.set(String::new());
                            set_form_view.set(FormView::Dashboard);
                        }
                    />
                }
                .into_view(),
            }}
        </div>
    }
}

/// Landing view with one card per manual action
#[component]
fn ActionDashboard(
    on_report: impl Fn() + 'static,
    on_search: impl Fn() + 'static,
    on_claim: impl Fn() + 'static,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-2xl font-bold mb-2">"What Manual Action Do You Need?"</h2>
            <p class="text-gray-400 mb-6">
                "Use these forms for direct database interaction without the AI Assistant."
            </p>
            <div class="grid gap-4 md:grid-cols-3">
                <ActionButton
                    title="Report a Found Item"
                    icon="➕"
                    description="Submit a detailed entry for an item you have found."
                    color="border-green-600 hover:bg-green-900/30"
                    on_select=on_report
                />
                <ActionButton
                    title="Search for a Lost Item"
                    icon="🔍"
                    description="Use specific criteria (keywords, location) to search the database."
                    color="border-blue-600 hover:bg-blue-900/30"
                    on_select=on_search
                />
                <ActionButton
                    title="Claim an Item by ID"
                    icon="🆔"
                    description="Enter a known Item ID or use one from search results."
                    color="border-yellow-600 hover:bg-yellow-900/30"
                    on_select=on_claim
                />
            </div>
            <p class="text-gray-500 text-sm mt-6">
                "You can always return to the \"Talk to Assistant\" view for guided help."
            </p>
        </div>
    }
}

/// One action card on the manual dashboard
#[component]
fn ActionButton(
    title: &'static str,
    icon: &'static str,
    description: &'static str,
    color: &'static str,
    on_select: impl Fn() + 'static,
) -> impl IntoView {
    view! {
        <button
            on:click=move |_| on_select()
            class=format!(
                "bg-gray-700/40 border rounded-xl p-4 text-left transition-colors {}",
                color
            )
        >
            <span class="text-3xl">{icon}</span>
            <h3 class="font-semibold mt-2">{title}</h3>
            <p class="text-sm text-gray-400 mt-1">{description}</p>
        </button>
    }
}

/// Inline feedback banner above a form
#[component]
fn MessageDisplay(message: Feedback) -> impl IntoView {
    let class = format!("p-3 rounded-lg text-sm mb-4 {}", message.class());
    let text = message.text().to_string();

    view! { <p class=class>{text}</p> }
}

/// Form for recording a found item directly
#[component]
fn ReportForm(on_back: impl Fn() + 'static) -> impl IntoView {
    let (item_name, set_item_name) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());
    let (location_found, set_location_found) = create_signal(String::new());
    let (contact_email, set_contact_email) = create_signal(String::new());
    let (feedback, set_feedback) = create_signal(None::<Feedback>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get() {
            return;
        }
        let token = match api::load_token() {
            Some(t) => t,
            None => {
                set_feedback.set(Some(Feedback::Error(NOT_AUTHENTICATED.to_string())));
                return;
            }
        };

        set_feedback.set(None);
        set_submitting.set(true);

        let draft = api::FoundItemDraft {
            item_name: item_name.get(),
            description: description.get(),
            location_found: location_found.get(),
            contact_email: contact_email.get(),
        };

        spawn_local(async move {
            match api::report_found_item(&token, &draft).await {
                Ok(item) => {
                    set_feedback.set(Some(Feedback::Success(format!(
                        "Success! Item reported. Item ID: {}.",
                        item.item_id
                    ))));
                    set_item_name.set(String::new());
                    set_description.set(String::new());
                    set_location_found.set(String::new());
                    set_contact_email.set(String::new());
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Report error: {}", e).into());
                    let text = if e.status.is_some() {
                        format!("Failed to report item: {}", e)
                    } else {
                        "A network error occurred. Please check your connection or log out \
                         and back in to refresh your session."
                            .to_string()
                    };
                    set_feedback.set(Some(Feedback::Error(text)));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-2xl font-bold mb-4">"Report a Found Item"</h2>

            {move || feedback.get().map(|m| view! { <MessageDisplay message=m /> })}

            <form on:submit=on_submit class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-1">"Item Name:"</label>
                    <input
                        type="text"
                        prop:value=move || item_name.get()
                        on:input=move |ev| set_item_name.set(event_target_value(&ev))
                        required
                        class="w-full bg-gray-700 rounded-lg px-3 py-2
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>
                <div>
                    <label class="block text-sm text-gray-400 mb-1">
                        "Description (Color, brand, distinguishing marks):"
                    </label>
                    <textarea
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                        required
                        rows="3"
                        class="w-full bg-gray-700 rounded-lg px-3 py-2
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    ></textarea>
                </div>
                <div>
                    <label class="block text-sm text-gray-400 mb-1">"Location Found:"</label>
                    <input
                        type="text"
                        prop:value=move || location_found.get()
                        on:input=move |ev| set_location_found.set(event_target_value(&ev))
                        required
                        class="w-full bg-gray-700 rounded-lg px-3 py-2
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>
                <div>
                    <label class="block text-sm text-gray-400 mb-1">"Your Contact Email:"</label>
                    <input
                        type="email"
                        prop:value=move || contact_email.get()
                        on:input=move |ev| set_contact_email.set(event_target_value(&ev))
                        required
                        class="w-full bg-gray-700 rounded-lg px-3 py-2
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>
                <div class="flex justify-between items-center pt-2">
                    <button
                        type="button"
                        on:click=move |_| on_back()
                        class="text-gray-400 hover:text-white transition-colors"
                    >
                        "← Back to Dashboard"
                    </button>
                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="px-6 py-2 bg-green-600 hover:bg-green-700 disabled:bg-gray-600
                               rounded-lg font-medium transition-colors"
                    >
                        {move || if submitting.get() { "Submitting..." } else { "Report Item" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

/// Keyword/location search with claimable result cards
#[component]
fn SearchForm(
    on_back: impl Fn() + 'static,
    on_claim: impl Fn(String) + 'static + Clone,
) -> impl IntoView {
    let (keywords, set_keywords) = create_signal(String::new());
    let (location_hint, set_location_hint) = create_signal(String::new());
    let (feedback, set_feedback) = create_signal(None::<Feedback>);
    let (searching, set_searching) = create_signal(false);
    // None until a search completes, Some(vec) afterwards
    let (results, set_results) = create_signal(None::<Vec<FoundItem>>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if searching.get() {
            return;
        }
        let token = match api::load_token() {
            Some(t) => t,
            None => {
                set_feedback.set(Some(Feedback::Error(NOT_AUTHENTICATED.to_string())));
                return;
            }
        };

        set_feedback.set(None);
        set_results.set(None);
        set_searching.set(true);

        let keywords = keywords.get();
        let location_hint = location_hint.get();

        spawn_local(async move {
            match api::search_items(&token, &keywords, &location_hint).await {
                Ok(items) => {
                    if items.is_empty() {
                        set_feedback.set(Some(Feedback::Info(
                            "No matches found based on your criteria.".to_string(),
                        )));
                    } else {
                        set_feedback.set(Some(Feedback::Success(format!(
                            "{} potential matches found.",
                            items.len()
                        ))));
                    }
                    set_results.set(Some(items));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Search error: {}", e).into());
                    let text = if e.status.is_some() {
                        format!("Search failed: {}", e)
                    } else {
                        "A network error occurred during search. Please check your \
                         connection or log out and back in."
                            .to_string()
                    };
                    set_feedback.set(Some(Feedback::Error(text)));
                }
            }
            set_searching.set(false);
        });
    };

    view! {
        <div class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-2xl font-bold mb-4">"Search for a Lost Item"</h2>

            {move || feedback.get().map(|m| view! { <MessageDisplay message=m /> })}

            <form on:submit=on_submit class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-1">"Keywords (Required):"</label>
                    <input
                        type="text"
                        prop:value=move || keywords.get()
                        on:input=move |ev| set_keywords.set(event_target_value(&ev))
                        placeholder="e.g., wallet, red, leather, backpack"
                        required
                        class="w-full bg-gray-700 rounded-lg px-3 py-2
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>
                <div>
                    <label class="block text-sm text-gray-400 mb-1">
                        "Location Hint (Optional):"
                    </label>
                    <input
                        type="text"
                        prop:value=move || location_hint.get()
                        on:input=move |ev| set_location_hint.set(event_target_value(&ev))
                        placeholder="e.g., cafeteria, locker room"
                        class="w-full bg-gray-700 rounded-lg px-3 py-2
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>
                <div class="flex justify-between items-center pt-2">
                    <button
                        type="button"
                        on:click=move |_| on_back()
                        class="text-gray-400 hover:text-white transition-colors"
                    >
                        "← Back to Dashboard"
                    </button>
                    <button
                        type="submit"
                        disabled=move || searching.get()
                        class="px-6 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                               rounded-lg font-medium transition-colors"
                    >
                        {move || if searching.get() { "Searching..." } else { "Search Items" }}
                    </button>
                </div>
            </form>

            <div class="mt-6">
                {move || {
                    if searching.get() {
                        return view! { <ListSkeleton count=3 /> }.into_view();
                    }
                    match results.get() {
                        Some(items) if !items.is_empty() => {
                            let on_claim = on_claim.clone();
                            view! {
                                <div>
                                    <h3 class="text-lg font-semibold mb-3">
                                        {format!("Search Results ({})", items.len())}
                                    </h3>
                                    <div class="space-y-3">
                                        {items
                                            .into_iter()
                                            .map(|item| {
                                                let on_claim = on_claim.clone();
                                                view! { <ResultCard item=item on_claim=on_claim /> }
                                            })
                                            .collect_view()}
                                    </div>
                                </div>
                            }
                            .into_view()
                        }
                        Some(_) => view! {
                            <p class="text-gray-500 italic">
                                "No items matched your search criteria."
                            </p>
                        }
                        .into_view(),
                        None => ().into_view(),
                    }
                }}
            </div>
        </div>
    }
}

/// One found item in the search results
#[component]
fn ResultCard(item: FoundItem, on_claim: impl Fn(String) + 'static) -> impl IntoView {
    let claimable = item.status.can_claim();
    let status_class = format!("text-xs font-medium {}", item.status.badge_class());
    let status_label = item.status.label();
    let found_line = format!("Found At: {} on {}", item.location_found, item.date_display());
    let claim_id = item.item_id.clone();

    let claim_class = if claimable {
        "mt-3 px-4 py-1.5 bg-yellow-600 hover:bg-yellow-700 rounded-lg text-sm \
         font-medium transition-colors"
    } else {
        "mt-3 px-4 py-1.5 bg-gray-600 rounded-lg text-sm font-medium cursor-not-allowed"
    };

    view! {
        <div class="bg-gray-700/50 border border-gray-600 rounded-lg p-4">
            <div class="flex justify-between items-start">
                <div>
                    <h4 class="font-semibold text-primary-400">{item.item_name}</h4>
                    <p class="text-xs text-gray-400">
                        "ID: " <span class="font-mono">{item.item_id}</span>
                    </p>
                </div>
                <span class=status_class>"Status: " {status_label}</span>
            </div>
            <p class="text-sm text-gray-300 mt-2">{found_line}</p>
            <p class="text-sm text-gray-400 italic mt-1">{item.description}</p>
            <button
                on:click=move |_| on_claim(claim_id.clone())
                disabled=!claimable
                class=claim_class
            >
                {if claimable { "Initiate Claim" } else { "Already Claimed/Returned" }}
            </button>
        </div>
    }
}

/// Claim form, optionally pre-filled from a search result
#[component]
fn ClaimForm(#[prop(into)] prefilled_id: String, on_back: impl Fn() + 'static) -> impl IntoView {
    let (item_id, set_item_id) = create_signal(prefilled_id.clone());
    let (prefilled, set_prefilled) = create_signal(!prefilled_id.is_empty());
    let (contact_name, set_contact_name) = create_signal(String::new());
    let (contact_email, set_contact_email) = create_signal(String::new());
    let (details, set_details) = create_signal(String::new());
    let (feedback, set_feedback) = create_signal(None::<Feedback>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get() {
            return;
        }
        let token = match api::load_token() {
            Some(t) => t,
            None => {
                set_feedback.set(Some(Feedback::Error(NOT_AUTHENTICATED.to_string())));
                return;
            }
        };
        let id = item_id.get();
        if id.trim().is_empty() {
            set_feedback.set(Some(Feedback::Error(
                "Please enter a valid Item ID.".to_string(),
            )));
            return;
        }

        set_feedback.set(None);
        set_submitting.set(true);

        spawn_local(async move {
            match api::claim_item(&token, &id).await {
                Ok(()) => {
                    set_feedback.set(Some(Feedback::Success(format!(
                        "Claim initiated successfully for Item ID {}. The item is now \
                         marked as CLAIMED.",
                        id
                    ))));
                    set_contact_name.set(String::new());
                    set_contact_email.set(String::new());
                    set_details.set(String::new());
                    set_prefilled.set(false);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Claim error: {}", e).into());
                    let text = if e.status.is_some() {
                        format!("Claim failed: {}", e)
                    } else {
                        "A network error occurred during claim. Please check your \
                         connection or log out and back in."
                            .to_string()
                    };
                    set_feedback.set(Some(Feedback::Error(text)));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-2xl font-bold mb-4">"Claim an Item by ID"</h2>

            {move || feedback.get().map(|m| view! { <MessageDisplay message=m /> })}

            <form on:submit=on_submit class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-1">
                        "Item ID (UUID of the Found Item):"
                    </label>
                    <input
                        type="text"
                        prop:value=move || item_id.get()
                        on:input=move |ev| set_item_id.set(event_target_value(&ev))
                        placeholder="e.g., 550e8400-e29b-41d4-a716-446655440000"
                        readonly=move || prefilled.get()
                        required
                        class="w-full bg-gray-700 rounded-lg px-3 py-2 font-mono
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                    {move || prefilled.get().then(|| view! {
                        <p class="text-xs text-green-400 mt-1">
                            "Item ID pre-filled from search results."
                        </p>
                    })}
                </div>
                // Contact fields are cosmetic; the claim endpoint only takes the id
                <div>
                    <label class="block text-sm text-gray-400 mb-1">"Your Name:"</label>
                    <input
                        type="text"
                        prop:value=move || contact_name.get()
                        on:input=move |ev| set_contact_name.set(event_target_value(&ev))
                        required
                        class="w-full bg-gray-700 rounded-lg px-3 py-2
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>
                <div>
                    <label class="block text-sm text-gray-400 mb-1">"Your Email:"</label>
                    <input
                        type="email"
                        prop:value=move || contact_email.get()
                        on:input=move |ev| set_contact_email.set(event_target_value(&ev))
                        required
                        class="w-full bg-gray-700 rounded-lg px-3 py-2
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>
                <div>
                    <label class="block text-sm text-gray-400 mb-1">
                        "Details proving ownership:"
                    </label>
                    <textarea
                        prop:value=move || details.get()
                        on:input=move |ev| set_details.set(event_target_value(&ev))
                        placeholder="e.g., The phone has a crack on the top left corner, and the wallpaper is a dog."
                        required
                        rows="3"
                        class="w-full bg-gray-700 rounded-lg px-3 py-2
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    ></textarea>
                </div>
                <div class="flex justify-between items-center pt-2">
                    <button
                        type="button"
                        on:click=move |_| on_back()
                        class="text-gray-400 hover:text-white transition-colors"
                    >
                        "← Back to Dashboard"
                    </button>
                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="px-6 py-2 bg-yellow-600 hover:bg-yellow-700 disabled:bg-gray-600
                               rounded-lg font-medium transition-colors"
                    >
                        {move || if submitting.get() { "Submitting Claim..." } else { "Submit Claim" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_text() {
        let feedback = Feedback::Error("Please enter a valid Item ID.".to_string());
        assert_eq!(feedback.text(), "Please enter a valid Item ID.");
    }

    #[test]
    fn test_feedback_classes_by_kind() {
        let success = Feedback::Success("reported".to_string());
        let error = Feedback::Error("failed".to_string());
        let info = Feedback::Info("no matches".to_string());

        assert!(success.class().contains("green"));
        assert!(error.class().contains("red"));
        assert!(info.class().contains("blue"));
    }
}
