//! Chat Page
//!
//! The assistant conversation view. The transcript lives here and only
//! here; logging out or reloading starts a fresh conversation.

use leptos::*;

use crate::api;
use crate::state::global::{ChatTurn, Role, SessionState};

/// Transcript text recorded when the assistant request fails
const ASSISTANT_ERROR_TEXT: &str = "Sorry, I ran into an error connecting to the AI service.";

/// Assistant chat view
#[component]
pub fn Chat() -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");

    let (input, set_input) = create_signal(String::new());
    let (sending, set_sending) = create_signal(false);
    let turns = create_rw_signal(Vec::<ChatTurn>::new());

    let transcript_ref = create_node_ref::<html::Div>();

    // Keep the newest turn in view
    create_effect(move |_| {
        turns.with(|_| ());
        if let Some(el) = transcript_ref.get() {
            request_animation_frame(move || {
                el.set_scroll_top(el.scroll_height());
            });
        }
    });

    let state_for_send = state.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let text = input.get();
        if text.trim().is_empty() || sending.get() {
            return;
        }
        let token = match state_for_send.token.get() {
            Some(t) => t,
            None => return,
        };

        let history = record_user_turn(turns, &text);
        set_input.set(String::new());
        set_sending.set(true);

        let state = state_for_send.clone();
        spawn_local(async move {
            match api::send_chat_message(&token, &text, history).await {
                Ok(reply) => {
                    turns.update(|t| t.push(ChatTurn::assistant(reply)));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("AI chat error: {}", e).into());
                    state.show_error(&e.to_string());
                    turns.update(|t| t.push(failure_turn(&e)));
                }
            }
            set_sending.set(false);
        });
    };

    view! {
        <div class="max-w-2xl mx-auto bg-gray-800 rounded-xl flex flex-col h-[60vh]">
            // Transcript
            <div node_ref=transcript_ref class="flex-1 overflow-y-auto p-4 space-y-3">
                {move || turns.get().into_iter().map(|turn| {
                    let (align, bubble) = match turn.role {
                        Role::User => ("text-right", "bg-primary-600 text-white"),
                        Role::Assistant => ("text-left", "bg-gray-700 text-gray-100"),
                    };
                    view! {
                        <div class=align>
                            // pre-wrap keeps tool output formatting readable
                            <span class=format!(
                                "inline-block px-4 py-2 rounded-2xl whitespace-pre-wrap max-w-[80%] text-left {}",
                                bubble
                            )>
                                {turn.text}
                            </span>
                        </div>
                    }
                }).collect_view()}
            </div>

            // Input form
            <form on:submit=on_submit class="flex p-3 border-t border-gray-700 space-x-2">
                <input
                    type="text"
                    prop:value=move || input.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    placeholder=move || if sending.get() {
                        "AI is thinking..."
                    } else {
                        "Ask me anything (Report, Search, Claim)..."
                    }
                    disabled=move || sending.get()
                    class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <button
                    type="submit"
                    disabled=move || sending.get() || input.get().trim().is_empty()
                    class="px-6 py-3 bg-green-600 hover:bg-green-700 disabled:bg-gray-600
                           rounded-lg font-medium transition-colors"
                >
                    {move || if sending.get() { "Sending..." } else { "Send" }}
                </button>
            </form>
        </div>
    }
}

/// Append the user's message to the transcript, returning the wire history
/// holding only the turns before it. The message itself rides in the
/// request body, not in the history.
fn record_user_turn(turns: RwSignal<Vec<ChatTurn>>, text: &str) -> Vec<api::HistoryPart> {
    let history = api::history_payload(&turns.get_untracked());
    turns.update(|t| t.push(ChatTurn::user(text)));
    history
}

/// Build the transcript turn recorded when a send fails
fn failure_turn(error: &api::ApiError) -> ChatTurn {
    if error.is_unauthorized() {
        ChatTurn::assistant(error.to_string())
    } else {
        ChatTurn::assistant(ASSISTANT_ERROR_TEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn test_failure_turn_for_unauthorized() {
        let err = ApiError {
            status: Some(401),
            message: "Unauthorized. Please log out and log back in.".to_string(),
            server_text: None,
        };

        let turn = failure_turn(&err);
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.text, "Unauthorized. Please log out and log back in.");
    }

    #[test]
    fn test_failure_turn_for_other_errors() {
        let err = ApiError {
            status: None,
            message: "Network error: connection refused".to_string(),
            server_text: None,
        };

        let turn = failure_turn(&err);
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.text, ASSISTANT_ERROR_TEXT);
    }

    #[test]
    fn test_history_excludes_message_being_sent() {
        let runtime = create_runtime();

        let turns = create_rw_signal(vec![
            ChatTurn::user("I lost my wallet"),
            ChatTurn::assistant("What does it look like?"),
        ]);

        let history = record_user_turn(turns, "Red leather, last seen in the cafeteria");

        // The wire history carries only the preceding turns
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text, "I lost my wallet");
        assert!(history
            .iter()
            .all(|part| part.text != "Red leather, last seen in the cafeteria"));

        // The transcript gained the new user turn at the end
        let recorded = turns.get_untracked();
        assert_eq!(recorded.len(), 3);
        assert_eq!(
            recorded[2],
            ChatTurn::user("Red leather, last seen in the cafeteria")
        );

        runtime.dispose();
    }

    #[test]
    fn test_first_message_sends_empty_history() {
        let runtime = create_runtime();

        let turns = create_rw_signal(Vec::<ChatTurn>::new());
        let history = record_user_turn(turns, "Hello");

        assert!(history.is_empty());
        assert_eq!(turns.get_untracked(), vec![ChatTurn::user("Hello")]);

        runtime.dispose();
    }

    #[test]
    fn test_exchange_appends_in_order() {
        let runtime = create_runtime();

        // One exchange: the user turn goes in before the send, the reply after
        let turns = create_rw_signal(Vec::<ChatTurn>::new());
        record_user_turn(turns, "Where is my wallet?");
        turns.update(|t| t.push(ChatTurn::assistant("Let me check the database.")));

        let recorded = turns.get_untracked();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].role, Role::User);
        assert_eq!(recorded[1].role, Role::Assistant);

        runtime.dispose();
    }
}
