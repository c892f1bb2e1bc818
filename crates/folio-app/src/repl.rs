//! Line-based chat loop standing in for the page's chat widget.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use folio_assistant::{ConversationError, ConversationManager, BACK_TO_ASSISTANT, SWITCH_TO_HUMAN};
use folio_common::{Event, Role, Suggestion};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Empty,
    Help,
    Quit,
    Suggest(usize),
    Select(&'static str),
    Message(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line {
        "" => Command::Empty,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        "/human" => Command::Select(SWITCH_TO_HUMAN),
        "/assistant" => Command::Select(BACK_TO_ASSISTANT),
        _ => match line.strip_prefix("/suggest ") {
            Some(n) => match n.trim().parse::<usize>() {
                Ok(n) if n > 0 => Command::Suggest(n),
                _ => Command::Help,
            },
            None => Command::Message(line.to_string()),
        },
    }
}

const HELP: &str = "Commands: /suggest N, /human, /assistant, /quit";

fn format_suggestions(suggestions: &[Suggestion]) -> String {
    suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| format!("[{}] {}", i + 1, s.text))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Text to print for an event, if any.
pub fn render(event: &Event, speaker: &str) -> Option<String> {
    match event {
        Event::MessageAppended(turn) => match turn.role {
            Role::User => None,
            Role::Assistant => Some(format!("{speaker}: {}", turn.content)),
        },
        Event::PersonaChanged(mode) => Some(format!("-- now talking to: {mode} --")),
        Event::BusyChanged(true) => Some(format!("{speaker} is typing...")),
        Event::BusyChanged(false) => None,
        Event::SuggestionsChanged(suggestions) => Some(format_suggestions(suggestions)),
        Event::Unknown => None,
    }
}

/// Shared line sink for the input loop and the renderer.
type Console<W> = Arc<Mutex<W>>;

fn say<W: Write>(console: &Mutex<W>, line: &str) {
    let mut out = console.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
        tracing::warn!(error = %e, "failed to write output");
    }
}

/// Print events until `done` fires, then print whatever is still queued.
async fn render_loop<W: Write>(
    manager: Arc<ConversationManager>,
    mut rx: broadcast::Receiver<Event>,
    console: Console<W>,
    done: CancellationToken,
) {
    let print = |event: &Event| {
        if let Some(line) = render(event, &manager.profile().display_name) {
            say(&console, &line);
        }
    };
    loop {
        tokio::select! {
            biased;
            received = rx.recv() => match received {
                Ok(event) => print(&event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "renderer fell behind");
                }
                Err(broadcast::error::RecvError::Closed) => return,
            },
            _ = done.cancelled() => break,
        }
    }
    while let Ok(event) = rx.try_recv() {
        print(&event);
    }
}

/// Run until stdin closes or the user quits.
pub async fn run(manager: Arc<ConversationManager>) -> std::io::Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    run_with(manager, input, Arc::new(Mutex::new(std::io::stdout()))).await
}

/// Drive the conversation from `input`, printing to `console`. Every event
/// published before the input ends is printed before this returns.
pub async fn run_with<R, W>(
    manager: Arc<ConversationManager>,
    input: R,
    console: Console<W>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send + 'static,
{
    let done = CancellationToken::new();
    let renderer = tokio::spawn(render_loop(
        Arc::clone(&manager),
        manager.subscribe(),
        Arc::clone(&console),
        done.clone(),
    ));
    manager.open();
    say(&console, HELP);

    let result = read_commands(&manager, input, &console).await;

    done.cancel();
    if let Err(e) = renderer.await {
        tracing::warn!(error = %e, "renderer task failed");
    }
    result
}

async fn read_commands<R, W>(
    manager: &ConversationManager,
    input: R,
    console: &Mutex<W>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let result = match parse_command(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Help => {
                say(console, HELP);
                continue;
            }
            Command::Select(label) => manager.select_suggestion(label).await,
            Command::Suggest(n) => match manager.suggestions().get(n - 1) {
                Some(suggestion) => manager.select_suggestion(&suggestion.label).await,
                None => {
                    say(console, &format!("No suggestion {n}."));
                    continue;
                }
            },
            Command::Message(text) => manager.submit(text).await,
        };
        match result {
            Ok(_) => {}
            Err(ConversationError::Busy) => say(console, "Still waiting for the last reply."),
            Err(e) => tracing::debug!(error = %e, "input ignored"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use folio_assistant::{
        CompletionClient, CompletionConfig, ConversationSettings, CredentialResolver,
        HttpTransport, MemoryPreferenceStore, Preferences, ResolverSettings, NO_CREDENTIAL_REPLY,
    };
    use folio_common::{PersonaMode, Turn};

    fn offline_manager() -> Arc<ConversationManager> {
        let credentials = Arc::new(CredentialResolver::new(
            Preferences::new(Arc::new(MemoryPreferenceStore::new())),
            ResolverSettings::default(),
        ));
        let completion = CompletionConfig::default();
        let transport = Arc::new(HttpTransport::new(completion.endpoint.clone()));
        let client = CompletionClient::new(completion, transport, credentials);
        Arc::new(ConversationManager::new(
            client,
            ConversationSettings::default().with_typing_delay(Duration::ZERO),
        ))
    }

    async fn transcript(input: &str) -> String {
        let console = Arc::new(Mutex::new(Vec::new()));
        run_with(offline_manager(), input.as_bytes(), Arc::clone(&console))
            .await
            .unwrap();
        let bytes = console.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[tokio::test]
    async fn last_reply_is_printed_when_input_ends() {
        let out = transcript("hi\n").await;
        assert!(out.contains(NO_CREDENTIAL_REPLY), "missing reply in:\n{out}");
    }

    #[tokio::test]
    async fn quit_stops_reading_but_keeps_output() {
        let out = transcript("/human\nhello\n/quit\n/assistant\n").await;
        assert!(out.contains("-- now talking to: human-proxy --"));
        assert_eq!(out.matches("-- now talking to: assistant --").count(), 1);
        assert!(out.contains(NO_CREDENTIAL_REPLY));
    }

    #[tokio::test]
    async fn unknown_suggestion_is_reported() {
        let out = transcript("/suggest 9\n").await;
        assert!(out.contains("No suggestion 9."));
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("   "), Command::Empty);
        assert_eq!(parse_command("/quit"), Command::Quit);
        assert_eq!(parse_command("/human"), Command::Select(SWITCH_TO_HUMAN));
        assert_eq!(parse_command("/assistant"), Command::Select(BACK_TO_ASSISTANT));
        assert_eq!(parse_command("/suggest 2"), Command::Suggest(2));
        assert_eq!(parse_command("/suggest 0"), Command::Help);
        assert_eq!(parse_command("/suggest x"), Command::Help);
        assert_eq!(
            parse_command("  Tell me about your skills "),
            Command::Message("Tell me about your skills".into())
        );
    }

    #[test]
    fn renders_only_assistant_messages() {
        let user = Event::MessageAppended(Turn::user("hi"));
        assert_eq!(render(&user, "Assistant"), None);

        let reply = Event::MessageAppended(Turn::assistant("hello"));
        assert_eq!(render(&reply, "Assistant").as_deref(), Some("Assistant: hello"));
    }

    #[test]
    fn renders_persona_and_suggestions() {
        let event = Event::PersonaChanged(PersonaMode::HumanProxy);
        assert_eq!(
            render(&event, "Owner").as_deref(),
            Some("-- now talking to: human-proxy --")
        );

        let event = Event::SuggestionsChanged(vec![
            Suggestion::new("a", "Skills"),
            Suggestion::new("b", "Projects"),
        ]);
        assert_eq!(
            render(&event, "Assistant").as_deref(),
            Some("[1] Skills  [2] Projects")
        );
    }

    #[test]
    fn busy_indicator_only_when_starting() {
        assert!(render(&Event::BusyChanged(true), "Owner")
            .unwrap()
            .contains("typing"));
        assert_eq!(render(&Event::BusyChanged(false), "Owner"), None);
    }
}
