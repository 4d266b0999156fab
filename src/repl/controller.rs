//! The interactive read-evaluate-print loop.
//!
//! One operation is in flight at a time: wait for a line, run the command or
//! chat turn, write the result, repeat. The interrupt future is only raced
//! against the input read, so a Ctrl-C during a provider call takes effect at
//! the next prompt.

use crate::error::Result;
use crate::repl::command::{Command, HELP_LINES};
use crate::repl::session::{Session, SwitchOutcome};
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

pub const PROMPT: &str = "You: ";
pub const FAREWELL: &str = "👋 Goodbye!";
pub const TITLE: &str = "🦜 chatterm - terminal chat for OpenAI and Gemini";
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Command,
    Interrupted,
    EndOfInput,
}

/// Run the loop until `exit`, end of input, or `interrupt` resolves.
///
/// Provider failures and rejected switches are written to `output` and the
/// loop carries on; only I/O errors on `input`/`output` end it early.
pub async fn run<R, W, I>(
    session: &mut Session,
    input: R,
    output: &mut W,
    interrupt: I,
) -> Result<Exit>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    I: Future<Output = ()>,
{
    tokio::pin!(interrupt);
    let mut lines = input.lines();

    write_banner(session, output).await?;

    let exit = loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut interrupt => {
                output.write_all(format!("\n{}\n", FAREWELL).as_bytes()).await?;
                break Exit::Interrupted;
            }
        };

        let Some(line) = line else {
            output.write_all(format!("\n{}\n", FAREWELL).as_bytes()).await?;
            break Exit::EndOfInput;
        };

        match Command::parse(&line) {
            Command::Empty => continue,
            Command::Exit => {
                output.write_all(format!("{}\n", FAREWELL).as_bytes()).await?;
                break Exit::Command;
            }
            Command::Help => {
                let help = format!("\n{}\n\n", HELP_LINES.join("\n"));
                output.write_all(help.as_bytes()).await?;
            }
            Command::Clear => {
                output.write_all(CLEAR_SCREEN.as_bytes()).await?;
            }
            Command::Status => {
                let status = format!("{}\n\n", session.status_lines().join("\n"));
                output.write_all(status.as_bytes()).await?;
            }
            Command::Provider(None) => {
                output
                    .write_all(b"Usage: provider <name> (openai, gemini)\n\n")
                    .await?;
            }
            Command::Provider(Some(name)) => {
                let message = match session.switch_provider(&name) {
                    Ok(SwitchOutcome::Switched(provider)) => {
                        format!("✅ Switched to {} ({})\n\n", provider, session.model())
                    }
                    Ok(SwitchOutcome::AlreadyActive(provider)) => {
                        format!("Already using {}\n\n", provider)
                    }
                    Err(e) => {
                        warn!(requested = %name, error = %e, "Provider switch rejected");
                        format!("⚠️  {}\n\n", e)
                    }
                };
                output.write_all(message.as_bytes()).await?;
            }
            Command::Chat(message) => {
                debug!(provider = %session.current_provider(), "Chat turn");
                let text = match session.chat(&message).await {
                    Ok(reply) => {
                        format!("{}: {}\n\n", session.current_provider().label(), reply)
                    }
                    Err(e) => {
                        warn!(provider = %session.current_provider(), error = %e, "Chat turn failed");
                        format!("❌ Error: {}\n\n", e)
                    }
                };
                output.write_all(text.as_bytes()).await?;
            }
        }
    };

    output.flush().await?;
    Ok(exit)
}

async fn write_banner<W>(session: &Session, output: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let banner = format!(
        "{}\n{}\nType 'exit' to quit, 'help' for commands\nUsing {} ({})\n\n",
        TITLE,
        "=".repeat(50),
        session.current_provider(),
        session.model()
    );
    output.write_all(banner.as_bytes()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::llm::models::MessageRole;
    use crate::llm::provider::Provider;
    use crate::repl::test_support::{MockFactory, ScriptedGateway};
    use std::collections::BTreeSet;
    use std::future::pending;
    use std::sync::Arc;

    struct Harness {
        session: Session,
        openai: Arc<ScriptedGateway>,
        gemini: Arc<ScriptedGateway>,
    }

    fn harness(
        available: &[Provider],
        openai: Vec<std::result::Result<String, ProviderError>>,
        gemini: Vec<std::result::Result<String, ProviderError>>,
    ) -> Harness {
        let openai = Arc::new(ScriptedGateway::new(openai));
        let gemini = Arc::new(ScriptedGateway::new(gemini));
        let factory = Arc::new(MockFactory::new(vec![
            (Provider::OpenAI, openai.clone()),
            (Provider::Gemini, gemini.clone()),
        ]));
        let available: BTreeSet<Provider> = available.iter().copied().collect();
        let session = Session::start(available, factory).unwrap();
        Harness {
            session,
            openai,
            gemini,
        }
    }

    async fn drive(session: &mut Session, script: &str) -> (Exit, String) {
        let mut output: Vec<u8> = Vec::new();
        let exit = run(session, script.as_bytes(), &mut output, pending::<()>())
            .await
            .unwrap();
        (exit, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn test_exit_command_says_goodbye() {
        let mut h = harness(&[Provider::OpenAI], vec![], vec![]);
        let (exit, output) = drive(&mut h.session, "exit\nHello\n").await;

        assert_eq!(exit, Exit::Command);
        assert!(output.contains(TITLE));
        assert!(output.contains("Using OpenAI (openai-test-model)"));
        assert!(output.ends_with(&format!("{}\n", FAREWELL)));
        assert!(h.openai.requests().is_empty());
    }

    #[tokio::test]
    async fn test_end_of_input_ends_loop() {
        let mut h = harness(&[Provider::OpenAI], vec![], vec![]);
        let (exit, output) = drive(&mut h.session, "").await;

        assert_eq!(exit, Exit::EndOfInput);
        assert!(output.contains(FAREWELL));
    }

    #[tokio::test]
    async fn test_interrupt_while_waiting_for_input() {
        let mut h = harness(&[Provider::OpenAI], vec![], vec![]);
        let (reader, _writer) = tokio::io::duplex(64);
        let reader = tokio::io::BufReader::new(reader);
        let mut output: Vec<u8> = Vec::new();

        let exit = run(&mut h.session, reader, &mut output, async {}).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(exit, Exit::Interrupted);
        assert!(output.ends_with(&format!("{}\n{}\n", PROMPT, FAREWELL)));
    }

    #[tokio::test]
    async fn test_empty_lines_are_ignored() {
        let mut h = harness(&[Provider::OpenAI], vec![], vec![]);
        let (_, output) = drive(&mut h.session, "\n   \n\t\nexit\n").await;

        assert_eq!(output.matches(PROMPT).count(), 4);
        assert!(h.openai.requests().is_empty());
    }

    #[tokio::test]
    async fn test_status_openai_only() {
        let mut h = harness(&[Provider::OpenAI], vec![], vec![]);
        let (_, output) = drive(&mut h.session, "status\nexit\n").await;

        assert!(output.contains("Current provider: OpenAI (openai-test-model)"));
        assert!(output.contains("Available providers: OpenAI\n"));
    }

    #[tokio::test]
    async fn test_help_lists_commands_without_changing_state() {
        let mut h = harness(&[Provider::OpenAI, Provider::Gemini], vec![], vec![]);
        let (_, output) = drive(&mut h.session, "HELP\nexit\n").await;

        for line in HELP_LINES {
            assert!(output.contains(line), "missing help line: {}", line);
        }
        assert_eq!(h.session.current_provider(), Provider::OpenAI);
        assert!(h.openai.requests().is_empty());
    }

    #[tokio::test]
    async fn test_clear_writes_escape_sequence() {
        let mut h = harness(&[Provider::OpenAI], vec![], vec![]);
        let (_, output) = drive(&mut h.session, "clear\nexit\n").await;

        assert!(output.contains(CLEAR_SCREEN));
    }

    #[tokio::test]
    async fn test_chat_prints_labelled_reply() {
        let mut h = harness(&[Provider::OpenAI], vec![Ok("Hi there!".into())], vec![]);
        let (_, output) = drive(&mut h.session, "Hello\nexit\n").await;

        assert!(output.contains("🤖 OpenAI: Hi there!\n\n"));
        assert_eq!(h.openai.user_messages(), vec!["Hello".to_string()]);
    }

    #[tokio::test]
    async fn test_consecutive_turns_carry_no_history() {
        let mut h = harness(
            &[Provider::OpenAI],
            vec![Ok("R1".into()), Ok("R2".into())],
            vec![],
        );
        drive(&mut h.session, "M1\nM2\nexit\n").await;

        let requests = h.openai.requests();
        assert_eq!(requests.len(), 2);
        let second = &requests[1];
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].role, MessageRole::System);
        assert_eq!(second[1].content, "M2");
        assert!(second.iter().all(|m| m.content != "M1" && m.content != "R1"));
    }

    #[tokio::test]
    async fn test_switch_routes_next_message_to_gemini() {
        let mut h = harness(
            &[Provider::OpenAI, Provider::Gemini],
            vec![],
            vec![Ok("Gemini here".into())],
        );
        let (_, output) = drive(&mut h.session, "provider gemini\nHello\nexit\n").await;

        assert!(output.contains("✅ Switched to Gemini (gemini-test-model)"));
        assert!(output.contains("🤖 Gemini: Gemini here"));
        assert_eq!(h.session.current_provider(), Provider::Gemini);
        assert!(h.openai.requests().is_empty());
        assert_eq!(h.gemini.user_messages(), vec!["Hello".to_string()]);
    }

    #[tokio::test]
    async fn test_switch_to_unavailable_provider_is_rejected() {
        let mut h = harness(&[Provider::OpenAI], vec![Ok("still openai".into())], vec![]);
        let (_, output) = drive(&mut h.session, "provider gemini\nHello\nexit\n").await;

        assert!(output.contains("⚠️  Cannot switch provider: Gemini is not configured"));
        assert!(output.contains("🤖 OpenAI: still openai"));
        assert_eq!(h.session.current_provider(), Provider::OpenAI);
        assert!(h.gemini.requests().is_empty());
    }

    #[tokio::test]
    async fn test_provider_without_name_prints_usage() {
        let mut h = harness(&[Provider::OpenAI], vec![], vec![]);
        let (_, output) = drive(&mut h.session, "provider\nexit\n").await;

        assert!(output.contains("Usage: provider <name>"));
    }

    #[tokio::test]
    async fn test_provider_error_does_not_end_session() {
        let mut h = harness(
            &[Provider::OpenAI],
            vec![
                Err(ProviderError::RateLimited {
                    provider: "OpenAI".into(),
                    message: "slow down".into(),
                }),
                Ok("Recovered".into()),
            ],
            vec![],
        );
        let (exit, output) = drive(&mut h.session, "Hello\nHello again\nexit\n").await;

        assert_eq!(exit, Exit::Command);
        assert!(output.contains("❌ Error: OpenAI rate limit or quota exceeded: slow down\n"));
        assert!(output.contains("🤖 OpenAI: Recovered"));
        assert_eq!(h.session.current_provider(), Provider::OpenAI);
        assert_eq!(
            h.openai.user_messages(),
            vec!["Hello".to_string(), "Hello again".to_string()]
        );
    }
}
