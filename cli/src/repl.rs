//! Support-bot loop: read a question, ask the knowledge base, print the answer, repeat.
//!
//! Stops on `exit` / `quit` (any case) or EOF. Blank lines are skipped. A failed
//! lookup prints `Bot: Error: ...` and the loop continues.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use toolloop::AnswerSource;

pub const SUPPORT_BANNER: &str = "Support Bot (type 'exit' or 'quit' to leave)";

const PROMPT: &str = "You: ";
const GOODBYE: &str = "Bot: Goodbye!";

fn is_quit_command(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "exit" | "quit")
}

/// Runs the loop over `input`, writing prompts and replies to `out`.
pub async fn run_support_loop<R, W>(
    source: &dyn AnswerSource,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", SUPPORT_BANNER)?;
    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let question = match lines.next_line().await? {
            None => {
                writeln!(out)?;
                break;
            }
            Some(s) if is_quit_command(&s) => break,
            Some(s) if s.trim().is_empty() => continue,
            Some(s) => s,
        };

        match source.ask(question.trim()).await {
            Ok(answer) => writeln!(out, "Bot: {}", answer)?,
            Err(e) => {
                tracing::warn!(error = %e, "knowledge base lookup failed");
                writeln!(out, "Bot: Error: {}", e)?;
            }
        }
    }
    writeln!(out, "{}", GOODBYE)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use toolloop::{QnaError, FALLBACK_ANSWER};

    struct CannedAnswers {
        asked: Mutex<Vec<String>>,
    }

    impl CannedAnswers {
        fn new() -> Self {
            Self {
                asked: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AnswerSource for CannedAnswers {
        async fn ask(&self, question: &str) -> Result<String, QnaError> {
            self.asked.lock().unwrap().push(question.to_string());
            match question {
                "boom" => Err(QnaError::MissingKey),
                "What are your hours?" => Ok("9 to 5, Monday to Friday.".to_string()),
                _ => Ok(FALLBACK_ANSWER.to_string()),
            }
        }
    }

    async fn run(input: &str, source: &CannedAnswers) -> String {
        let mut out = Vec::new();
        run_support_loop(source, input.as_bytes(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn quit_commands_are_case_insensitive() {
        assert!(is_quit_command("exit"));
        assert!(is_quit_command("QUIT"));
        assert!(is_quit_command("  Exit "));
        assert!(!is_quit_command("exit now"));
    }

    /// **Scenario**: one answered question, then `quit`.
    #[tokio::test]
    async fn answers_then_quits() {
        let source = CannedAnswers::new();
        let text = run("What are your hours?\nquit\nnever asked\n", &source).await;
        assert_eq!(
            text,
            format!(
                "{}\nYou: Bot: 9 to 5, Monday to Friday.\nYou: Bot: Goodbye!\n",
                SUPPORT_BANNER
            )
        );
        assert_eq!(source.asked.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_question_gets_fallback_and_eof_ends() {
        let source = CannedAnswers::new();
        let text = run("Do you sell boats?", &source).await;
        assert!(text.contains(&format!("Bot: {}", FALLBACK_ANSWER)));
        assert!(text.ends_with("You: \nBot: Goodbye!\n"), "{}", text);
    }

    #[tokio::test]
    async fn errors_are_printed_and_loop_continues() {
        let source = CannedAnswers::new();
        let text = run("boom\n\nWhat are your hours?\nexit\n", &source).await;
        assert!(text.contains("Bot: Error: LANGUAGE_QNA_KEY is not set"));
        assert!(text.contains("Bot: 9 to 5"));
        assert_eq!(source.asked.lock().unwrap().len(), 2);
    }
}
