use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use crate::commands;
use crate::config::Config;
use crate::interpreter::{Flow, Interpreter};

/// Reads commands from `input` until exit or end of input.
///
/// A read failure ends the session the same way end of input does. Only a
/// failing output sink is reported as an error.
pub fn run<R, W>(mut input: R, interpreter: &mut Interpreter<W>, config: &Config) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    info!("starting todo session");
    if config.show_banner {
        let out = interpreter.output_mut();
        writeln!(out, "Todo Application - Interactive CLI")?;
        writeln!(out, "Commands: {}", commands::available())?;
        writeln!(out, "Type 'exit' or 'quit' to quit")?;
    }

    let mut line = String::new();
    loop {
        let out = interpreter.output_mut();
        write!(out, "\n{}", config.prompt)?;
        out.flush()?;

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                info!("end of input, exiting");
                return farewell(interpreter.output_mut(), true);
            }
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "input stream failed, exiting");
                return farewell(interpreter.output_mut(), true);
            }
        }

        let command = line.trim_end_matches(['\n', '\r']);
        debug!(input = command, "received input");
        if interpreter.execute(command)? == Flow::Exit {
            info!("exiting todo session");
            return farewell(interpreter.output_mut(), false);
        }
    }
}

/// Says goodbye and exits the process when Ctrl-C arrives.
///
/// The read loop blocks on stdin, so the signal is awaited on its own thread
/// with a single-threaded runtime.
pub fn spawn_interrupt_handler() -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    std::thread::Builder::new()
        .name("todo-interrupt".to_string())
        .spawn(move || {
            runtime.block_on(async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    warn!(error = %err, "failed to listen for Ctrl-C");
                    return;
                }
                info!("interrupt received, exiting");
                let _ = farewell(&mut io::stdout(), true);
                std::process::exit(0);
            });
        })?;
    Ok(())
}

/// Writes the closing `Goodbye!`.
///
/// When the session ends without an exit command the prompt is still on the
/// current line, so `interrupted` starts a fresh one first.
pub fn farewell<W: Write>(out: &mut W, interrupted: bool) -> io::Result<()> {
    if interrupted {
        writeln!(out)?;
    }
    writeln!(out, "Goodbye!")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn quiet() -> Config {
        Config {
            show_banner: false,
            ..Config::default()
        }
    }

    #[test]
    fn exit_command_says_goodbye() {
        let mut interpreter = Interpreter::new(Vec::new());
        run(Cursor::new("exit\nadd never\n"), &mut interpreter, &quiet()).unwrap();

        let (tasks, out) = interpreter.into_parts();
        assert!(tasks.is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), "\n> Goodbye!\n");
    }

    #[test]
    fn end_of_input_prints_newline_before_goodbye() {
        let mut interpreter = Interpreter::new(Vec::new());
        run(Cursor::new("add \"Task A\"\r\n"), &mut interpreter, &quiet()).unwrap();

        let out = String::from_utf8(interpreter.output().clone()).unwrap();
        assert_eq!(out, "\n> Task added: ID 1 - Task A\n\n> \nGoodbye!\n");
    }

    #[test]
    fn farewell_after_interrupt_starts_a_new_line() {
        let mut out = Vec::new();
        farewell(&mut out, true).unwrap();
        assert_eq!(out, b"\nGoodbye!\n");

        let mut out = Vec::new();
        farewell(&mut out, false).unwrap();
        assert_eq!(out, b"Goodbye!\n");
    }

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("stream closed"))
        }
    }

    impl BufRead for FailingReader {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Err(io::Error::other("stream closed"))
        }

        fn consume(&mut self, _: usize) {}
    }

    #[test]
    fn read_failure_ends_session_gracefully() {
        let mut interpreter = Interpreter::new(Vec::new());
        run(FailingReader, &mut interpreter, &quiet()).unwrap();

        let out = String::from_utf8(interpreter.output().clone()).unwrap();
        assert!(out.ends_with("\nGoodbye!\n"));
    }

    #[test]
    fn banner_and_custom_prompt() {
        let config = Config {
            prompt: "todo> ".to_string(),
            ..Config::default()
        };
        let mut interpreter = Interpreter::new(Vec::new());
        run(Cursor::new("quit\n"), &mut interpreter, &config).unwrap();

        let out = String::from_utf8(interpreter.output().clone()).unwrap();
        assert_eq!(
            out,
            "Todo Application - Interactive CLI\n\
             Commands: add, delete, update, list, view, complete, mark, exit, quit\n\
             Type 'exit' or 'quit' to quit\n\
             \ntodo> Goodbye!\n"
        );
    }
}
