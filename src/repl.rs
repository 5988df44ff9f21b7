use crate::environment::Environment;
use crate::evaluator;
use crate::json;
use crate::lexer::Lexer;
use crate::parser::Parser;
use std::io::{self, BufRead, Write};

static PROMPT: &str = ">> ";

/// Reads one line at a time until end of input. Variables survive between
/// lines; records a line emits are printed as compact JSON right away.
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    let mut env = Environment::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        match Parser::new(Lexer::new(line)).parse_program() {
            Err(err) => writeln!(output, "\t{}", err)?,
            Ok(program) => match evaluator::eval(&program, &mut env) {
                Ok(()) => {
                    let records = env.take_output();
                    if !records.is_empty() {
                        match json::to_json(&records, false) {
                            Ok(text) => writeln!(output, "{}", text)?,
                            Err(err) => writeln!(output, "ERROR: {}", err)?,
                        }
                    }
                }
                Err(err) => writeln!(output, "ERROR: {}", err)?,
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn session(input: &str) -> String {
        let mut output = vec![];
        start(input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_bindings_persist_between_lines() {
        let output = session("num(n) { 3 }\nobj(\"A\", n) { str(tag) { hello } }\n");

        assert_eq!(
            output,
            ">> >> [{\"class\":\"A\",\"id\":3,\"tag\":\"hello\"}]\n>> \n"
        );
    }

    #[test]
    fn test_errors_do_not_end_the_session() {
        let output = session("obj(\"A\", 1 {\nx = 1 / 0\nobj(\"B\", 2) {}\n");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            ">> \tParse error (line 1): expected ')' after the object id, found '{'"
        );
        assert_eq!(
            lines[1],
            ">> ERROR: Runtime error (line 1): division by zero"
        );
        assert_eq!(lines[2], ">> [{\"class\":\"B\",\"id\":2}]");
    }
}
