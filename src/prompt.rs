use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::input::SourceSpec;

/// Prompt with a message and return the trimmed input line.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        anyhow::bail!("Input closed while waiting for an answer");
    }
    Ok(line.trim().to_string())
}

/// Prompt with a default value. Returns the default if input is empty.
fn prompt_with_default<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default: &str,
) -> Result<String> {
    let answer = prompt(input, output, &format!("{} [{}]: ", message, default))?;
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer)
    }
}

/// Ask for one source's weight until a non-negative number (or nothing) is given.
/// Accepts a decimal comma.
pub fn prompt_weight<R: BufRead, W: Write>(input: &mut R, output: &mut W, spec: &SourceSpec) -> Result<f64> {
    let message = format!("Weight for {} ({})", spec.path.display(), spec.label);
    loop {
        let answer = prompt_with_default(input, output, &message, &spec.weight.to_string())?;
        match answer.replace(',', ".").parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => return Ok(v),
            _ => writeln!(output, "  Invalid: must be a non-negative number. Try again.")
                .context("Failed to write prompt")?,
        }
    }
}

/// Ask for every source's weight on the terminal, keeping the current weight
/// as the default answer.
pub fn prompt_weights(specs: &mut [SourceSpec]) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    for spec in specs.iter_mut() {
        spec.weight = prompt_weight(&mut input, &mut output, spec)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn spec() -> SourceSpec {
        SourceSpec {
            path: PathBuf::from("google.xlsx"),
            label: "Datei 1".to_string(),
            weight: 1.0,
        }
    }

    fn ask(answers: &str) -> (Result<f64>, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = prompt_weight(&mut input, &mut output, &spec());
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_empty_answer_keeps_default() {
        let (result, output) = ask("\n");
        assert_eq!(result.unwrap(), 1.0);
        assert!(output.contains("Weight for google.xlsx (Datei 1) [1]: "));
    }

    #[test]
    fn test_decimal_comma() {
        let (result, _) = ask("2,5\n");
        assert_eq!(result.unwrap(), 2.5);
    }

    #[test]
    fn test_retries_until_valid() {
        let (result, output) = ask("-1\nviel\n3\n");
        assert_eq!(result.unwrap(), 3.0);
        assert_eq!(output.matches("Invalid").count(), 2);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let (result, _) = ask("");
        assert!(result.is_err());
    }
}
