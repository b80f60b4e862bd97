use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::application::error::AppError;
use crate::infra::error::InfraError;

/// Inline value or file contents; the file wins when both are given.
pub fn read_opt_value(
    val: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, AppError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path).map_err(InfraError::from)?;
        return Ok(Some(data));
    }
    Ok(val)
}

/// Ask a yes/no question; anything but `y`/`yes` declines.
pub fn confirm(
    prompt: &str,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<bool, AppError> {
    write!(output, "{prompt} [y/N] ").map_err(InfraError::from)?;
    output.flush().map_err(InfraError::from)?;

    let mut answer = String::new();
    input.read_line(&mut answer).map_err(InfraError::from)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
