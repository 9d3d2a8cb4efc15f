use std::io::Write;

/// Prompt and read one line. `None` once stdin is closed.
pub fn readline() -> Result<Option<String>, String> {
    let mut stdout = std::io::stdout();
    write!(stdout, "waymark> ").map_err(|e| e.to_string())?;
    stdout.flush().map_err(|e| e.to_string())?;

    let mut buffer = String::new();
    let read = std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(buffer))
}

/// Entity ids are printed in hex, so accept both `0x1f` and `31`
pub fn parse_entity_id(value: &str) -> Result<u64, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("invalid entity id '{value}': {e}"))
}
