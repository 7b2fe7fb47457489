use anyhow::{bail, Context, Result};
use std::path::Path;

/// Reads a replay file: whitespace-separated hex scan-code bytes, with `#`
/// starting a comment that runs to end of line.
pub fn load(path: &Path) -> Result<Vec<u8>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading replay file {}", path.display()))?;
    parse_bytes(&text)
}

pub fn parse_bytes(text: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    for line in text.lines() {
        let line = line.split('#').next().unwrap_or("");
        for token in line.split_whitespace() {
            let token = token.trim_start_matches("0x").trim_start_matches("0X");
            let padded;
            let token = if token.len() % 2 == 1 {
                padded = format!("0{token}");
                &padded
            } else {
                token
            };
            let decoded = hex::decode(token)
                .with_context(|| format!("bad hex token {token:?}"))?;
            bytes.extend(decoded);
        }
    }
    if bytes.is_empty() {
        bail!("replay input contained no scan-code bytes");
    }
    Ok(bytes)
}
