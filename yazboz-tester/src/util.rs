use anyhow::{Context, Result};

/// Split a comma-separated argument, trimming and dropping empty items.
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse seeds given as decimal or `0x`-prefixed hex.
pub fn parse_seeds(raw: &str) -> Result<Vec<u64>> {
    split_csv(raw)
        .iter()
        .map(|token| {
            let parsed = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .map_or_else(|| token.parse(), |hex| u64::from_str_radix(hex, 16));
            parsed.with_context(|| format!("invalid seed `{token}`"))
        })
        .collect()
}
