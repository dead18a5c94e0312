//! Terminal output for registry listings and swap outcomes

use nitro_types::{ChainEntry, SwapOutcome};

/// Renders chains as an aligned `name  id  type` table.
pub fn render_chain_table<'a>(chains: impl IntoIterator<Item = &'a ChainEntry>) -> String {
    let rows: Vec<(&str, &str, &str, &str)> = chains
        .into_iter()
        .map(|c| {
            let status = if c.is_live { "live" } else { "inactive" };
            (c.name.as_str(), c.chain_id.as_str(), c.chain_type.as_str(), status)
        })
        .collect();

    let name_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(0).max(4);
    let id_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(0).max(8);
    let type_width = rows.iter().map(|r| r.2.len()).max().unwrap_or(0).max(4);

    let mut out = format!(
        "{:<name_width$}  {:<id_width$}  {:<type_width$}  STATUS\n",
        "NAME", "CHAIN ID", "TYPE"
    );
    for (name, id, kind, status) in rows {
        out.push_str(&format!(
            "{name:<name_width$}  {id:<id_width$}  {kind:<type_width$}  {status}\n"
        ));
    }
    out
}

pub fn render_outcome(outcome: &SwapOutcome, json: bool) -> String {
    if json {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| outcome.message.clone())
    } else {
        outcome.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_table_alignment() {
        let chains = vec![
            ChainEntry::new("Polygon", "137", "evm", true),
            ChainEntry::new("Boba Network", "288", "evm", false),
        ];
        let table = render_chain_table(&chains);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME          CHAIN ID"));
        assert_eq!(lines[1], "Polygon       137       evm   live");
        assert_eq!(lines[2], "Boba Network  288       evm   inactive");
    }

    #[test]
    fn test_outcome_as_json() {
        let outcome = SwapOutcome::failed("Failed: boom");
        let rendered = render_outcome(&outcome, true);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["stage"], "failed");
        assert_eq!(render_outcome(&outcome, false), "Failed: boom");
    }
}
