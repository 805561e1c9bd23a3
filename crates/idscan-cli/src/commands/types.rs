//! Types command - list supported document types.

use clap::Args;
use console::style;
use serde::Serialize;

use idscan_core::REGISTRY;

/// Arguments for the types command.
#[derive(Args)]
pub struct TypesArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,

    /// Also print each field's pattern
    #[arg(long)]
    patterns: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TypeInfo<'a> {
    document_type: &'a str,
    description: &'a str,
    fields: Vec<&'a str>,
}

pub fn run(args: TypesArgs) -> anyhow::Result<()> {
    let registry = &*REGISTRY;

    if args.json {
        let types: Vec<TypeInfo> = registry
            .document_types()
            .into_iter()
            .filter_map(|t| {
                registry.get(t).map(|set| TypeInfo {
                    document_type: t.as_str(),
                    description: t.description(),
                    fields: set.field_names(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&types)?);
        return Ok(());
    }

    for t in registry.document_types() {
        let Some(set) = registry.get(t) else {
            continue;
        };

        println!("{} ({})", style(t.as_str()).bold(), t.description());
        for pattern in set.iter() {
            if args.patterns {
                println!("  - {:16} {}", pattern.field(), style(pattern.as_str()).dim());
            } else {
                println!("  - {}", pattern.field());
            }
        }
    }

    Ok(())
}
