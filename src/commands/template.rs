//! Template subcommand handler

use anyhow::Result;
use serde_json::json;
use tracing::warn;
use unicode_width::UnicodeWidthStr;

use imgcsv::cli::TemplateArgs;
use imgcsv::mapping::TokenTemplate;
use imgcsv::{ExportError, Mode, RawItem};

use super::{build_tokenizer, collect_items, default_mode, load_config};

/// Print the token positions of a sample image.
pub fn handle(args: &TemplateArgs, config_path: Option<&std::path::Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let mode = args.source.mode.unwrap_or_else(|| default_mode(&args.source));
    let items = collect_items(&args.source, &config)?;
    let tokenizer = build_tokenizer(&args.source, &config, mode)?;

    let Some(template) = TokenTemplate::build(&items, &tokenizer, args.pick) else {
        warn!("{}", ExportError::EmptyInput);
        return Ok(());
    };

    if args.json {
        let value = template_json(&template, mode, &items, args.samples);
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", render_template(&template, mode, &items, args.samples));
    }
    Ok(())
}

fn template_json(
    template: &TokenTemplate,
    mode: Mode,
    items: &[RawItem],
    samples: usize,
) -> serde_json::Value {
    let len = template.len();
    let tokens: Vec<serde_json::Value> = template
        .tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            json!({
                "position": i,
                "from_end": -((len - i) as i64),
                "token": token,
            })
        })
        .collect();
    let examples: Vec<&str> = items
        .iter()
        .take(samples)
        .map(|i| i.identifier.as_str())
        .collect();

    json!({
        "identifier": template.identifier,
        "mode": mode.to_string(),
        "tokens": tokens,
        "items": items.len(),
        "examples": examples,
    })
}

/// Column-aligned listing of template tokens with both position forms.
fn render_template(
    template: &TokenTemplate,
    mode: Mode,
    items: &[RawItem],
    samples: usize,
) -> String {
    let mut out = format!("Template from {} ({} mode)\n\n", template.identifier, mode);

    if template.is_empty() {
        out.push_str("  (no tokens)\n");
    } else {
        let len = template.len();
        let token_width = template
            .tokens
            .iter()
            .map(|t| display_token(t).width())
            .chain(std::iter::once("TOKEN".width()))
            .max()
            .unwrap_or(0);

        out.push_str(&format!("  {:<4} {} FROM END\n", "POS", pad("TOKEN", token_width)));
        for (i, token) in template.tokens.iter().enumerate() {
            out.push_str(&format!(
                "  {:<4} {} -{}\n",
                i,
                pad(display_token(token), token_width),
                len - i
            ));
        }
    }

    out.push_str(&format!("\n{} image(s)", items.len()));
    let examples: Vec<&RawItem> = items.iter().take(samples).collect();
    if !examples.is_empty() {
        out.push_str(", e.g.:\n");
        for item in examples {
            out.push_str(&format!("  {}\n", item.identifier));
        }
    } else {
        out.push('\n');
    }
    out
}

fn display_token(token: &str) -> &str {
    if token.is_empty() {
        "(empty)"
    } else {
        token
    }
}

/// Left-align by display width so wide characters line up.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}
