//! Export subcommand handler

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

use imgcsv::cli::ExportArgs;
use imgcsv::link::{BaseUrlResolver, LinkResolver, ManifestResolver};
use imgcsv::mapping::{Role, TokenTemplate};
use imgcsv::{Config, ExportError, ExportTable, Mapper, Mode, RoleAssignment};

use super::{build_tokenizer, collect_items, default_mode, load_config};

/// Export one row per image.
pub fn handle(args: &ExportArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let mode = args.source.mode.unwrap_or_else(|| default_mode(&args.source));
    if args.convention && mode != Mode::Folder {
        bail!(
            "--convention maps folder levels and needs folder mode; use --mode folder or --role POS=ROLE"
        );
    }
    let items = collect_items(&args.source, &config)?;
    let tokenizer = build_tokenizer(&args.source, &config, mode)?;
    // Convention positions count up from the image's own folder, so the
    // leaf must never be a token.
    let tokenizer = if args.convention {
        tokenizer.with_leaf(false)
    } else {
        tokenizer
    };
    let tag_label = args
        .tag_label
        .clone()
        .unwrap_or_else(|| config.mapping.custom_tag_label.clone());

    if items.is_empty() {
        warn!("{}; nothing exported", ExportError::EmptyInput);
        return Ok(());
    }

    let assignment = if args.convention {
        RoleAssignment::convention()
    } else if args.interactive {
        let Some(template) = TokenTemplate::build(&items, &tokenizer, args.pick) else {
            warn!("{}; nothing exported", ExportError::EmptyInput);
            return Ok(());
        };
        prompt_roles(&template, &tag_label)?
    } else {
        RoleAssignment::parse_specs(&args.roles, &tag_label)?
    };

    if assignment.is_empty() {
        bail!("No roles assigned; use --role POS=ROLE, --convention or --interactive");
    }
    for conflict in assignment.conflicts() {
        warn!("{}", conflict);
    }

    let resolver = build_resolver(args, &config)?;
    let mut mapper = Mapper::new(&tokenizer, &assignment);
    if let Some(resolver) = resolver.as_deref() {
        mapper = mapper.with_resolver(resolver);
    }

    let table = ExportTable::build(&items, &mapper)?;

    let mut export = config.export.clone();
    if args.filename_column {
        export.include_filename = true;
    }
    let headers = export.headers();

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let written = table.write(args.format, &headers, BufWriter::new(file))?;
            info!(rows = written, path = %path.display(), "Export written");
            println!("Exported {} row(s) to {}", written, path.display());
        }
        None => {
            let stdout = io::stdout();
            let written = table.write(args.format, &headers, stdout.lock())?;
            info!(rows = written, "Export written to stdout");
        }
    }
    Ok(())
}

/// Link resolver from the command line, falling back to the config.
fn build_resolver(args: &ExportArgs, config: &Config) -> Result<Option<Box<dyn LinkResolver>>> {
    if let Some(base) = &args.base_url {
        return Ok(Some(Box::new(BaseUrlResolver::new(base.as_str())?)));
    }
    if let Some(manifest) = &args.links {
        return Ok(Some(Box::new(ManifestResolver::load(manifest)?)));
    }
    if let Some(base) = &config.link.base_url {
        return Ok(Some(Box::new(
            BaseUrlResolver::new(base.as_str()).context("Invalid link.base_url in config")?,
        )));
    }
    if let Some(manifest) = &config.link.manifest {
        return Ok(Some(Box::new(
            ManifestResolver::load(manifest).context("Invalid link.manifest in config")?,
        )));
    }
    Ok(None)
}

/// Ask for the role of every template token.
///
/// An empty answer keeps the token ignored. Requires a terminal on stdin.
fn prompt_roles(template: &TokenTemplate, tag_label: &str) -> Result<RoleAssignment> {
    if !atty::is(atty::Stream::Stdin) {
        bail!("--interactive needs a terminal; use --role POS=ROLE or --convention instead");
    }

    eprintln!("Template from {}", template.identifier);
    eprintln!("Roles: ignore, itemcode, colorcode, tag, tag:<label> (empty = ignore)");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut roles = Vec::with_capacity(template.len());

    for (i, token) in template.tokens.iter().enumerate() {
        let role = loop {
            eprint!("  [{}] {:<20} role: ", i, token);
            io::stderr().flush()?;

            let Some(line) = lines.next() else {
                bail!("Input ended before all roles were assigned");
            };
            let line = line?;
            if line.trim().is_empty() {
                break Role::Ignore;
            }
            match Role::parse(&line, tag_label) {
                Some(role) => break role,
                None => eprintln!("  Unknown role '{}'", line.trim()),
            }
        };
        roles.push(role);
    }

    Ok(RoleAssignment::from_roles(roles))
}
