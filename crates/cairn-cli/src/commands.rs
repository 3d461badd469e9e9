use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context};
use cairn_crypto::ContentHasher;
use cairn_sdk::Repository;
use cairn_tree::Tree;
use cairn_types::{ObjectId, ObjectKind};
use colored::Colorize;
use serde_json::json;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    let dir = cli.dir;
    match cli.command {
        Command::Init(args) => cmd_init(&dir, args),
        Command::HashObject(args) => cmd_hash_object(&dir, format, args),
        Command::CatFile(args) => cmd_cat_file(&dir, args),
        Command::WriteTree(args) => cmd_write_tree(&dir, format, args),
        Command::LsTree(args) => cmd_ls_tree(&dir, format, args),
        Command::Verify(args) => cmd_verify(&dir, format, args),
    }
}

fn cmd_init(dir: &Path, args: InitArgs) -> anyhow::Result<()> {
    let path = args.path.unwrap_or_else(|| dir.to_path_buf());
    let repo = Repository::init(&path)
        .with_context(|| format!("failed to create repository in {}", path.display()))?;
    println!(
        "{} Initialized cairn repository in {}",
        "✓".green().bold(),
        repo.meta_dir().display().to_string().bold()
    );
    Ok(())
}

fn cmd_hash_object(dir: &Path, format: OutputFormat, args: HashObjectArgs) -> anyhow::Result<()> {
    if args.files.is_empty() && !args.stdin {
        bail!("nothing to hash: pass files or --stdin");
    }
    let repo = if args.write {
        Some(Repository::discover(dir)?)
    } else {
        None
    };
    let hash = |reader: &mut dyn io::Read| -> anyhow::Result<ObjectId> {
        Ok(match &repo {
            Some(repo) => repo.hash_object(args.kind, reader, true)?,
            None => ContentHasher::new(args.kind).hash_reader(reader)?,
        })
    };

    let mut results = Vec::new();
    if args.stdin {
        let id = hash(&mut io::stdin().lock()).context("could not hash standard input")?;
        results.push(("-".to_string(), id));
    }
    for path in &args.files {
        let mut file = File::open(path)
            .with_context(|| format!("could not open {} for reading", path.display()))?;
        let id = hash(&mut file).with_context(|| format!("could not hash {}", path.display()))?;
        results.push((path.display().to_string(), id));
    }

    match format {
        OutputFormat::Text => {
            for (_, id) in &results {
                println!("{id}");
            }
        }
        OutputFormat::Json => {
            let out: Vec<_> = results
                .iter()
                .map(|(path, id)| json!({ "path": path, "id": id, "kind": args.kind }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}

fn cmd_cat_file(dir: &Path, args: CatFileArgs) -> anyhow::Result<()> {
    let repo = Repository::discover(dir)?;
    let mut stdout = io::stdout().lock();
    match (args.pretty, args.args.as_slice()) {
        (true, [id]) => {
            let id: ObjectId = id.parse()?;
            let object = repo.read_object(&id)?;
            if object.kind() == ObjectKind::Tree {
                for entry in Tree::from_object(&object)?.entries() {
                    writeln!(stdout, "{} {}\t{}", entry.kind, entry.id, entry.name)?;
                }
            } else {
                stdout.write_all(object.payload())?;
            }
        }
        (false, [kind, id]) => {
            let kind: ObjectKind = kind.parse()?;
            let id: ObjectId = id.parse()?;
            let object = repo.cat_file(kind, &id)?;
            stdout.write_all(object.payload())?;
        }
        (true, _) => bail!("usage: cairn cat-file -p <OBJECT>"),
        (false, _) => bail!("usage: cairn cat-file <TYPE> <OBJECT>"),
    }
    stdout.flush()?;
    Ok(())
}

fn cmd_write_tree(dir: &Path, format: OutputFormat, args: WriteTreeArgs) -> anyhow::Result<()> {
    let repo = Repository::discover(dir)?;
    let tree = match &args.prefix {
        Some(prefix) => repo.write_tree_at(prefix)?,
        None => repo.write_tree()?,
    };
    match format {
        OutputFormat::Text => println!("{}", tree.id()),
        OutputFormat::Json => println!("{}", json!({ "id": tree.id() })),
    }
    Ok(())
}

fn cmd_ls_tree(dir: &Path, format: OutputFormat, args: LsTreeArgs) -> anyhow::Result<()> {
    let repo = Repository::discover(dir)?;
    let tree = repo.ls_tree(&args.tree)?;
    match format {
        OutputFormat::Text => {
            for entry in tree.entries() {
                let kind = match entry.kind {
                    ObjectKind::Tree => entry.kind.to_string().blue(),
                    _ => entry.kind.to_string().normal(),
                };
                println!("{} {}\t{}", kind, entry.id, entry.name);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(tree.entries())?),
    }
    Ok(())
}

fn cmd_verify(dir: &Path, format: OutputFormat, args: VerifyArgs) -> anyhow::Result<()> {
    let repo = Repository::discover(dir)?;
    let mut failures = 0usize;
    let mut report = Vec::new();
    for id in &args.objects {
        match repo.verify(id) {
            Ok(object) => {
                if format == OutputFormat::Text {
                    println!("{} {} {}", "✓".green().bold(), id, object.kind());
                }
                report.push(json!({ "id": id, "ok": true }));
            }
            Err(e) => {
                failures += 1;
                if format == OutputFormat::Text {
                    println!("{} {} {}", "✗".red().bold(), id, e);
                }
                report.push(json!({ "id": id, "ok": false, "error": e.to_string() }));
            }
        }
    }
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    if failures > 0 {
        bail!("{failures} object(s) failed verification");
    }
    Ok(())
}
