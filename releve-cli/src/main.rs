use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use releve_core::taxonomy::Taxonomy;
use releve_core::transaction::{AccountKind, Transaction};
use releve_core::working_set::{FieldEdit, WorkingSet};
use releve_ingest::Institution;
use releve_store::budget::load_taxonomy;
use releve_store::merge::append_rows;
use releve_store::{codec, layout};

mod config;
mod session;

#[derive(Parser, Debug)]
#[command(
    name = "releve",
    version,
    about = "Normalize bank statement exports into one canonical transaction store"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default config file
    Init,

    /// Parse a statement export, stage it, and open a categorization session
    Import {
        /// Statement source
        #[arg(long, value_enum)]
        source: Source,

        /// Path to the exported CSV
        file: PathBuf,
    },

    /// List the rows of the current categorization session
    Show,

    /// List budget categories and their sub-categories
    Categories,

    /// Set classification fields on one row of the session
    Set {
        /// Row index as printed by `show`
        row: usize,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        sub_category: Option<String>,
    },

    /// Flag a row as excluded from the final commit
    Ignore {
        /// Row index as printed by `show`
        row: usize,

        /// Clear the flag instead of setting it
        #[arg(long)]
        unset: bool,
    },

    /// Validate the session and merge it into the combined output store
    Commit,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Source {
    Rbc,
    NbcChecking,
    NbcCredit,
    ScotiaChecking,
    ScotiaCredit,
}

impl Source {
    fn institution(self) -> Institution {
        match self {
            Source::Rbc => Institution::Rbc,
            Source::NbcChecking => Institution::NbcChecking,
            Source::NbcCredit => Institution::NbcCredit,
            Source::ScotiaChecking => Institution::Scotia(AccountKind::Checking),
            Source::ScotiaCredit => Institution::Scotia(AccountKind::CreditCard),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("releve=info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Init => config::init_config(),
        Command::Import { source, file } => import(source, &file),
        Command::Show => show(),
        Command::Categories => categories(),
        Command::Set {
            row,
            category,
            sub_category,
        } => {
            let mut edits = Vec::new();
            if let Some(category) = category {
                edits.push(FieldEdit::Category(category));
            }
            if let Some(sub) = sub_category {
                edits.push(FieldEdit::SubCategory(sub));
            }
            if edits.is_empty() {
                bail!("nothing to set; pass --category and/or --sub-category");
            }
            apply_edits(row, edits)
        }
        Command::Ignore { row, unset } => apply_edits(row, vec![FieldEdit::Ignore(!unset)]),
        Command::Commit => commit(),
    }
}

fn import(source: Source, file: &Path) -> Result<()> {
    if session::read_session()?.is_some() {
        bail!("a categorization session is already open; `releve commit` it first");
    }

    let cfg = config::load_config()?;
    let store = cfg.open_store()?;
    let env = cfg.env()?;
    let institution = source.institution();

    let bytes = fs::read(file).with_context(|| format!("read {}", file.display()))?;
    let table = institution
        .read_statement(&bytes)
        .with_context(|| format!("reading {}", file.display()))?;
    let rows = match institution.parse(&table) {
        Ok(rows) => rows,
        Err(err) => bail!(
            "statement rejected (status {}): {err}; verify the file matches the selected source",
            err.code()
        ),
    };
    if rows.is_empty() {
        bail!("no transactions found in {}", file.display());
    }

    let key = layout::staging_key(env, institution.staging_file());
    let report = append_rows(
        store.as_ref(),
        &cfg.store.bucket,
        &key,
        codec::STAGING_COLUMNS,
        &codec::staging_records(&rows),
    )?;
    println!(
        "Staged {} row(s) to {key} ({} new, {} duplicate)",
        rows.len(),
        report.appended,
        report.duplicates
    );

    let set = WorkingSet::new(rows);
    session::write_session(&set)?;
    println!(
        "Opened categorization session with {} row(s); run `releve show`",
        set.len()
    );
    Ok(())
}

fn show() -> Result<()> {
    let Some(set) = session::read_session()? else {
        println!("No open session. Run `releve import` first.");
        return Ok(());
    };
    for (i, row) in set.rows().iter().enumerate() {
        println!("{i:>3}  {}", format_row(row));
    }
    Ok(())
}

fn categories() -> Result<()> {
    let cfg = config::load_config()?;
    let store = cfg.open_store()?;
    let taxonomy = load_taxonomy(store.as_ref(), &cfg.store.bucket)?;
    for category in taxonomy.categories() {
        println!("{category}");
        for sub in taxonomy.sub_categories(category) {
            println!("    {sub}");
        }
    }
    Ok(())
}

fn apply_edits(row: usize, edits: Vec<FieldEdit>) -> Result<()> {
    let Some(mut set) = session::read_session()? else {
        bail!("no open session; run `releve import` first");
    };
    let cfg = config::load_config()?;
    let taxonomy = if edits.iter().any(|e| !matches!(e, FieldEdit::Ignore(_))) {
        let store = cfg.open_store()?;
        load_taxonomy(store.as_ref(), &cfg.store.bucket)?
    } else {
        Taxonomy::default()
    };

    for edit in edits {
        set.set_field(row, edit, &taxonomy)?;
    }
    session::write_session(&set)?;
    println!("{row:>3}  {}", format_row(&set.rows()[row]));
    Ok(())
}

fn commit() -> Result<()> {
    let Some(mut set) = session::read_session()? else {
        bail!("no open session; run `releve import` first");
    };
    let cfg = config::load_config()?;
    let store = cfg.open_store()?;
    let env = cfg.env()?;

    let rows = match set.commit_candidates() {
        Ok(rows) => rows,
        Err(incomplete) => {
            println!(
                "Cannot commit: {} row(s) still missing a category or sub-category:",
                incomplete.rows.len()
            );
            for &i in &incomplete.rows {
                println!("{i:>3}  {}", format_row(&set.rows()[i]));
            }
            bail!("categorize every row (or flag it with `releve ignore`) before committing");
        }
    };

    if rows.is_empty() {
        set.clear();
        session::clear_session()?;
        println!("Every row was flagged ignored; nothing to commit.");
        return Ok(());
    }

    let key = layout::output_key(env);
    let report = append_rows(
        store.as_ref(),
        &cfg.store.bucket,
        &key,
        codec::OUTPUT_COLUMNS,
        &codec::output_records(&rows),
    )?;
    set.clear();
    session::clear_session()?;
    println!(
        "Committed {} row(s) to {key} ({} new, {} duplicate)",
        rows.len(),
        report.appended,
        report.duplicates
    );
    Ok(())
}

fn format_row(row: &Transaction) -> String {
    let class = if row.is_classified() {
        format!("{} / {}", row.category, row.sub_category)
    } else if row.category.is_empty() {
        "-".to_string()
    } else {
        format!("{} / ?", row.category)
    };
    let marker = if row.to_ignore { "  [ignored]" } else { "" };
    format!(
        "{}  {:>10.2}  {:<7}  {}  [{}]{}",
        row.date,
        row.amount,
        row.kind.as_str(),
        row.description,
        class,
        marker
    )
}
