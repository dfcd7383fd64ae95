// Namepick CLI
// Filters a candidate list from the command line and inspects the match tables

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use namepick_core::{
    expand_to_all_layouts, load_candidates, Config, FilterEngine, LayoutTable, Matcher,
    SelectorId, TranslitDictionary, UserRecord,
};

/// Layout and transliteration aware name filter
#[derive(Parser, Debug)]
#[command(name = "namepick")]
#[command(author = "namepick contributors")]
#[command(version)]
#[command(about = "Filter people by name, whatever layout or spelling was typed", long_about = None)]
struct Args {
    /// TOML configuration file (default: ~/.config/namepick/config.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// JSON file with a list of {id, first_name, last_name} records
    #[arg(short, long, value_name = "FILE")]
    users: Option<PathBuf>,

    /// Filter to apply to the users file
    #[arg(short, long, value_name = "TEXT", requires = "users")]
    filter: Option<String>,

    /// Print TEXT as typed on every known layout
    #[arg(long, value_name = "TEXT")]
    variants: Option<String>,

    /// Print the compiled pattern for each token of TOKEN
    #[arg(long, value_name = "TOKEN")]
    pattern: Option<String>,

    /// Print the transliteration dictionary in substitution priority order
    #[arg(long)]
    dump_dictionary: bool,

    /// Validate config and exit
    #[arg(long)]
    check_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Tables resolved from the configuration
struct Tables {
    config: Config,
    layouts: Arc<LayoutTable>,
    dictionary: Arc<TranslitDictionary>,
}

impl Tables {
    fn load(path: Option<&PathBuf>) -> Result<Self> {
        let config = match path {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::load_default().context("failed to load default config")?,
        };
        let layouts = config.layout_table().context("invalid layout table")?;
        let dictionary = config.dictionary().context("invalid transliteration table")?;

        Ok(Self {
            config,
            layouts,
            dictionary,
        })
    }

    fn matcher(&self) -> Matcher {
        Matcher::new(self.layouts.clone(), self.dictionary.clone())
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn print_variants(layouts: &LayoutTable, text: &str) {
    for variant in expand_to_all_layouts(layouts, text) {
        println!("{}\t{}", variant.locale, variant.value);
    }
}

fn print_patterns(matcher: &Matcher, text: &str) {
    for pattern in matcher.compile_filter(text) {
        println!("{}\t{}", pattern.token(), pattern.as_str());
    }
}

fn print_dictionary(dictionary: &TranslitDictionary) {
    for key in dictionary.keys_by_priority() {
        let alternatives = dictionary.get(key).unwrap_or_default();
        println!("{}\t{}", key, alternatives.join("|"));
    }
}

fn format_user(user: &UserRecord) -> String {
    format!("{}\t{}", user.id, user.display_name())
}

fn run_filter(matcher: Matcher, users_path: &Path, filter: Option<&str>) -> Result<()> {
    let users = load_candidates(users_path)
        .with_context(|| format!("failed to load users from {}", users_path.display()))?;

    let mut engine = FilterEngine::new(matcher);
    match engine.filter(Some(&users), filter, SelectorId::next()) {
        Some(ids) => {
            let by_id: HashMap<_, _> = users.iter().map(|u| (u.id, u)).collect();
            for id in ids.iter() {
                if let Some(user) = by_id.get(id) {
                    println!("{}", format_user(user));
                }
            }
            log::debug!("{} of {} users matched", ids.len(), users.len());
        }
        None => {
            for user in &users {
                println!("{}", format_user(user));
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let tables = Tables::load(args.config.as_ref())?;

    if args.check_config {
        println!(
            "Configuration is valid: {} layouts, {} transliteration keys",
            tables.layouts.len(),
            tables.dictionary.len()
        );
        if let Some(path) = tables.config.source_path() {
            println!("Loaded from {}", path.display());
        }
        return Ok(());
    }

    let mut did_something = false;

    if let Some(text) = &args.variants {
        print_variants(&tables.layouts, text);
        did_something = true;
    }

    if let Some(text) = &args.pattern {
        print_patterns(&tables.matcher(), text);
        did_something = true;
    }

    if args.dump_dictionary {
        print_dictionary(&tables.dictionary);
        did_something = true;
    }

    if let Some(users) = &args.users {
        run_filter(tables.matcher(), users, args.filter.as_deref())?;
        did_something = true;
    }

    if !did_something {
        bail!("nothing to do: pass --users, --variants, --pattern, --dump-dictionary or --check-config");
    }
    Ok(())
}
