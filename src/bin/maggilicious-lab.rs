//! CLI companion to the noodle lab: roll, save and export recipes without the UI.

use std::path::PathBuf;

use maggilicious::config;
use maggilicious::logging::{self, FrontEnd};
use maggilicious::recipe_lab::{Recipe, RecipeComposer, RngPicker, SystemClock, export};
use maggilicious::recipe_lab::{Preset, SavedCollection};
use maggilicious::storage::FileStore;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    if let Err(err) = logging::init(FrontEnd::Cli) {
        eprintln!("Logging disabled: {err}");
    }
    let mut settings = config::load_or_warn();
    if let Some(preset) = options.preset {
        settings.preset = preset;
    }
    let store = match &options.store_dir {
        Some(dir) => FileStore::open(dir.clone()),
        None => FileStore::open_default(),
    }
    .map_err(|err| format!("Open recipe store failed: {err}"))?;
    let mut composer = RecipeComposer::new(
        settings.catalog(),
        store,
        RngPicker::thread(),
        SystemClock,
        settings.composer_options(),
    )
    .map_err(|err| format!("Invalid catalog: {err}"))?;

    match options.command {
        Command::Show => print_recipe(composer.recipe(), options.json)?,
        Command::Random { save } => {
            composer.randomize();
            if save {
                let saved = composer.save();
                print_recipe(&saved, options.json)?;
                println!("\nSaved ({} total).", composer.saved().len());
            } else {
                print_recipe(composer.recipe(), options.json)?;
            }
        }
        Command::List => print_saved(composer.saved()),
        Command::Remove { index } => {
            let removed = composer
                .remove_at(index - 1)
                .ok_or_else(|| no_entry(index, composer.saved()))?;
            println!("Removed {}.", removed.title);
        }
        Command::Clear => {
            let count = composer.saved().len();
            composer.clear_saved();
            println!("Cleared {count} saved recipe(s).");
        }
        Command::Export { index, out } => {
            let recipe = composer
                .saved()
                .get(index - 1)
                .ok_or_else(|| no_entry(index, composer.saved()))?;
            match out {
                Some(path) => {
                    export::write_json(recipe, &path)
                        .map_err(|err| format!("Export failed: {err}"))?;
                    println!("Wrote {}", path.display());
                }
                None => print_recipe(recipe, options.json)?,
            }
        }
    }
    Ok(())
}

fn print_recipe(recipe: &Recipe, json: bool) -> Result<(), String> {
    if json {
        let text = export::to_json(recipe).map_err(|err| err.to_string())?;
        println!("{text}");
    } else {
        println!("{}", export::to_text(recipe));
        println!(
            "~{} kcal • protein ~{}g",
            recipe.nutrition.energy_kcal, recipe.nutrition.protein_g
        );
    }
    Ok(())
}

fn print_saved(saved: &SavedCollection) {
    if saved.is_empty() {
        println!("No saved recipes.");
        return;
    }
    for (idx, recipe) in saved.entries().iter().enumerate() {
        println!(
            "{:>2}. {}  ({})",
            idx + 1,
            recipe.title,
            export::display_time(recipe.created_at)
        );
    }
}

fn no_entry(index: usize, saved: &SavedCollection) -> String {
    format!("No saved recipe #{index} ({} saved)", saved.len())
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Show,
    Random { save: bool },
    List,
    Remove { index: usize },
    Clear,
    Export { index: usize, out: Option<PathBuf> },
}

#[derive(Debug, PartialEq, Eq)]
struct Options {
    command: Command,
    preset: Option<Preset>,
    store_dir: Option<PathBuf>,
    json: bool,
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut command: Option<String> = None;
    let mut positional: Option<String> = None;
    let mut preset = None;
    let mut store_dir = None;
    let mut out: Option<PathBuf> = None;
    let mut json = false;
    let mut save = false;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--preset" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--preset requires a value".to_string())?;
                preset = Some(
                    Preset::from_name(value).ok_or_else(|| format!("Unknown preset: {value}"))?,
                );
            }
            "--store" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--store requires a value".to_string())?;
                store_dir = Some(PathBuf::from(value));
            }
            "--out" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--out requires a value".to_string())?;
                out = Some(PathBuf::from(value));
            }
            "--json" => json = true,
            "--save" => save = true,
            flag if flag.starts_with('-') => {
                return Err(format!("Unknown argument: {flag}\n\n{}", help_text()));
            }
            value if command.is_none() => command = Some(value.to_string()),
            value if positional.is_none() => positional = Some(value.to_string()),
            value => {
                return Err(format!("Unexpected argument: {value}\n\n{}", help_text()));
            }
        }
        idx += 1;
    }

    let name = command.as_deref().unwrap_or("show");
    let command = match name {
        "show" => Command::Show,
        "random" => Command::Random { save },
        "list" => Command::List,
        "remove" => Command::Remove {
            index: parse_index(positional.take().as_deref())?,
        },
        "clear" => Command::Clear,
        "export" => Command::Export {
            index: parse_index(positional.take().as_deref())?,
            out: out.take(),
        },
        other => return Err(format!("Unknown command: {other}\n\n{}", help_text())),
    };
    let stray = if save && !matches!(command, Command::Random { .. }) {
        Some("--save".to_string())
    } else if out.is_some() {
        Some("--out".to_string())
    } else {
        positional
    };
    if let Some(arg) = stray {
        return Err(format!("Unknown argument for {name}: {arg}\n\n{}", help_text()));
    }
    Ok(Some(Options {
        command,
        preset,
        store_dir,
        json,
    }))
}

fn parse_index(value: Option<&str>) -> Result<usize, String> {
    let value = value.ok_or_else(|| "A saved recipe number is required".to_string())?;
    match value.parse::<usize>() {
        Ok(index) if index >= 1 => Ok(index),
        _ => Err(format!("Invalid recipe number: {value}")),
    }
}

fn help_text() -> String {
    [
        "maggilicious-lab [command] [options]",
        "",
        "Commands:",
        "  show                 Print the default recipe (default)",
        "  random [--save]      Roll a surprise recipe, optionally saving it",
        "  list                 List saved recipes, newest first",
        "  remove <n>           Delete saved recipe number n",
        "  clear                Delete every saved recipe",
        "  export <n> [--out <path>]",
        "                       Print saved recipe n, or write it as JSON",
        "",
        "Options:",
        "  --preset <name>      noodle or ramen (overrides config.toml)",
        "  --store <dir>        Read and write recipes in <dir>",
        "  --json               Print recipes as JSON",
        "  -h, --help           Show this help",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn no_arguments_shows_default_recipe() {
        let options = parse_args(Vec::new()).unwrap().unwrap();
        assert_eq!(options.command, Command::Show);
        assert_eq!(options.preset, None);
        assert!(!options.json);
    }

    #[test]
    fn parses_random_save_with_preset() {
        let options = parse_args(args(&["random", "--save", "--preset", "ramen"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.command, Command::Random { save: true });
        assert_eq!(options.preset, Some(Preset::RamenBar));
    }

    #[test]
    fn parses_export_with_out_path() {
        let options = parse_args(args(&["export", "2", "--out", "bowl.json"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            options.command,
            Command::Export {
                index: 2,
                out: Some(PathBuf::from("bowl.json"))
            }
        );
    }

    #[test]
    fn rejects_zero_and_missing_indices() {
        assert!(parse_args(args(&["remove", "0"])).is_err());
        assert!(parse_args(args(&["remove"])).is_err());
        assert!(parse_args(args(&["export", "two"])).is_err());
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(parse_args(args(&["bake"])).is_err());
        assert!(parse_args(args(&["--oven"])).is_err());
        assert!(parse_args(args(&["--preset", "pho"])).is_err());
        assert!(parse_args(args(&["list", "extra", "more"])).is_err());
    }

    #[test]
    fn rejects_flags_and_values_the_command_does_not_take() {
        let err = parse_args(args(&["list", "--out", "x.json"])).unwrap_err();
        assert!(err.starts_with("Unknown argument for list: --out"));
        let err = parse_args(args(&["export", "1", "--save"])).unwrap_err();
        assert!(err.starts_with("Unknown argument for export: --save"));
        let err = parse_args(args(&["random", "3"])).unwrap_err();
        assert!(err.starts_with("Unknown argument for random: 3"));
        assert!(parse_args(args(&["--save"])).is_err());
        assert!(parse_args(args(&["random", "--save", "--json"])).is_ok());
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse_args(args(&["list", "--help"])).unwrap(), None);
    }
}
