use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, info_span, warn};

use menu_model::{DateKey, MealType, Week};
use menu_report::{
    EXPORT_FILE_NAME, export_document, offline_file_name, read_import_file, write_export,
    write_offline_html,
};
use menu_store::{FileBackend, MenuStore};

use crate::cli::{
    AddArgs, Cli, Command, DishesCommand, ExportArgs, ImportArgs, MoveArgs, RemoveArgs,
    SnapshotArgs, WeekArgs, WeekSelection,
};
use crate::settings::{Settings, load_settings, resolve_data_dir, settings_path};
use crate::week_view::{catalog_table, week_table};

type Store = MenuStore<FileBackend>;

pub fn run(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref());
    let data_dir = resolve_data_dir(cli.data_dir.as_deref(), &settings);
    if let Command::Config = cli.command {
        run_config(cli, &data_dir);
        return Ok(());
    }
    let mut store = open_store(&data_dir)?;
    match &cli.command {
        Command::Week(args) => run_week(&store, args, &settings),
        Command::Add(args) => run_add(&mut store, args),
        Command::Remove(args) => run_remove(&mut store, args),
        Command::Move(args) => run_move(&mut store, args),
        Command::Dishes(command) => run_dishes(&mut store, command),
        Command::Export(args) => run_export(&store, args),
        Command::Import(args) => run_import(&mut store, args),
        Command::Snapshot(args) => run_snapshot(&store, args),
        Command::Config => Ok(()),
    }
}

fn open_store(data_dir: &Path) -> Result<Store> {
    let span = info_span!("load", data_dir = %data_dir.display());
    let _guard = span.enter();
    let mut store = MenuStore::new(FileBackend::new(data_dir));
    let report = store.load().context("load menu store")?;
    if report.migrated_slots > 0 {
        info!(slots = report.migrated_slots, "legacy meals upgraded");
    }
    for error in &report.recovered {
        eprintln!("warning: {}", error.user_message());
        if let Some(hint) = error.suggestion() {
            eprintln!("hint: {hint}");
        }
    }
    Ok(store)
}

fn today() -> NaiveDate {
    DateKey::today().date()
}

fn selected_week(selection: WeekSelection) -> Week {
    let week = match selection.date {
        Some(date) => Week::containing(date.date()),
        None => Week::current(),
    };
    week.offset(selection.offset)
}

fn run_week(store: &Store, args: &WeekArgs, settings: &Settings) -> Result<()> {
    let week = selected_week(args.week);
    let table = week_table(
        &week,
        store.menu()?,
        today(),
        settings.display.show_empty_slots,
    );
    println!("{}", week.label());
    println!("{table}");
    Ok(())
}

fn run_add(store: &mut Store, args: &AddArgs) -> Result<()> {
    if args.from_catalog {
        store.add_catalog_dish(args.date, args.meal, &args.dish)?;
    } else {
        store.add_dish(args.date, args.meal, &args.dish)?;
    }
    print_slot(store, args.date, args.meal)
}

fn run_remove(store: &mut Store, args: &RemoveArgs) -> Result<()> {
    let index = to_index(args.position);
    let removed = store.remove_dish(args.date, args.meal, index)?;
    println!("Удалено: {removed}");
    print_slot(store, args.date, args.meal)
}

fn run_move(store: &mut Store, args: &MoveArgs) -> Result<()> {
    let index = to_index(args.position);
    match store.move_dish(
        args.from_date,
        args.from_meal,
        index,
        args.to_date,
        args.to_meal,
    )? {
        Some(dish) => println!("Перемещено: {dish}"),
        None => println!("Блюдо уже в этом приёме пищи."),
    }
    print_slot(store, args.from_date, args.from_meal)?;
    print_slot(store, args.to_date, args.to_meal)
}

fn run_dishes(store: &mut Store, command: &DishesCommand) -> Result<()> {
    match command {
        DishesCommand::List => {
            println!("{}", catalog_table(store.catalog()?));
        }
        DishesCommand::Add { name } => {
            store.add_to_catalog(name)?;
            println!("Добавлено в список блюд: {}", name.trim());
        }
        DishesCommand::Remove { name } => {
            if store.remove_from_catalog(name)? {
                println!("Удалено из списка блюд: {}", name.trim());
            } else {
                warn!(dish = name.trim(), "dish not in catalog");
                println!("Блюда «{}» нет в списке.", name.trim());
            }
        }
    }
    Ok(())
}

fn run_export(store: &Store, args: &ExportArgs) -> Result<()> {
    let snapshot = store.export_snapshot()?;
    if args.stdout {
        println!("{}", export_document(&snapshot)?);
        return Ok(());
    }
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
    write_export(&snapshot, &path).with_context(|| format!("export to {}", path.display()))?;
    println!("Меню сохранено: {}", path.display());
    Ok(())
}

fn run_import(store: &mut Store, args: &ImportArgs) -> Result<()> {
    let span = info_span!("import", path = %args.path.display());
    let _guard = span.enter();
    let contents = read_import_file(&args.path)
        .with_context(|| format!("read {}", args.path.display()))?;
    store.import_json(&contents)?;
    println!("Меню успешно загружено!");
    Ok(())
}

fn run_snapshot(store: &Store, args: &SnapshotArgs) -> Result<()> {
    let week = selected_week(args.week);
    let today = today();
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(offline_file_name(today)));
    write_offline_html(&path, &week, store.menu()?, today)
        .with_context(|| format!("write {}", path.display()))?;
    println!("{}: {}", week.label(), path.display());
    Ok(())
}

fn run_config(cli: &Cli, data_dir: &Path) {
    let settings_file = cli.config.clone().or_else(settings_path);
    match settings_file {
        Some(path) => println!("Settings: {}", path.display()),
        None => println!("Settings: (none)"),
    }
    println!("Data: {}", data_dir.display());
}

fn print_slot(store: &Store, date: DateKey, meal: MealType) -> Result<()> {
    let dishes = store.dishes(date, meal)?;
    println!("{date} {}:", meal.label());
    if dishes.is_empty() {
        println!("  -");
    }
    for (index, dish) in dishes.iter().enumerate() {
        println!("  {}. {dish}", index + 1);
    }
    Ok(())
}

/// Positions on the command line start at 1.
fn to_index(position: usize) -> usize {
    position.checked_sub(1).unwrap_or(usize::MAX)
}
