// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use portfolio_app::{CategoryId, ImageFile, LoginForm, SessionStore, WorkId, mime_type_for_path};
use portfolio_store::Store;
use portfolio_ui::dom::DELETE_ID_ATTR;
use portfolio_ui::{
    Confirm, ErrorSlot, ModalEvent, Page, PageEvent, Region, UiEvent, log_out, submit_login,
};
use runtime::{HttpRuntime, PromptConfirm};
use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_LOG_FILTER: &str = "portfolio=info";

fn main() {
    init_tracing();
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PORTFOLIO_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `portfolio --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let db_path = config.db_path()?;
    let store = Store::open(&db_path).with_context(|| {
        format!(
            "open session database {} -- if this path is wrong, set [storage].db_path or PORTFOLIO_DB_PATH",
            db_path.display()
        )
    })?;
    store.bootstrap()?;

    let client = portfolio_api::Client::new(config.api_base_url(), config.api_timeout()?)
        .with_context(|| {
            format!(
                "invalid [api] config in {}; fix base_url/timeout values",
                options.config_path.display()
            )
        })?;
    if options.check_only {
        return Ok(());
    }

    let Some(command) = options.command else {
        bail!("missing command; run with --help to see supported commands");
    };
    let runtime = HttpRuntime::new(client);
    let mut session = SessionStore::new(store);
    debug!(?command, "running command");

    match command {
        Command::Status => {
            let current = session.session()?;
            match current.user_id.filter(|_| current.is_authenticated()) {
                Some(user_id) => println!("logged in as user {user_id}"),
                None => println!("not logged in"),
            }
        }
        Command::Login { email } => {
            let password = read_password()?;
            let form = LoginForm { email, password };
            let mut slot = ErrorSlot::default();
            let logged_in = submit_login(&runtime, &mut session, &form, &mut slot)
                .map_err(|error| anyhow!(error.user_message()).context(error))?;
            if let Some(user_id) = logged_in.user_id {
                println!("logged in as user {user_id}");
            }
        }
        Command::Logout => {
            log_out(&mut session)?;
            println!("logged out");
        }
        Command::Render { out, category } => {
            let mut page = Page::load(&runtime, &session)?;
            if let Some(id) = category {
                let filter = page
                    .catalog()
                    .categories_for()
                    .into_iter()
                    .find(|filter| filter.category_id() == Some(id))
                    .ok_or_else(|| anyhow!("no work in the gallery belongs to category {id}"))?;
                page.select_filter(filter);
            }
            let html = page.to_html(config.gallery_title());
            match out {
                Some(path) => fs::write(&path, html)
                    .with_context(|| format!("write page {}", path.display()))?,
                None => print!("{html}"),
            }
        }
        Command::Delete { id, yes } => {
            let mut page = admin_page(&runtime, &session)?;
            let events = if yes {
                delete_work(&mut page, id, &mut |_: &str| true)
            } else {
                let stdin = io::stdin();
                let mut prompt = PromptConfirm::new(stdin.lock(), io::stderr());
                delete_work(&mut page, id, &mut prompt)
            }?;
            if events.contains(&PageEvent::Modal(ModalEvent::WorkDeleted(id))) {
                println!("deleted work {id}");
            } else {
                println!("kept work {id}");
            }
        }
        Command::Add {
            image,
            title,
            category,
        } => {
            let file = read_image(&image)?;
            let mut page = admin_page(&runtime, &session)?;
            let id = add_work(&mut page, file, title, category)?;
            println!("added work {id}");
        }
    }

    Ok(())
}

fn admin_page<'a>(
    runtime: &'a HttpRuntime,
    session: &SessionStore<Store>,
) -> Result<Page<'a, HttpRuntime>> {
    let page = Page::load(runtime, session)?;
    if page.modal().is_none() {
        bail!("not logged in; run `portfolio login <email>` first");
    }
    Ok(page)
}

fn delete_work(
    page: &mut Page<'_, HttpRuntime>,
    id: WorkId,
    confirm: &mut dyn Confirm,
) -> Result<Vec<PageEvent>> {
    page.dispatch(UiEvent::OpenModal, confirm);
    let path = page
        .document()
        .find_path(Region::ModalGallery, DELETE_ID_ATTR, &id.to_string())
        .ok_or_else(|| anyhow!("work {id} is not in the gallery"))?;
    let events = page.dispatch(
        UiEvent::Click {
            region: Region::ModalGallery,
            path,
        },
        confirm,
    );
    page.dispatch(UiEvent::CloseGallery, confirm);
    if let Some(message) = shown_error(&events) {
        bail!("{message}");
    }
    Ok(events)
}

fn add_work(
    page: &mut Page<'_, HttpRuntime>,
    file: ImageFile,
    title: String,
    category: CategoryId,
) -> Result<WorkId> {
    let mut decline = |_: &str| false;
    let steps = [
        UiEvent::OpenModal,
        UiEvent::AddPhoto,
        UiEvent::ImagePicked(file),
        UiEvent::TitleInput(title),
        UiEvent::CategoryChosen(Some(category)),
    ];
    for step in steps {
        let events = page.dispatch(step, &mut decline);
        if let Some(message) = shown_error(&events) {
            bail!("{message}");
        }
    }

    if !page.document().submit_enabled {
        let reason = page
            .modal()
            .and_then(|modal| modal.pending().validate(page.catalog().categories()).err())
            .map(|errors| errors.to_string())
            .unwrap_or_else(|| "form is incomplete".to_owned());
        bail!("{reason}");
    }

    let events = page.dispatch(UiEvent::Submit, &mut decline);
    page.dispatch(UiEvent::CloseGallery, &mut decline);
    page.dispatch(UiEvent::CloseForm, &mut decline);
    if let Some(message) = shown_error(&events) {
        bail!("{message}");
    }
    events
        .iter()
        .find_map(|event| match event {
            PageEvent::Modal(ModalEvent::WorkCreated(id)) => Some(*id),
            _ => None,
        })
        .ok_or_else(|| anyhow!("server did not confirm the new work"))
}

fn shown_error(events: &[PageEvent]) -> Option<&str> {
    events.iter().find_map(|event| match event {
        PageEvent::Modal(ModalEvent::ErrorShown { message, .. }) => Some(message.as_str()),
        _ => None,
    })
}

fn read_image(path: &Path) -> Result<ImageFile> {
    let data = fs::read(path).with_context(|| format!("read image {}", path.display()))?;
    let mime_type = mime_type_for_path(path).unwrap_or("application/octet-stream");
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_owned());
    Ok(ImageFile::new(&file_name, mime_type, data))
}

fn read_password() -> Result<String> {
    if let Ok(password) = env::var("PORTFOLIO_PASSWORD") {
        return Ok(password);
    }
    eprint!("password: ");
    io::stderr().flush().context("flush password prompt")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Status,
    Login { email: String },
    Logout,
    Render {
        out: Option<PathBuf>,
        category: Option<CategoryId>,
    },
    Delete { id: WorkId, yes: bool },
    Add {
        image: PathBuf,
        title: String,
        category: CategoryId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    command: Option<Command>,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
        command: None,
    };

    let args: Vec<String> = args.into_iter().map(|arg| arg.as_ref().to_owned()).collect();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value);
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown if unknown.starts_with('-') => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
            name => {
                options.command = Some(parse_command(name, iter.by_ref())?);
            }
        }
    }

    Ok(options)
}

fn parse_command(name: &str, args: &mut impl Iterator<Item = String>) -> Result<Command> {
    let command = match name {
        "status" => Command::Status,
        "logout" => Command::Logout,
        "login" => {
            let email = args
                .next()
                .ok_or_else(|| anyhow!("login requires an email address"))?;
            Command::Login { email }
        }
        "render" => {
            let mut out = None;
            let mut category = None;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--out" => out = Some(PathBuf::from(flag_value(args, "--out")?)),
                    "--category" => {
                        category = Some(parse_id(&flag_value(args, "--category")?, "--category")?)
                    }
                    other => bail!("unknown render option {other:?}"),
                }
            }
            Command::Render {
                out,
                category: category.map(CategoryId::new),
            }
        }
        "delete" => {
            let mut id = None;
            let mut yes = false;
            for arg in args.by_ref() {
                match arg.as_str() {
                    "--yes" | "-y" => yes = true,
                    raw if id.is_none() => id = Some(parse_id(raw, "work id")?),
                    other => bail!("unexpected delete argument {other:?}"),
                }
            }
            let id = id.ok_or_else(|| anyhow!("delete requires a work id"))?;
            Command::Delete {
                id: WorkId::new(id),
                yes,
            }
        }
        "add" => {
            let mut image = None;
            let mut title = None;
            let mut category = None;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--image" => image = Some(PathBuf::from(flag_value(args, "--image")?)),
                    "--title" => title = Some(flag_value(args, "--title")?),
                    "--category" => {
                        category = Some(parse_id(&flag_value(args, "--category")?, "--category")?)
                    }
                    other => bail!("unknown add option {other:?}"),
                }
            }
            Command::Add {
                image: image.ok_or_else(|| anyhow!("add requires --image <path>"))?,
                title: title.ok_or_else(|| anyhow!("add requires --title <title>"))?,
                category: CategoryId::new(
                    category.ok_or_else(|| anyhow!("add requires --category <id>"))?,
                ),
            }
        }
        unknown => bail!("unknown command {unknown:?}; run with --help to see supported commands"),
    };
    Ok(command)
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| anyhow!("{flag} requires a value"))
}

fn parse_id(raw: &str, what: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .with_context(|| format!("{what} must be an integer id, got {raw:?}"))
}

fn print_help() {
    println!("portfolio");
    println!("  login <email>                        Log in (password from PORTFOLIO_PASSWORD or stdin)");
    println!("  logout                               Clear the stored session");
    println!("  status                               Show whether a session is stored");
    println!("  render [--out <file>] [--category <id>]");
    println!("                                       Export the public gallery page as HTML");
    println!("  delete <work-id> [--yes]             Delete a work (asks for confirmation)");
    println!("  add --image <path> --title <title> --category <id>");
    println!("                                       Upload a new work");
    println!();
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config + session database + API settings");
    println!("  --help                   Show this help");
}
