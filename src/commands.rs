use ffder::config::Settings;
use ffder::Mapping;
use ffder::handlers::HandlerChain;
use ffder::loader::ConfigLoader;
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::{FindArgs, FormatsArgs, LoadArgs};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

fn build_loader(
    settings: &Settings,
    dir: Option<&Path>,
    reverse: bool,
) -> Result<ConfigLoader, AnyError> {
    let work_dir = match (dir, &settings.loader.work_dir) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, Some(work_dir)) => work_dir.clone(),
        (None, None) => env::current_dir()?,
    };

    Ok(ConfigLoader::builder()
        .work_dir(work_dir)
        .chain(HandlerChain::build(&settings.registry(), reverse))
        .build())
}

/// Anything with a separator, or naming an existing file, is taken as a path
fn is_path_like(file: &str) -> bool {
    file.contains('/') || file.contains(std::path::MAIN_SEPARATOR) || Path::new(file).is_file()
}

/// Load `file` as a path when it looks like one, otherwise search for it
fn load_file(loader: &ConfigLoader, file: &str) -> ffder::loader::Result<Mapping> {
    if is_path_like(file) {
        loader.loads(PathBuf::from(file))
    } else {
        loader.loads(file)
    }
}

pub fn load(settings: &Settings, args: LoadArgs) -> Result<(), AnyError> {
    let reverse = settings.loader.reverse && !args.no_reverse;
    let loader = build_loader(settings, args.dir.as_deref(), reverse)?;

    info!(file = %args.file, chain = %loader.chain(), "Loading file");
    let values = load_file(&loader, &args.file)?;

    println!("{}", serde_json::to_string_pretty(&values)?);
    Ok(())
}

pub fn find(settings: &Settings, args: FindArgs) -> Result<(), AnyError> {
    let loader = build_loader(settings, args.dir.as_deref(), settings.loader.reverse)?;
    let path = loader.find(&args.pattern, None)?;

    println!("{}", path.display());
    Ok(())
}

pub fn formats(settings: &Settings, args: FormatsArgs) {
    let chain = HandlerChain::build(&settings.registry(), settings.loader.reverse && !args.no_reverse);

    for (position, handler) in chain.handlers().iter().enumerate() {
        let status = if handler.is_available() {
            "available"
        } else {
            "not available"
        };
        println!("{}. {} [{}]", position + 1, handler, status);
    }
}
