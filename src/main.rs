use std::{
    env,
    fs::read_to_string,
    path::{Path, PathBuf},
    process,
    time::Instant,
};

use xsema::{
    config::{BuildSettings, Context, SETTINGS_FILE, VERSION},
    display_error,
    errors::errors::{ConfigError, ErrorKind},
    init_tracing,
    lexer::lexer::tokenize,
};

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("xsema {}", VERSION);
        eprintln!("usage: xsema <file>");
        process::exit(1);
    }

    let file_path = PathBuf::from(&args[1]);
    if !Context::is_source_file(&file_path) {
        eprintln!("{}{}", ErrorKind::FileNotX.template(), file_path.display());
        process::exit(1);
    }

    let ctx = match load_context(&file_path) {
        Ok(ctx) => ctx,
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1);
        }
    };
    tracing::debug!(mode = ?ctx.settings.mode, entry_point = %ctx.entry_point, "context ready");

    let source = match read_to_string(&file_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("cannot read {}: {}", file_path.display(), error);
            process::exit(1);
        }
    };
    let file_name = file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let start = Instant::now();
    match tokenize(source.clone(), file_name) {
        Ok(tokens) => println!("Tokenized {} tokens in {:?}", tokens.len(), start.elapsed()),
        Err(error) => {
            display_error(&error, &source);
            process::exit(1);
        }
    }
}

/// Reads the settings file next to `file` when there is one.
fn load_context(file: &Path) -> Result<Context, ConfigError> {
    let settings_path = file
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(SETTINGS_FILE);
    let settings = match settings_path.exists() {
        true => BuildSettings::read(&settings_path)?,
        false => BuildSettings::default(),
    };

    let exec_path = env::current_exe()
        .ok()
        .and_then(|path| path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(Context::new(exec_path, settings))
}
