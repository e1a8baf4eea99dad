use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use nestgen_core::config::{
    self, CONFIG_FILE_NAME, GenerationOptions, NestgenConfig, TransportKind,
};
use nestgen_core::plan::plan_resource;
use nestgen_core::{GeneratedFile, materialize};
use nestgen_typescript::NestRenderer;

#[derive(Parser)]
#[command(name = "nestgen", about = "NestJS resource scaffolder", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the files of a resource
    Generate {
        #[command(flatten)]
        resource: ResourceArgs,

        /// Directory to generate into (defaults to `source_root` from the config)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Print the files that would be written without writing them
        #[arg(long)]
        dry_run: bool,

        /// Overwrite files that already exist
        #[arg(long)]
        force: bool,
    },

    /// Print the file plan of a resource without rendering it
    Plan {
        #[command(flatten)]
        resource: ResourceArgs,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: PlanFormat,
    },

    /// Initialize a new nestgen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
struct ResourceArgs {
    /// Resource name, e.g. `users`
    name: String,

    /// Transport layer: rest, microservice, ws, graphql-code-first or graphql-schema-first
    #[arg(long = "type", value_name = "TYPE")]
    kind: Option<String>,

    /// Generate input, output and type files
    #[arg(long, overrides_with = "no_crud")]
    crud: bool,

    /// Skip input, output and type files
    #[arg(long, overrides_with = "crud")]
    no_crud: bool,

    /// Generate spec files
    #[arg(long, overrides_with = "no_spec")]
    spec: bool,

    /// Skip spec files
    #[arg(long, overrides_with = "spec")]
    no_spec: bool,

    /// Suffix of spec files, e.g. `test` for `users.service.test.ts`
    #[arg(long)]
    spec_file_suffix: Option<String>,

    /// Generate without a per-resource directory
    #[arg(long, overrides_with = "no_flat")]
    flat: bool,

    /// Generate into a per-resource directory
    #[arg(long, overrides_with = "flat")]
    no_flat: bool,
}

#[derive(Clone, ValueEnum)]
enum PlanFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            resource,
            path,
            dry_run,
            force,
        } => cmd_generate(resource, path, dry_run, force),

        Commands::Plan { resource, format } => cmd_plan(resource, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "nestgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<NestgenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    Ok(config::load_config(&config_path)?)
}

/// Look up `@nestjs/swagger` in the project that owns `target`.
fn swagger_installed_for(target: &Path) -> Result<bool> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(config::detect_swagger_installed(&cwd.join(target))?)
}

/// Resolve a `--x` / `--no-x` pair against the configured default.
fn flag(yes: bool, no: bool, default: bool) -> bool {
    if yes {
        true
    } else if no {
        false
    } else {
        default
    }
}

/// Merge command-line flags over the project defaults.
fn build_options(
    args: &ResourceArgs,
    cfg: &NestgenConfig,
    is_swagger_installed: bool,
) -> Result<GenerationOptions> {
    let kind = match &args.kind {
        Some(kind) => kind.parse::<TransportKind>()?,
        None => cfg.defaults.kind,
    };

    Ok(GenerationOptions {
        name: args.name.clone(),
        kind,
        crud: flag(args.crud, args.no_crud, cfg.defaults.crud),
        spec: flag(args.spec, args.no_spec, cfg.defaults.spec),
        spec_file_suffix: args
            .spec_file_suffix
            .clone()
            .unwrap_or_else(|| cfg.defaults.spec_file_suffix.clone()),
        flat: flag(args.flat, args.no_flat, cfg.defaults.flat),
        is_swagger_installed,
        language: cfg.language,
    })
}

/// Paths among `files` that already exist under `base`.
fn existing_files(base: &Path, files: &[GeneratedFile]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|file| base.join(&file.path))
        .filter(|path| path.exists())
        .collect()
}

/// Files and directories touched by an in-progress [`write_files`] call.
#[derive(Default)]
struct WriteLog {
    /// Written paths with the content they had before, if any.
    files: Vec<(PathBuf, Option<Vec<u8>>)>,
    dirs: Vec<PathBuf>,
}

impl WriteLog {
    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            let missing: Vec<PathBuf> = parent
                .ancestors()
                .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
                .map(Path::to_path_buf)
                .collect();
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
            self.dirs.extend(missing);
        }
        let previous = if path.is_file() {
            Some(fs::read(path).with_context(|| format!("failed to read {}", path.display()))?)
        } else {
            None
        };
        fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
        self.files.push((path.to_path_buf(), previous));
        Ok(())
    }

    /// Undo this run: restore overwritten files, remove created ones, then
    /// remove created directories deepest first.
    fn roll_back(mut self) {
        for (file, previous) in &self.files {
            let result = match previous {
                Some(content) => fs::write(file, content),
                None => fs::remove_file(file),
            };
            if let Err(err) = result {
                log::warn!("failed to roll back {}: {err}", file.display());
            }
        }
        self.dirs.sort_by_key(|dir| Reverse(dir.components().count()));
        for dir in &self.dirs {
            if let Err(err) = fs::remove_dir(dir) {
                log::warn!("failed to remove {}: {err}", dir.display());
            }
        }
    }
}

/// Write generated files to disk under the given base directory.
///
/// If any write fails, the output tree is put back the way it was before the
/// error is returned.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    let mut written = WriteLog::default();
    for file in files {
        if let Err(err) = written.write(&base.join(&file.path), &file.content) {
            written.roll_back();
            return Err(err);
        }
    }
    for (path, _) in &written.files {
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn cmd_generate(
    resource: ResourceArgs,
    path: Option<PathBuf>,
    dry_run: bool,
    force: bool,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let base = path.unwrap_or_else(|| PathBuf::from(&cfg.source_root));
    let is_swagger_installed = swagger_installed_for(&base)?;
    let options = build_options(&resource, &cfg, is_swagger_installed)?;

    let manifest = plan_resource(&options)?;
    let renderer = NestRenderer::new()?;
    let files = materialize(&manifest, &renderer)?;

    if dry_run {
        for file in &files {
            eprintln!("  would write {}", base.join(&file.path).display());
        }
        eprintln!("Dry run: no files written.");
        return Ok(());
    }

    let existing = existing_files(&base, &files);
    if !existing.is_empty() && !force {
        let listing: Vec<String> = existing.iter().map(|p| p.display().to_string()).collect();
        anyhow::bail!(
            "refusing to overwrite existing files (use --force):\n  {}",
            listing.join("\n  ")
        );
    }

    write_files(&base, &files)?;
    eprintln!(
        "Generated {} files for {} ({}) in {}",
        files.len(),
        manifest.context.name.classified,
        options.kind,
        base.display()
    );
    Ok(())
}

fn cmd_plan(resource: ResourceArgs, format: PlanFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let is_swagger_installed = swagger_installed_for(Path::new(&cfg.source_root))?;
    let options = build_options(&resource, &cfg, is_swagger_installed)?;
    let manifest = plan_resource(&options)?;

    match format {
        PlanFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&manifest)?;
            print!("{}", yaml);
        }
        PlanFormat::Json => {
            let json = serde_json::to_string_pretty(&manifest)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
