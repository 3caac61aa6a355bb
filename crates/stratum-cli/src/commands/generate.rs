//! Implementation of the `stratum generate` command.
//!
//! Translates arguments into [`GenerationOptions`], drives the core
//! generation service over a file model store and a source emitter, and
//! reports what was written.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use stratum_adapters::{FileModelStore, LocalFilesystem, MemoryFilesystem, SourceEmitter};
use stratum_core::{
    application::{EmitReport, GeneratedModel, GenerationOptions, GenerationService},
    domain::Layer,
};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute `stratum generate`.
///
/// 1. Resolve directories and options (flags over config)
/// 2. Refuse a non-empty output directory without `--force`
/// 3. Load and build the class model
/// 4. Confirm unless `--yes`, `--quiet`, or `--dry-run`
/// 5. Emit to disk, or to memory for `--dry-run`
#[instrument(skip_all, fields(app = %args.app))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let models_dir = args.models.clone().unwrap_or_else(|| config.models.dir.clone());
    let out_dir = args.out.clone().unwrap_or_else(|| config.output.dir.clone());
    let options = build_options(&args, config.generation.clone());
    debug!(
        models = %models_dir.display(),
        out = %out_dir.display(),
        facade_conflict = %options.facade_conflict,
        "generation settings resolved"
    );

    if !args.dry_run && !args.force && is_non_empty_dir(&out_dir) {
        return Err(CliError::OutputExists { path: out_dir });
    }

    let emitter = if args.dry_run {
        SourceEmitter::new(MemoryFilesystem::new(), &out_dir)
    } else {
        SourceEmitter::new(LocalFilesystem::new(), &out_dir)
    };
    let service = GenerationService::new(
        Box::new(FileModelStore::new(&models_dir)),
        Box::new(emitter),
    )
    .with_options(options);

    let app = service.load(&args.app)?;
    let spinner = output.spinner(&format!("Building '{}'...", app.name));
    let built = service.generate_model(&app);
    spinner.finish_and_clear();
    let model = built?;

    if !args.dry_run && !args.yes && !output.is_quiet() && !output.is_json() {
        show_summary(&model, &out_dir, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    let report = service.emit(&model)?;
    info!(files = report.file_count(), dry_run = args.dry_run, "generate finished");

    if output.is_json() {
        output.json(&GenerateSummary::new(&model, &report, args.dry_run))?;
        return Ok(());
    }

    if args.dry_run {
        output.info(&format!(
            "Dry run: would write {} files under {}",
            report.file_count(),
            report.root.display()
        ))?;
        for file in &report.files {
            output.print(&format!("  {}", file.display()))?;
        }
    } else {
        output.success(&format!(
            "Generated '{}': {} files in {}",
            model.app_name,
            report.file_count(),
            report.root.display()
        ))?;
    }
    Ok(())
}

/// Merge command-line flags over the configured defaults.
fn build_options(args: &GenerateArgs, mut options: GenerationOptions) -> GenerationOptions {
    if !args.business.is_empty() {
        options = options.with_business_entities(args.business.iter().cloned());
    }
    if let Some(policy) = args.on_duplicate_facade {
        options = options.with_facade_conflict(policy.into());
    }
    if let Some(id_type) = &args.id_type {
        options = options.with_default_id_type(id_type.clone());
    }
    if args.no_config_class {
        options = options.with_emit_config_class(false);
    }
    options
}

fn is_non_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

fn show_summary(model: &GeneratedModel, out_dir: &Path, out: &OutputManager) -> CliResult<()> {
    out.header(&format!("Generating '{}'", model.app_name))?;
    for layer in Layer::ALL {
        let classes = model
            .model
            .classes_in(layer)
            .filter(|c| c.entity().is_some())
            .count();
        let facade = model
            .facade(layer)
            .map(|f| f.qualified_name())
            .unwrap_or_default();
        out.print(&format!(
            "  {:<12} {classes} classes, facade {facade}",
            layer.as_str()
        ))?;
    }
    out.print(&format!(
        "  {:<12} {}",
        "config",
        model.config_class().qualified_name()
    ))?;
    out.print(&format!("  {:<12} {}", "location", out_dir.display()))?;
    out.print("")?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    use std::io::IsTerminal as _;

    if !std::io::stdin().is_terminal() {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt("Write these files?")
        .default(true)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: format!("confirmation prompt failed: {e}"),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    Ok(true)
}

#[derive(Serialize)]
struct GenerateSummary {
    app: String,
    run_id: String,
    dry_run: bool,
    classes: usize,
    methods: usize,
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl GenerateSummary {
    fn new(model: &GeneratedModel, report: &EmitReport, dry_run: bool) -> Self {
        Self {
            app: model.app_name.clone(),
            run_id: model.run_id.to_string(),
            dry_run,
            classes: model.class_count(),
            methods: model.method_count(),
            root: report.root.clone(),
            files: report.files.clone(),
        }
    }
}
