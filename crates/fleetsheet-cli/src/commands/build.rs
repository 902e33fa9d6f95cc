use fleetsheet_core::config::RunConfig;
use fleetsheet_core::error::FleetsheetError;
use fleetsheet_core::extraction::xlsx::CalamineReader;
use fleetsheet_core::output::xlsx::XlsxSheetWriter;
use std::path::PathBuf;

pub struct BuildArgs {
    pub config: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub dest: Option<PathBuf>,
    pub reference: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub sheet: Option<String>,
    pub no_convert: bool,
}

pub fn run(args: BuildArgs) -> Result<(), FleetsheetError> {
    let config = effective_config(args)?;

    let reader = CalamineReader::new();
    let writer = XlsxSheetWriter::with_template(config.template_path.clone());
    let summary = fleetsheet_core::build_report(&config, &reader, &writer)?;

    eprintln!(
        "Processed {} file(s), wrote {} row(s) to {}",
        summary.files,
        summary.rows,
        summary.output_path.display()
    );
    if summary.files_without_vessels > 0 {
        eprintln!(
            "  {} file(s) listed no vessels",
            summary.files_without_vessels
        );
    }
    if summary.manual_checks > 0 {
        eprintln!(
            "  {} row(s) flagged MANUAL CHECK",
            summary.manual_checks
        );
    }

    Ok(())
}

/// Config file first, then command-line overrides.
fn effective_config(args: BuildArgs) -> Result<RunConfig, FleetsheetError> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };

    if let Some(source) = args.source {
        config.source_dir = source;
    }
    if let Some(dest) = args.dest {
        config.dest_dir = dest;
    }
    if let Some(reference) = args.reference {
        config.reference_file = reference;
    }
    if let Some(output) = args.output {
        config.output_path = output;
    }
    if args.template.is_some() {
        config.template_path = args.template;
    }
    if let Some(sheet) = args.sheet {
        config.sheet_name = sheet;
    }
    if args.no_convert {
        config.convert = false;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> BuildArgs {
        BuildArgs {
            config: None,
            source: None,
            dest: None,
            reference: None,
            output: None,
            template: None,
            sheet: None,
            no_convert: false,
        }
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = effective_config(no_overrides()).unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_overrides_applied() {
        let args = BuildArgs {
            output: Some(PathBuf::from("out/overview.xlsx")),
            sheet: Some("vessels".into()),
            no_convert: true,
            ..no_overrides()
        };
        let config = effective_config(args).unwrap();
        assert_eq!(config.output_path, PathBuf::from("out/overview.xlsx"));
        assert_eq!(config.sheet_name, "vessels");
        assert!(!config.convert);
        assert_eq!(config.source_dir, RunConfig::default().source_dir);
    }
}
