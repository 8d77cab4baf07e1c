use crate::Utils::errors::TaskError;
use crate::Utils::logger::{default_log_file_name, parse_loglevel};
use crate::Utils::task_parser::TaskDocument;
use crate::numerical::integrands::{DEFAULT_PARTITIONS, IntegrandKind, Preset};
use crate::numerical::quadrature::QuadratureRule;
use simplelog::LevelFilter;
use std::path::PathBuf;

/// Comma separated partition counts, e.g. `10,1000,100000`. Empty tokens are skipped,
/// an empty list falls back to the default counts. Non-positive counts are kept here:
/// the comparison driver is the one that drops them.
pub fn parse_partition_list(input: &str) -> Result<Vec<i64>, TaskError> {
    let ns = input
        .split(',')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<i64>()
                .map_err(|_| TaskError::InvalidPartitionList(input.to_string()))
        })
        .collect::<Result<Vec<i64>, TaskError>>()?;
    if ns.is_empty() {
        Ok(DEFAULT_PARTITIONS.to_vec())
    } else {
        Ok(ns)
    }
}

pub fn parse_integrand(name: &str) -> Result<IntegrandKind, TaskError> {
    name.parse::<IntegrandKind>()
        .map_err(|_| TaskError::UnknownIntegrand(name.to_string(), IntegrandKind::names().join(", ")))
}

pub fn parse_preset(name: &str) -> Result<Preset, TaskError> {
    name.parse::<Preset>()
        .map_err(|_| TaskError::UnknownPreset(name.to_string()))
}

/// `auto` asks for a timestamped file name
pub fn resolve_log_file(name: &str) -> PathBuf {
    if name.eq_ignore_ascii_case("auto") {
        default_log_file_name()
    } else {
        PathBuf::from(name)
    }
}

/// Settings coming from one source (task file or command line); `None` leaves the value
/// of the lower-priority source in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOverrides {
    pub preset: Option<Preset>,
    pub integrand: Option<IntegrandKind>,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub partitions: Option<Vec<i64>>,
    pub csv_path: Option<PathBuf>,
    pub plot_path: Option<PathBuf>,
    pub plot_values_path: Option<PathBuf>,
    pub loglevel: Option<String>,
    pub log_file: Option<PathBuf>,
    pub parallel: Option<bool>,
}

impl RunOverrides {
    /*
     sections and keys read from a task document:
     run        preset
     integrand  function
     interval   a, b
     partitions n
     output     csv, plot, plot_values, parallel
     logging    loglevel, file
    */
    pub fn from_document(doc: &TaskDocument) -> Result<RunOverrides, TaskError> {
        let preset = doc
            .get_string("run", "preset")?
            .map(|name| parse_preset(&name))
            .transpose()?;
        let integrand = doc
            .get_string("integrand", "function")?
            .map(|name| parse_integrand(&name))
            .transpose()?;
        // the task grammar requires at least one value, the empty-list fallback is CLI only
        let partitions = doc.get_integer_list("partitions", "n")?;
        Ok(RunOverrides {
            preset,
            integrand,
            a: doc.get_float("interval", "a")?,
            b: doc.get_float("interval", "b")?,
            partitions,
            csv_path: doc.get_string("output", "csv")?.map(PathBuf::from),
            plot_path: doc.get_string("output", "plot")?.map(PathBuf::from),
            plot_values_path: doc.get_string("output", "plot_values")?.map(PathBuf::from),
            loglevel: doc.get_string("logging", "loglevel")?,
            log_file: doc.get_string("logging", "file")?.map(|name| resolve_log_file(&name)),
            parallel: doc.get_bool("output", "parallel")?,
        })
    }
}

/// Everything needed for one comparison run and its outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub preset: Preset,
    pub integrand: IntegrandKind,
    pub a: f64,
    pub b: f64,
    pub partitions: Vec<i64>,
    pub csv_path: PathBuf,
    pub plot_path: Option<PathBuf>,
    pub plot_values_path: Option<PathBuf>,
    pub loglevel: String,
    pub log_file: Option<PathBuf>,
    pub parallel: bool,
    pub display_rules: Vec<QuadratureRule>,
}

impl RunConfig {
    pub fn from_preset(preset: Preset) -> RunConfig {
        let settings = preset.settings();
        RunConfig {
            preset,
            integrand: settings.integrand,
            a: settings.a,
            b: settings.b,
            partitions: settings.partitions,
            csv_path: settings.csv_path,
            plot_path: None,
            plot_values_path: None,
            loglevel: "info".to_string(),
            log_file: None,
            parallel: false,
            display_rules: settings.display_rules,
        }
    }

    /// preset defaults < task file < command line
    pub fn resolve(task: Option<RunOverrides>, cli: RunOverrides) -> Result<RunConfig, TaskError> {
        let preset = cli
            .preset
            .or(task.as_ref().and_then(|t| t.preset))
            .unwrap_or(Preset::Generic);
        let mut config = RunConfig::from_preset(preset);
        if let Some(task) = task {
            config.apply(task);
        }
        config.apply(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: RunOverrides) {
        if let Some(integrand) = overrides.integrand {
            self.integrand = integrand;
        }
        if let Some(a) = overrides.a {
            self.a = a;
        }
        if let Some(b) = overrides.b {
            self.b = b;
        }
        if let Some(partitions) = overrides.partitions {
            self.partitions = partitions;
        }
        if let Some(csv_path) = overrides.csv_path {
            self.csv_path = csv_path;
        }
        if overrides.plot_path.is_some() {
            self.plot_path = overrides.plot_path;
        }
        if overrides.plot_values_path.is_some() {
            self.plot_values_path = overrides.plot_values_path;
        }
        if let Some(loglevel) = overrides.loglevel {
            self.loglevel = loglevel;
        }
        if overrides.log_file.is_some() {
            self.log_file = overrides.log_file;
        }
        if let Some(parallel) = overrides.parallel {
            self.parallel = parallel;
        }
    }

    pub fn validate(&self) -> Result<(), TaskError> {
        if !self.a.is_finite() || !self.b.is_finite() {
            return Err(TaskError::InvalidInterval(self.a, self.b));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<Option<LevelFilter>, TaskError> {
        parse_loglevel(&self.loglevel).map_err(TaskError::InvalidLogLevel)
    }

    pub fn exact(&self) -> Option<f64> {
        self.integrand.exact(self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partition_list() {
        assert_eq!(parse_partition_list("10,1000").unwrap(), vec![10, 1000]);
        assert_eq!(parse_partition_list(" 10 , -5,0,, 7 ").unwrap(), vec![10, -5, 0, 7]);
        assert_eq!(parse_partition_list("").unwrap(), vec![10, 1000, 100000]);
        assert_eq!(parse_partition_list(",,").unwrap(), vec![10, 1000, 100000]);
        assert!(matches!(
            parse_partition_list("10,ten"),
            Err(TaskError::InvalidPartitionList(_))
        ));
        assert!(parse_partition_list("1.5").is_err());
    }

    #[test]
    fn test_parse_integrand_names() {
        assert_eq!(parse_integrand("exp").unwrap(), IntegrandKind::Exp);
        let err = parse_integrand("sin").unwrap_err();
        assert!(err.to_string().contains("cosh"));
        assert!(parse_preset("variant15").is_ok());
        assert!(parse_preset("variant99").is_err());
    }

    #[test]
    fn test_defaults_come_from_preset() {
        let config = RunConfig::resolve(None, RunOverrides::default()).unwrap();
        assert_eq!(config.preset, Preset::Generic);
        assert_eq!(config.integrand, IntegrandKind::Cosh);
        assert_eq!((config.a, config.b), (0.0, 1.0));
        assert_eq!(config.partitions, vec![10, 1000, 100000]);
        assert_eq!(config.csv_path, PathBuf::from("results.csv"));
        assert_eq!(config.plot_path, None);
        assert!(!config.parallel);
        assert_eq!(config.display_rules.len(), 4);
        assert_eq!(config.exact(), Some(1.0_f64.sinh()));
    }

    #[test]
    fn test_cli_overrides_task_file() {
        let doc = TaskDocument::parse(
            "run\n preset: variant22\ninterval\n a: -1 b: 2\npartitions\n n: 4, 8\noutput\n csv: task.csv",
        )
        .unwrap();
        let task = RunOverrides::from_document(&doc).unwrap();
        assert_eq!(task.preset, Some(Preset::Variant22));
        let cli = RunOverrides {
            b: Some(3.0),
            csv_path: Some(PathBuf::from("cli.csv")),
            ..RunOverrides::default()
        };
        let config = RunConfig::resolve(Some(task), cli).unwrap();
        assert_eq!(config.preset, Preset::Variant22);
        assert_eq!(config.integrand, IntegrandKind::Logistic);
        assert_eq!((config.a, config.b), (-1.0, 3.0));
        assert_eq!(config.partitions, vec![4, 8]);
        assert_eq!(config.csv_path, PathBuf::from("cli.csv"));
        assert_eq!(
            config.display_rules,
            vec![QuadratureRule::Trapezoid, QuadratureRule::Simpson]
        );
    }

    #[test]
    fn test_cli_preset_wins_over_task_preset() {
        let task = RunOverrides {
            preset: Some(Preset::Variant22),
            ..RunOverrides::default()
        };
        let cli = RunOverrides {
            preset: Some(Preset::Variant15),
            ..RunOverrides::default()
        };
        let config = RunConfig::resolve(Some(task), cli).unwrap();
        assert_eq!(config.preset, Preset::Variant15);
        assert_eq!(config.csv_path, PathBuf::from("results_task15.csv"));
    }

    #[test]
    fn test_value_plot_path_from_task_and_cli() {
        let doc = TaskDocument::parse("output\n plot: error_vs_n.png plot_values: value_vs_n.png").unwrap();
        let task = RunOverrides::from_document(&doc).unwrap();
        assert_eq!(task.plot_values_path, Some(PathBuf::from("value_vs_n.png")));
        let config = RunConfig::resolve(Some(task.clone()), RunOverrides::default()).unwrap();
        assert_eq!(config.plot_path, Some(PathBuf::from("error_vs_n.png")));
        assert_eq!(config.plot_values_path, Some(PathBuf::from("value_vs_n.png")));
        let cli = RunOverrides {
            plot_values_path: Some(PathBuf::from("cli_values.png")),
            ..RunOverrides::default()
        };
        let config = RunConfig::resolve(Some(task), cli).unwrap();
        assert_eq!(config.plot_values_path, Some(PathBuf::from("cli_values.png")));
        assert_eq!(RunConfig::from_preset(Preset::Generic).plot_values_path, None);
    }

    #[test]
    fn test_task_partition_list_cannot_be_empty() {
        let doc = TaskDocument::parse("partitions\n n: 10, -5").unwrap();
        let task = RunOverrides::from_document(&doc).unwrap();
        assert_eq!(task.partitions, Some(vec![10, -5]));
        assert!(matches!(
            TaskDocument::parse("partitions\n n:"),
            Err(TaskError::MalformedDocument(_))
        ));
        let task = RunOverrides::from_document(&TaskDocument::default()).unwrap();
        assert_eq!(task.partitions, None);
    }

    #[test]
    fn test_task_document_errors_surface() {
        let doc = TaskDocument::parse("integrand\n function: sin").unwrap();
        assert!(matches!(
            RunOverrides::from_document(&doc),
            Err(TaskError::UnknownIntegrand(..))
        ));
    }

    #[test]
    fn test_logging_section() {
        let doc = TaskDocument::parse("logging\n loglevel: warn file: auto").unwrap();
        let task = RunOverrides::from_document(&doc).unwrap();
        assert_eq!(task.loglevel, Some("warn".to_string()));
        assert!(task.log_file.unwrap().to_string_lossy().starts_with("log_"));
    }

    #[test]
    fn test_validation() {
        let cli = RunOverrides {
            a: Some(f64::NAN),
            ..RunOverrides::default()
        };
        assert!(matches!(
            RunConfig::resolve(None, cli),
            Err(TaskError::InvalidInterval(..))
        ));
        let cli = RunOverrides {
            loglevel: Some("loud".to_string()),
            ..RunOverrides::default()
        };
        assert!(matches!(
            RunConfig::resolve(None, cli),
            Err(TaskError::InvalidLogLevel(_))
        ));
        // a degenerate interval is allowed, every rule gives 0
        let cli = RunOverrides {
            a: Some(1.0),
            b: Some(1.0),
            ..RunOverrides::default()
        };
        assert!(RunConfig::resolve(None, cli).is_ok());
        let mut config = RunConfig::from_preset(Preset::Generic);
        config.loglevel = "off".to_string();
        assert_eq!(config.level_filter().unwrap(), None);
    }
}
