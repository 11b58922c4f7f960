use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use influx_cli::cache::LoadCache;
use influx_cli::pipeline::{
    AnalysisReport, AnalyzeRequest, ColumnsReport, DepartmentsReport, analyze, build_matcher,
    inspect, overview,
};
use influx_cli::prompt::PromptResolver;
use influx_ingest::RawTable;
use influx_map::{ColumnMatcher, FieldResolver};
use influx_model::{MatchMode, MatchOptions, NormalizeOptions, YearMode};

use crate::cli::{AnalyzeArgs, ColumnsArgs, DepartmentsArgs, DetectionArgs, MappingArgs};

pub fn run_columns(cache: &mut LoadCache, args: &ColumnsArgs) -> Result<ColumnsReport> {
    let frame = load(cache, &args.csv)?;
    let matcher = matcher_from_args(&args.detection)?;
    Ok(inspect(&frame, &matcher, args.rows))
}

pub fn run_departments(cache: &mut LoadCache, args: &DepartmentsArgs) -> Result<DepartmentsReport> {
    let frame = load(cache, &args.csv)?;
    let request = request_from_args(&args.mapping, None)?;
    with_resolver(args.mapping.interactive, |resolver| {
        overview(&frame, &request, resolver)
    })
}

pub fn run_analyze(cache: &mut LoadCache, args: &AnalyzeArgs) -> Result<AnalysisReport> {
    let frame = load(cache, &args.csv)?;
    let request = request_from_args(&args.mapping, args.department.clone())?;
    with_resolver(args.mapping.interactive, |resolver| {
        analyze(&frame, &request, resolver)
    })
}

fn load(cache: &mut LoadCache, path: &Path) -> Result<Arc<RawTable>> {
    cache
        .load_path(path)
        .with_context(|| format!("load {}", path.display()))
}

fn matcher_from_args(args: &DetectionArgs) -> Result<ColumnMatcher> {
    let mode = if args.exclusive_columns {
        MatchMode::Exclusive
    } else {
        MatchMode::Permissive
    };
    build_matcher(args.patterns.as_deref(), MatchOptions::new().with_mode(mode))
}

fn request_from_args(args: &MappingArgs, department: Option<String>) -> Result<AnalyzeRequest> {
    let year_mode = if args.canonical_years {
        YearMode::Canonical
    } else {
        YearMode::Verbatim
    };
    Ok(AnalyzeRequest {
        matcher: matcher_from_args(&args.detection)?,
        overrides: args.map.iter().cloned().collect::<BTreeMap<_, _>>(),
        normalize: NormalizeOptions::new().with_year_mode(year_mode),
        department,
    })
}

/// Runs `f` with a stdin prompt when `interactive` is set. Prompts go to
/// stderr so JSON output on stdout stays clean.
fn with_resolver<T>(
    interactive: bool,
    f: impl FnOnce(Option<&mut dyn FieldResolver>) -> Result<T>,
) -> Result<T> {
    if interactive {
        let mut resolver = PromptResolver::new(io::stdin().lock(), io::stderr());
        f(Some(&mut resolver))
    } else {
        f(None)
    }
}
