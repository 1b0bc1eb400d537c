//! List command implementation.
//!
//! The default action: parse the todo file, filter, sort and print.

use std::path::Path;

use rastodo_core::policy::split_categories;
use rastodo_core::{
    parse_and_filter, sort_records, DisplayOptions, FilterPolicy, ParseContext, SortOrder,
};
use strsim::levenshtein;
use tracing::debug;

use super::config::Config;
use super::{todo_file, CommandContext, Result};
use crate::cli::ListArgs;
use crate::output::{format_records_json, format_records_text};

/// Maximum edit distance for suggesting a category name.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Builds the filter policy from the listing flags and config.
///
/// `--days` overrides `days` from the config file.
pub fn build_policy(args: &ListArgs, config: &Config) -> Result<FilterPolicy> {
    let mut builder = FilterPolicy::builder().show_all(args.all);

    if let Some(days) = args.days.or(config.days) {
        builder = builder.cutoff_days(days);
    }

    if args.appointments {
        builder = builder.only_types("a");
    } else if let Some(ref only) = args.only_types {
        builder = builder.only_types(only.as_str());
    }
    if let Some(ref excluded) = args.ex_types {
        builder = builder.exclude_types(excluded.as_str());
    }

    if let Some(ref only) = args.only_cat {
        builder = builder.only_categories(split_categories(only));
    }
    if let Some(ref excluded) = args.ex_cat {
        builder = builder.exclude_categories(split_categories(excluded));
    }

    Ok(builder.build()?)
}

/// Sort order from the flags, falling back to the config.
pub fn sort_order(args: &ListArgs, config: &Config) -> SortOrder {
    SortOrder {
        reverse: args.reverse || config.output.reverse.unwrap_or(false),
        group_by_category: args.sort_cat || config.output.sort_category.unwrap_or(false),
    }
}

/// Display options from the flags, falling back to the config.
pub fn display_options(ctx: &CommandContext, args: &ListArgs, config: &Config) -> DisplayOptions {
    DisplayOptions {
        line_numbers: args.line_numbers || config.output.line_numbers.unwrap_or(false),
        two_lines: args.two_lines || config.output.two_lines.unwrap_or(false),
        use_colors: ctx.use_colors,
    }
}

/// Finds the closest known category to an unknown one.
fn find_similar_category<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| (name, levenshtein(&query_lower, &name.to_lowercase())))
        .min_by_key(|(_, d)| *d)?;

    // Matching is exact, so a name differing only in case is still worth suggesting.
    if best_match != query && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match.to_string())
    } else {
        None
    }
}

/// Warnings for requested categories that never appear as a header.
pub fn unknown_category_warnings(policy: &FilterPolicy, known: &[String]) -> Vec<String> {
    let requested = policy
        .only_categories()
        .into_iter()
        .chain(policy.exclude_categories())
        .flatten();

    let mut warnings = Vec::new();
    for name in requested {
        if known.iter().any(|k| k == name) {
            continue;
        }
        let base = format!("Warning: category '{}' not found in the todo file.", name);
        let warning = match find_similar_category(name, known.iter().map(String::as_str)) {
            Some(s) => format!("{} Did you mean '{}'?", base, s),
            None => base,
        };
        if !warnings.contains(&warning) {
            warnings.push(warning);
        }
    }
    warnings
}

/// Executes the list command.
///
/// Option errors are reported before the todo file is touched.
pub fn execute(ctx: &CommandContext, args: &ListArgs, config: &Config, path: &Path) -> Result<()> {
    let policy = build_policy(args, config)?;
    let order = sort_order(args, config);
    let display = display_options(ctx, args, config);

    debug!(path = %path.display(), ?policy, "listing todo file");
    let text = todo_file::read(path)?;
    let mut parsed = parse_and_filter(text.lines(), &ParseContext::local(), &policy);
    sort_records(&mut parsed.records, order, policy.cutoff_days());

    if !ctx.quiet {
        for diagnostic in &parsed.diagnostics {
            eprintln!("{}", diagnostic);
        }
        for warning in unknown_category_warnings(&policy, &parsed.categories) {
            eprintln!("{}", warning);
        }
    }

    if ctx.json_output {
        println!("{}", format_records_json(&parsed.records)?);
    } else {
        print!("{}", format_records_text(&parsed.records, &display));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::config::OutputConfig;
    use crate::commands::CommandError;
    use rastodo_core::{PolicyError, TaskKind};

    fn ctx() -> CommandContext {
        CommandContext {
            json_output: false,
            use_colors: false,
            quiet: false,
            verbose: false,
        }
    }

    fn known(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    // ==================== Policy Tests ====================

    #[test]
    fn test_default_policy() {
        let policy = build_policy(&ListArgs::default(), &Config::default()).unwrap();
        assert_eq!(policy.cutoff_days(), 22);
        assert_eq!(policy.allowed_types().len(), 6);
        assert!(!policy.show_all());
    }

    #[test]
    fn test_days_flag_overrides_config() {
        let config = Config {
            days: Some(30),
            ..Config::default()
        };
        let policy = build_policy(&ListArgs::default(), &config).unwrap();
        assert_eq!(policy.cutoff_days(), 30);

        let args = ListArgs {
            days: Some(4),
            ..ListArgs::default()
        };
        let policy = build_policy(&args, &config).unwrap();
        assert_eq!(policy.cutoff_days(), 4);
    }

    #[test]
    fn test_negative_days_rejected() {
        let args = ListArgs {
            days: Some(-1),
            ..ListArgs::default()
        };
        let result = build_policy(&args, &Config::default());
        assert!(matches!(
            result,
            Err(CommandError::Policy(PolicyError::NegativeCutoff(-1)))
        ));
    }

    #[test]
    fn test_appointments_shorthand() {
        let args = ListArgs {
            appointments: true,
            ..ListArgs::default()
        };
        let policy = build_policy(&args, &Config::default()).unwrap();
        assert_eq!(
            policy.allowed_types().iter().copied().collect::<Vec<_>>(),
            vec![TaskKind::Appointment]
        );
    }

    #[test]
    fn test_only_types_wins_over_ex_types() {
        let args = ListArgs {
            only_types: Some("ts".to_string()),
            ex_types: Some("t".to_string()),
            ..ListArgs::default()
        };
        let policy = build_policy(&args, &Config::default()).unwrap();
        assert!(policy.allowed_types().contains(&TaskKind::Todo));
        assert!(policy.allowed_types().contains(&TaskKind::Sleeping));
        assert_eq!(policy.allowed_types().len(), 2);
    }

    #[test]
    fn test_unknown_type_letter_rejected() {
        let args = ListArgs {
            ex_types: Some("tx".to_string()),
            ..ListArgs::default()
        };
        let result = build_policy(&args, &Config::default());
        assert!(matches!(
            result,
            Err(CommandError::Policy(PolicyError::UnknownType('x')))
        ));
    }

    #[test]
    fn test_category_lists_split_on_commas() {
        let args = ListArgs {
            only_cat: Some("CS101,CS134".to_string()),
            ..ListArgs::default()
        };
        let policy = build_policy(&args, &Config::default()).unwrap();
        let only = policy.only_categories().unwrap();
        assert!(only.contains("CS101"));
        assert!(only.contains("CS134"));
    }

    // ==================== Display Tests ====================

    #[test]
    fn test_config_output_defaults_apply() {
        let config = Config {
            output: OutputConfig {
                two_lines: Some(true),
                reverse: Some(true),
                ..OutputConfig::default()
            },
            ..Config::default()
        };
        let args = ListArgs {
            sort_cat: true,
            ..ListArgs::default()
        };

        let order = sort_order(&args, &config);
        assert!(order.reverse);
        assert!(order.group_by_category);

        let display = display_options(&ctx(), &args, &config);
        assert!(display.two_lines);
        assert!(!display.line_numbers);
        assert!(!display.use_colors);
    }

    // ==================== Category Warning Tests ====================

    #[test]
    fn test_unknown_category_with_suggestion() {
        let args = ListArgs {
            only_cat: Some("CS10".to_string()),
            ..ListArgs::default()
        };
        let policy = build_policy(&args, &Config::default()).unwrap();
        let warnings = unknown_category_warnings(&policy, &known(&["CS101", "birthdays"]));
        assert_eq!(
            warnings,
            vec!["Warning: category 'CS10' not found in the todo file. Did you mean 'CS101'?"]
        );
    }

    #[test]
    fn test_unknown_category_without_suggestion() {
        let args = ListArgs {
            ex_cat: Some("gardening".to_string()),
            ..ListArgs::default()
        };
        let policy = build_policy(&args, &Config::default()).unwrap();
        let warnings = unknown_category_warnings(&policy, &known(&["CS101"]));
        assert_eq!(
            warnings,
            vec!["Warning: category 'gardening' not found in the todo file."]
        );
    }

    #[test]
    fn test_known_categories_produce_no_warning() {
        let args = ListArgs {
            only_cat: Some("CS101".to_string()),
            ex_cat: Some("birthdays".to_string()),
            ..ListArgs::default()
        };
        let policy = build_policy(&args, &Config::default()).unwrap();
        assert!(unknown_category_warnings(&policy, &known(&["CS101", "birthdays"])).is_empty());
    }

    #[test]
    fn test_case_mismatch_is_suggested() {
        assert_eq!(
            find_similar_category("cs101", ["CS101", "CS134"].into_iter()),
            Some("CS101".to_string())
        );
        assert_eq!(find_similar_category("CS101", ["CS101"].into_iter()), None);
        assert_eq!(find_similar_category("x", std::iter::empty()), None);
    }
}
