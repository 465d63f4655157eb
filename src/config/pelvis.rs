//! CLI configuration of the pelvis measurement tool.

use super::parse_sex;
use crate::types::PopulationClass;
use std::path::PathBuf;

/// Parsed arguments of `measure_pelvis`. Without a sex flag the generic
/// adult regression models are used.
#[derive(Clone, Debug)]
pub struct PelvisToolConfig {
    pub geof: PathBuf,
    pub population_class: PopulationClass,
    pub outfile: Option<PathBuf>,
    pub view: bool,
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <model.geof> [-s|--sex m|f] [-o|--outfile PATH] [-v|--view]"
    )
}

/// Parses the tool arguments (without the program name).
pub fn parse_cli(
    program: &str,
    args: impl Iterator<Item = String>,
) -> Result<PelvisToolConfig, String> {
    let mut args = args;
    let mut geof = None;
    let mut population_class = PopulationClass::Adults;
    let mut outfile = None;
    let mut view = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" | "--view" => view = true,
            "-s" | "--sex" => {
                let raw = args
                    .next()
                    .ok_or_else(|| format!("Missing value for {arg}\n{}", usage(program)))?;
                population_class = parse_sex(&raw)?;
            }
            "-o" | "--outfile" => {
                let path = args
                    .next()
                    .ok_or_else(|| format!("Missing value for {arg}\n{}", usage(program)))?;
                outfile = Some(PathBuf::from(path));
            }
            "-h" | "--help" => return Err(usage(program)),
            other if other.starts_with('-') => {
                return Err(format!("Unknown option '{other}'\n{}", usage(program)));
            }
            positional => {
                if geof.is_none() {
                    geof = Some(PathBuf::from(positional));
                } else {
                    return Err(format!(
                        "Unexpected argument '{positional}'\n{}",
                        usage(program)
                    ));
                }
            }
        }
    }

    Ok(PelvisToolConfig {
        geof: geof.ok_or_else(|| usage(program))?,
        population_class,
        outfile,
        view,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<PelvisToolConfig, String> {
        parse_cli("measure_pelvis", args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn sex_flag_selects_the_population_class() {
        assert_eq!(
            parse(&["model.geof", "-s", "m"]).unwrap().population_class,
            PopulationClass::Men
        );
        assert_eq!(
            parse(&["model.geof", "--sex", "f"]).unwrap().population_class,
            PopulationClass::Women
        );
    }

    #[test]
    fn absent_sex_flag_means_generic_adults() {
        assert_eq!(
            parse(&["model.geof"]).unwrap().population_class,
            PopulationClass::Adults
        );
    }

    #[test]
    fn invalid_sex_fails_before_any_io() {
        let err = parse(&["model.geof", "-s", "q"]).unwrap_err();
        assert!(err.contains("Invalid sex 'q'"), "{err}");
    }

    #[test]
    fn missing_model_path_reports_usage() {
        let err = parse(&[]).unwrap_err();
        assert!(err.starts_with("Usage:"), "{err}");
    }
}
