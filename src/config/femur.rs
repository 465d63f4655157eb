//! CLI configuration of the femur measurement tool.

use super::parse_side;
use crate::types::Side;
use std::path::PathBuf;

/// Parsed arguments of `measure_femur`.
#[derive(Clone, Debug)]
pub struct FemurToolConfig {
    pub geof: PathBuf,
    pub side: Side,
    pub outfile: Option<PathBuf>,
    pub view: bool,
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <model.geof> <side l|r> [-o|--outfile PATH] [-v|--view]"
    )
}

/// Parses the tool arguments (without the program name).
pub fn parse_cli(
    program: &str,
    args: impl Iterator<Item = String>,
) -> Result<FemurToolConfig, String> {
    let mut args = args;
    let mut geof = None;
    let mut side = None;
    let mut outfile = None;
    let mut view = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" | "--view" => view = true,
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
                } else if side.is_none() {
                    side = Some(parse_side(positional)?);
                } else {
                    return Err(format!(
                        "Unexpected argument '{positional}'\n{}",
                        usage(program)
                    ));
                }
            }
        }
    }

    Ok(FemurToolConfig {
        geof: geof.ok_or_else(|| usage(program))?,
        side: side.ok_or_else(|| usage(program))?,
        outfile,
        view,
    })
}
