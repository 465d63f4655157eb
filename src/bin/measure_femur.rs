use bone_measure::config::femur::parse_cli;
use bone_measure::field::io::load_geometric_field;
use bone_measure::measure::femur::FemurMeasurements;
use bone_measure::refdata;
use bone_measure::report::{print_measurements, write_report, NullValuePolicy};
use bone_measure::view;
use std::env;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "measure_femur".to_string());
    let config = parse_cli(&program, env::args().skip(1))?;

    let reference = refdata::femur_reference(config.side)?;
    let field = load_geometric_field(&config.geof, &reference.ens, &reference.mesh)?;

    let mut engine = FemurMeasurements::new(field);
    engine.calc_measurements().map_err(|e| e.to_string())?;

    print_measurements(&engine.measurements);

    if let Some(path) = &config.outfile {
        write_report(&engine.measurements, path, NullValuePolicy::Skip)?;
        println!("\nReport written to {}", path.display());
    }

    if config.view {
        view::view_femur(&engine)?;
    }

    Ok(())
}
