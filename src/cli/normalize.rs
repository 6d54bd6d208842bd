// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;

use pose_render::{Result, VERSION, io, normalize};

use crate::cli::args::NormalizeArgs;
use crate::cli::load_pose;
use crate::{error, success, verbose};

/// Run the `normalize` command, exiting with status 1 on failure.
pub fn run_normalize(args: &NormalizeArgs) {
    verbose!("pose-render {VERSION} normalize");
    if let Err(e) = normalize_pose(args) {
        error!("{e}");
        process::exit(1);
    }
}

fn normalize_pose(args: &NormalizeArgs) -> Result<()> {
    let pose = load_pose(&args.input)?;
    let normalized = normalize(&pose)?;

    verbose!(
        "{} joints, lowest z={:.3}",
        normalized.len(),
        normalized.min_vertical()
    );

    if let Some(path) = &args.output {
        io::write_json(path, &normalized)?;
        success!("Normalized pose saved to {path}");
    } else {
        println!("{}", serde_json::to_string(&normalized)?);
    }
    Ok(())
}
