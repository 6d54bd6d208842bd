// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;

use pose_render::{
    GroundTruth, RenderConfig, Result, Rgba, ScenePlan, SkeletonStyle, VERSION, compose_scene, io,
};

use crate::cli::args::SceneArgs;
use crate::cli::load_pose;
use crate::{detail, error, section, success, warn};

/// Directory that `--save` writes numbered plan folders into.
const RUNS_DIR: &str = "runs/scene";

/// Run the `scene` command, exiting with status 1 on failure.
pub fn run_scene(args: &SceneArgs) {
    if let Err(e) = build_scene(args) {
        error!("{e}");
        process::exit(1);
    }
}

fn build_scene(args: &SceneArgs) -> Result<()> {
    let pose = load_pose(&args.input)?;
    let config = render_config(args)?;

    let mut plan = ScenePlan::new();
    let summary = compose_scene(&mut plan, &pose, &config)?;

    section!("pose-render {VERSION} scene");
    detail!("skeletons", "{}", summary.skeletons);
    detail!("joints", "{}", summary.joints);
    detail!("limbs", "{}", summary.limbs);
    detail!(
        "focus",
        "({:.3}, {:.3}, {:.3})",
        summary.focus[0],
        summary.focus[1],
        summary.focus[2]
    );
    detail!("output", "{}", config.output_path);

    if args.save {
        let dir = io::find_next_run_dir(RUNS_DIR, "plan");
        let path = dir.join("scene.json");
        io::write_json(&path, &plan)?;
        success!("Scene plan saved to {}", path.display());
    } else {
        println!("{}", plan.to_json()?);
    }
    Ok(())
}

/// Translate CLI flags into a [`RenderConfig`].
fn render_config(args: &SceneArgs) -> Result<RenderConfig> {
    let mut style = SkeletonStyle::default().with_shadow(!args.no_shadow);
    style.color = match &args.color {
        Some(rgb) => Rgba::from_rgb([rgb[0], rgb[1], rgb[2]], args.alpha)?,
        None => style.color.with_alpha(args.alpha),
    };

    let mut config = RenderConfig::new()
        .with_style(style)
        .with_resolution_percentage(args.resolution_percentage)
        .with_samplings(args.samplings)
        .with_output_path(args.output_path.clone());

    if let Some(text) = &args.joint_links {
        config = config.with_joint_links(io::parse_links_json(text)?);
    }

    let gt_pose = match (&args.gt_pose, &args.gt_pose_file) {
        (Some(text), _) => Some(io::parse_pose_json(text)?),
        (None, Some(path)) => Some(io::read_pose_json(path)?),
        (None, None) => None,
    };

    match gt_pose {
        Some(pose) => {
            let mut gt = GroundTruth::new(pose);
            gt.style = gt.style.with_shadow(!args.no_shadow);
            if let Some(rgb) = &args.gt_color {
                gt.style.color = Rgba::from_rgb([rgb[0], rgb[1], rgb[2]], 1.0)?;
            }
            if let Some(text) = &args.gt_joint_links {
                gt.joint_links = Some(io::parse_links_json(text)?);
            }
            config = config.with_ground_truth(gt);
        }
        None if args.gt_color.is_some() || args.gt_joint_links.is_some() => {
            warn!("--gt-color and --gt-joint-links are ignored without a ground-truth pose");
        }
        None => {}
    }

    Ok(config)
}
