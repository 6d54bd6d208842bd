// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::{Args, Parser, Subcommand};

use pose_render::config::DEFAULT_OUTPUT_PATH;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Examples:
    pose-render normalize --pose '[[0,0,0],[0,1,0],[0,2,1]]'
    pose-render normalize --pose-file pose.json --output normalized.json
    pose-render scene --pose-file pose.json --color 0.1 0.2 0.6
    pose-render scene --pose-file pred.json --gt-pose-file gt.json --gt-color 0.6 0.2 0.1 --save
    pose-render scene --pose-file pose.json --joint-links '[[0,1],[1,2]]' --no-shadow --samplings 64"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a pose and print the coordinates as JSON
    Normalize(NormalizeArgs),
    /// Compose a scene plan for the host renderer and print it as JSON
    Scene(SceneArgs),
}

/// Where to read a pose from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct PoseInput {
    /// Pose as a JSON array of [x, y, z] rows
    #[arg(long)]
    pub pose: Option<String>,

    /// Path to a JSON file holding the pose
    #[arg(long)]
    pub pose_file: Option<String>,
}

/// Arguments for the normalize command.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: PoseInput,

    /// Write the normalized pose to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

/// Arguments for the scene command.
#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct SceneArgs {
    #[command(flatten)]
    pub input: PoseInput,

    /// Limb links as a JSON array of [i, j] pairs [default: 17-joint body]
    #[arg(long)]
    pub joint_links: Option<String>,

    /// Skeleton color as three values in [0, 1]
    #[arg(long, num_args = 3, value_names = ["R", "G", "B"])]
    pub color: Option<Vec<f32>>,

    /// Skeleton transparency in [0, 1]
    #[arg(long, default_value_t = 1.0)]
    pub alpha: f32,

    /// Ground-truth pose as a JSON array of [x, y, z] rows
    #[arg(long, conflicts_with = "gt_pose_file")]
    pub gt_pose: Option<String>,

    /// Path to a JSON file holding the ground-truth pose
    #[arg(long)]
    pub gt_pose_file: Option<String>,

    /// Ground-truth limb links [default: same as --joint-links]
    #[arg(long)]
    pub gt_joint_links: Option<String>,

    /// Ground-truth color as three values in [0, 1]
    #[arg(long, num_args = 3, value_names = ["R", "G", "B"])]
    pub gt_color: Option<Vec<f32>>,

    /// Disable skeleton shadows
    #[arg(long, default_value_t = false)]
    pub no_shadow: bool,

    /// Image path the host renderer writes to
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    /// Render resolution as a percentage of 1080x1080
    #[arg(long, default_value_t = 100)]
    pub resolution_percentage: u32,

    /// Path-tracing samples per pixel
    #[arg(long, default_value_t = 6)]
    pub samplings: u32,

    /// Save the scene plan to runs/scene/plan
    #[arg(long, default_value_t = false)]
    pub save: bool,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_normalize_args() {
        let args = Cli::parse_from(["app", "normalize", "--pose", "[[1,2,3]]"]);
        match args.command {
            Commands::Normalize(normalize_args) => {
                assert_eq!(normalize_args.input.pose.as_deref(), Some("[[1,2,3]]"));
                assert!(normalize_args.input.pose_file.is_none());
                assert!(normalize_args.output.is_none());
                assert!(normalize_args.verbose);
            }
            Commands::Scene(_) => panic!("expected normalize"),
        }
    }

    #[test]
    fn test_pose_input_required() {
        assert!(Cli::try_parse_from(["app", "normalize"]).is_err());
        assert!(
            Cli::try_parse_from([
                "app",
                "normalize",
                "--pose",
                "[[1,2,3]]",
                "--pose-file",
                "pose.json"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_scene_args_defaults() {
        let args = Cli::parse_from(["app", "scene", "--pose-file", "pose.json"]);
        match args.command {
            Commands::Scene(scene_args) => {
                assert_eq!(scene_args.input.pose_file.as_deref(), Some("pose.json"));
                assert!(scene_args.color.is_none());
                assert!((scene_args.alpha - 1.0).abs() < f32::EPSILON);
                assert!(!scene_args.no_shadow);
                assert_eq!(scene_args.output_path, DEFAULT_OUTPUT_PATH);
                assert_eq!(scene_args.resolution_percentage, 100);
                assert_eq!(scene_args.samplings, 6);
                assert!(!scene_args.save);
            }
            Commands::Normalize(_) => panic!("expected scene"),
        }
    }

    #[test]
    fn test_scene_args_custom() {
        let args = Cli::parse_from([
            "app",
            "scene",
            "--pose",
            "[[1,2,3]]",
            "--color",
            "0.8",
            "0.1",
            "0.1",
            "--gt-pose-file",
            "gt.json",
            "--no-shadow",
            "--samplings",
            "64",
            "--verbose",
            "false",
        ]);
        match args.command {
            Commands::Scene(scene_args) => {
                assert_eq!(scene_args.color, Some(vec![0.8, 0.1, 0.1]));
                assert_eq!(scene_args.gt_pose_file.as_deref(), Some("gt.json"));
                assert!(scene_args.no_shadow);
                assert_eq!(scene_args.samplings, 64);
                assert!(!scene_args.verbose);
            }
            Commands::Normalize(_) => panic!("expected scene"),
        }
    }
}
