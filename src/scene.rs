// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Scene description.
//!
//! The host application owns the real scene graph and renderer. This module only
//! decides *what* goes into the scene and hands each primitive to a
//! [`SceneBuilder`]. A host binding implements the trait; [`ScenePlan`] implements
//! it by recording every call so the scene can be serialized and replayed elsewhere.
//!
//! [`compose_scene`] builds the standard pose scene: a skeleton of spheres and
//! tubes, an optional ground-truth overlay, a ceramic floor, one area light and a
//! camera tracking the root joint.

use std::f64::consts::PI;

use serde::Serialize;

use crate::config::{RenderConfig, SkeletonStyle};
use crate::error::{PoseError, Result};
use crate::normalize::normalize;
use crate::pose::{JointLinks, JointSet, NormalizedPose};
use crate::visualizer::Rgba;
use crate::visualizer::skeleton::ROOT_JOINT;

/// Edge length of the square floor plane.
pub const FLOOR_SIZE: f64 = 20.0;
/// Output image width and height before the resolution percentage is applied.
pub const RESOLUTION: (u32, u32) = (1080, 1080);
/// Camera position.
pub const CAMERA_LOCATION: [f64; 3] = [0.0, -8.0, 2.0];
/// Curve subdivisions along a limb.
pub const LIMB_RESOLUTION: u32 = 64;
/// Subdivisions around a limb's cross section.
pub const LIMB_BEVEL_RESOLUTION: u32 = 5;

/// Handle to a material registered with a [`SceneBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MaterialId(pub usize);

/// Subsurface scattering parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subsurface {
    /// Scattering weight.
    pub weight: f32,
    /// Scattered light color.
    pub color: Rgba,
    /// Scattering distance per RGB channel.
    pub radius: [f32; 3],
}

/// A principled surface material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    /// Unique material name.
    pub name: String,
    /// Base color including alpha.
    pub base_color: Rgba,
    /// Metallic factor.
    pub metallic: f32,
    /// Specular factor.
    pub specular: f32,
    /// Roughness factor.
    pub roughness: f32,
    /// Optional subsurface scattering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsurface: Option<Subsurface>,
}

impl Material {
    /// Material for a skeleton drawn with `style`.
    #[must_use]
    pub fn skeleton(name: impl Into<String>, style: &SkeletonStyle) -> Self {
        Self {
            name: name.into(),
            base_color: style.color,
            metallic: style.metallic,
            specular: style.specular,
            roughness: style.roughness,
            subsurface: None,
        }
    }

    /// White ceramic used for the floor.
    #[must_use]
    pub fn ceramic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_color: Rgba::WHITE,
            metallic: 0.2,
            specular: 0.5,
            roughness: 0.0,
            subsurface: Some(Subsurface {
                weight: 0.1,
                color: Rgba::FLOOR_SUBSURFACE,
                radius: [1.0, 1.0, 1.0],
            }),
        }
    }
}

/// Joint marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sphere {
    /// Object name.
    pub name: String,
    /// Center position.
    pub location: [f64; 3],
    /// Sphere radius.
    pub radius: f64,
    /// Whether the sphere casts shadows.
    pub cast_shadow: bool,
}

/// Limb tube: a straight two-point curve with a round bevel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    /// Object name.
    pub name: String,
    /// Start and end points.
    pub points: [[f64; 3]; 2],
    /// Tube radius.
    pub bevel_depth: f64,
    /// Subdivisions along the curve.
    pub resolution: u32,
    /// Subdivisions around the tube.
    pub bevel_resolution: u32,
    /// Whether the tube casts shadows.
    pub cast_shadow: bool,
}

/// Square plane centered at the origin in the XY plane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plane {
    /// Object name.
    pub name: String,
    /// Edge length.
    pub size: f64,
}

/// Rectangular area light.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaLight {
    /// Object name.
    pub name: String,
    /// Position.
    pub location: [f64; 3],
    /// Euler XYZ rotation in radians.
    pub rotation: [f64; 3],
    /// Emitter size.
    pub size: f64,
    /// Emission color.
    pub color: Rgba,
    /// Emission strength in watts.
    pub strength: f64,
}

impl Default for AreaLight {
    fn default() -> Self {
        Self {
            name: "Main Light".to_string(),
            location: [4.0, -3.0, 6.0],
            rotation: [0.0, PI * 60.0 / 180.0, -PI * 32.0 / 180.0],
            size: 0.5,
            color: Rgba::WHITE,
            strength: 1500.0,
        }
    }
}

/// Perspective camera constrained to look at a focus point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Camera {
    /// Object name.
    pub name: String,
    /// Position.
    pub location: [f64; 3],
    /// Point the camera tracks and focuses on.
    pub focus: [f64; 3],
    /// Focal length in millimeters.
    pub lens: f64,
    /// Aperture f-stop for depth of field.
    pub fstop: f64,
}

/// Output and path-tracer settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSettings {
    /// Output image path.
    pub output_path: String,
    /// Width in pixels at 100%.
    pub resolution_x: u32,
    /// Height in pixels at 100%.
    pub resolution_y: u32,
    /// Percentage of the full resolution actually rendered.
    pub resolution_percentage: u32,
    /// Samples per pixel.
    pub samples: u32,
    /// Render the background as transparent.
    pub transparent_background: bool,
    /// World background color.
    pub background: Rgba,
}

/// Capability interface to a host 3D application.
///
/// Every call may fail if the host rejects it; failures abort composition.
pub trait SceneBuilder {
    /// Register a material and return a handle for later objects.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot create the material.
    fn add_material(&mut self, material: &Material) -> Result<MaterialId>;

    /// Add a joint sphere.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot create the object.
    fn add_sphere(&mut self, sphere: &Sphere, material: MaterialId) -> Result<()>;

    /// Add a limb curve.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot create the object.
    fn add_curve(&mut self, curve: &Curve, material: MaterialId) -> Result<()>;

    /// Add a floor plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot create the object.
    fn add_plane(&mut self, plane: &Plane, material: MaterialId) -> Result<()>;

    /// Add a light.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot create the light.
    fn add_light(&mut self, light: &AreaLight) -> Result<()>;

    /// Add the camera.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot create the camera.
    fn add_camera(&mut self, camera: &Camera) -> Result<()>;

    /// Configure output and renderer settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the settings.
    fn set_render(&mut self, settings: &RenderSettings) -> Result<()>;
}

/// What [`compose_scene`] put into the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    /// Number of skeletons drawn (1, or 2 with ground truth).
    pub skeletons: usize,
    /// Joint spheres across all skeletons.
    pub joints: usize,
    /// Limb curves across all skeletons.
    pub limbs: usize,
    /// Point the camera tracks: the prediction's normalized root joint.
    pub focus: [f64; 3],
}

/// Normalize `pose` and describe the full scene to `builder`.
///
/// # Arguments
///
/// * `builder` - Host binding or [`ScenePlan`] receiving the primitives.
/// * `pose` - Raw predicted joint coordinates.
/// * `config` - Styling, links, optional ground truth and render settings.
///
/// # Errors
///
/// Returns [`PoseError::ConfigError`] for invalid settings, any error of
/// [`normalize`] for either pose, [`PoseError::InvalidInput`] for links outside the
/// pose, or whatever the builder returns.
pub fn compose_scene<B: SceneBuilder + ?Sized>(
    builder: &mut B,
    pose: &JointSet,
    config: &RenderConfig,
) -> Result<SceneSummary> {
    config.validate()?;

    let links = config.links();
    let normalized = normalize(pose)?;
    links.validate(normalized.len())?;

    // Everything is validated before the first builder call so a failure leaves
    // the builder untouched.
    let ground_truth = match &config.ground_truth {
        Some(gt) => {
            let gt_links = gt.joint_links.clone().unwrap_or_else(|| links.clone());
            let gt_normalized = normalize(&gt.pose)?;
            gt_links.validate(gt_normalized.len())?;
            Some((gt_normalized, gt_links, &gt.style))
        }
        None => None,
    };

    let mut summary = SceneSummary {
        skeletons: 0,
        joints: 0,
        limbs: 0,
        focus: normalized.joint(ROOT_JOINT).unwrap_or_default(),
    };

    add_skeleton(builder, "", &normalized, &links, &config.style, &mut summary)?;

    if let Some((gt_normalized, gt_links, gt_style)) = &ground_truth {
        add_skeleton(builder, "GT_", gt_normalized, gt_links, gt_style, &mut summary)?;
    }

    let floor = builder.add_material(&Material::ceramic("Material_Floor"))?;
    builder.add_plane(
        &Plane {
            name: "Floor".to_string(),
            size: FLOOR_SIZE,
        },
        floor,
    )?;

    builder.add_light(&AreaLight::default())?;

    builder.add_camera(&Camera {
        name: "Camera".to_string(),
        location: CAMERA_LOCATION,
        focus: summary.focus,
        lens: 85.0,
        fstop: 0.5,
    })?;

    builder.set_render(&RenderSettings {
        output_path: config.output_path.clone(),
        resolution_x: RESOLUTION.0,
        resolution_y: RESOLUTION.1,
        resolution_percentage: config.resolution_percentage,
        samples: config.samplings,
        transparent_background: true,
        background: Rgba::WHITE,
    })?;

    Ok(summary)
}

fn add_skeleton<B: SceneBuilder + ?Sized>(
    builder: &mut B,
    prefix: &str,
    pose: &NormalizedPose,
    links: &JointLinks,
    style: &SkeletonStyle,
    summary: &mut SceneSummary,
) -> Result<()> {
    let joint_material =
        builder.add_material(&Material::skeleton(format!("Material_{prefix}Joints"), style))?;
    let limb_material =
        builder.add_material(&Material::skeleton(format!("Material_{prefix}Limbs"), style))?;

    let joints = pose.to_rows();
    for (idx, &location) in joints.iter().enumerate() {
        builder.add_sphere(
            &Sphere {
                name: format!("{prefix}joint{idx}"),
                location,
                radius: style.joint_radius,
                cast_shadow: style.shadow,
            },
            joint_material,
        )?;
    }

    for (idx, &[a, b]) in links.iter().enumerate() {
        builder.add_curve(
            &Curve {
                name: format!("{prefix}curve{idx}"),
                points: [joints[a], joints[b]],
                bevel_depth: style.limb_radius,
                resolution: LIMB_RESOLUTION,
                bevel_resolution: LIMB_BEVEL_RESOLUTION,
                cast_shadow: style.shadow,
            },
            limb_material,
        )?;
    }

    summary.skeletons += 1;
    summary.joints += joints.len();
    summary.limbs += links.len();
    Ok(())
}

/// A placed object together with its material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placed<T> {
    /// The primitive.
    #[serde(flatten)]
    pub object: T,
    /// Material handle, an index into [`ScenePlan::materials`].
    pub material: MaterialId,
}

/// [`SceneBuilder`] that records the scene instead of building it.
///
/// Serializes to JSON with one array per primitive kind, so a host-side script can
/// replay it object by object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScenePlan {
    /// Registered materials; [`MaterialId`] indexes this list.
    pub materials: Vec<Material>,
    /// Joint spheres.
    pub spheres: Vec<Placed<Sphere>>,
    /// Limb curves.
    pub curves: Vec<Placed<Curve>>,
    /// Floor planes.
    pub planes: Vec<Placed<Plane>>,
    /// Lights.
    pub lights: Vec<AreaLight>,
    /// The camera, once added.
    pub camera: Option<Camera>,
    /// Render settings, once set.
    pub render: Option<RenderSettings>,
}

impl ScenePlan {
    /// Create an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the plan as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::JsonError`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn check_material(&self, material: MaterialId) -> Result<()> {
        if material.0 < self.materials.len() {
            Ok(())
        } else {
            Err(PoseError::SceneError(format!(
                "unknown material id {}",
                material.0
            )))
        }
    }
}

impl SceneBuilder for ScenePlan {
    fn add_material(&mut self, material: &Material) -> Result<MaterialId> {
        if self.materials.iter().any(|m| m.name == material.name) {
            return Err(PoseError::SceneError(format!(
                "material '{}' already exists",
                material.name
            )));
        }
        self.materials.push(material.clone());
        Ok(MaterialId(self.materials.len() - 1))
    }

    fn add_sphere(&mut self, sphere: &Sphere, material: MaterialId) -> Result<()> {
        self.check_material(material)?;
        self.spheres.push(Placed {
            object: sphere.clone(),
            material,
        });
        Ok(())
    }

    fn add_curve(&mut self, curve: &Curve, material: MaterialId) -> Result<()> {
        self.check_material(material)?;
        self.curves.push(Placed {
            object: curve.clone(),
            material,
        });
        Ok(())
    }

    fn add_plane(&mut self, plane: &Plane, material: MaterialId) -> Result<()> {
        self.check_material(material)?;
        self.planes.push(Placed {
            object: plane.clone(),
            material,
        });
        Ok(())
    }

    fn add_light(&mut self, light: &AreaLight) -> Result<()> {
        self.lights.push(light.clone());
        Ok(())
    }

    fn add_camera(&mut self, camera: &Camera) -> Result<()> {
        if self.camera.is_some() {
            return Err(PoseError::SceneError("camera already set".to_string()));
        }
        self.camera = Some(camera.clone());
        Ok(())
    }

    fn set_render(&mut self, settings: &RenderSettings) -> Result<()> {
        self.render = Some(settings.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroundTruth;

    const EPS: f64 = 1e-9;

    fn sample_pose() -> JointSet {
        JointSet::from_rows(&[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 2.0, 1.0]]).unwrap()
    }

    fn chain_config() -> RenderConfig {
        RenderConfig::new().with_joint_links(JointLinks::new(vec![[0, 1], [1, 2]]))
    }

    #[test]
    fn test_compose_scene_counts() {
        let mut plan = ScenePlan::new();
        let summary = compose_scene(&mut plan, &sample_pose(), &chain_config()).unwrap();

        assert_eq!(summary.skeletons, 1);
        assert_eq!(summary.joints, 3);
        assert_eq!(summary.limbs, 2);
        assert_eq!(plan.spheres.len(), 3);
        assert_eq!(plan.curves.len(), 2);
        assert_eq!(plan.planes.len(), 1);
        assert_eq!(plan.lights.len(), 1);
        // joints, limbs, floor
        assert_eq!(plan.materials.len(), 3);
        assert!(plan.camera.is_some());
        assert!(plan.render.is_some());
    }

    #[test]
    fn test_spheres_use_normalized_coordinates() {
        let mut plan = ScenePlan::new();
        compose_scene(&mut plan, &sample_pose(), &chain_config()).unwrap();

        let top = plan.spheres[2].object.location;
        assert!((top[1] + 0.5).abs() < EPS);
        assert!((top[2] - 1.1).abs() < EPS);

        let limb = &plan.curves[1].object;
        assert_eq!(limb.points[0], plan.spheres[1].object.location);
        assert_eq!(limb.points[1], plan.spheres[2].object.location);
    }

    #[test]
    fn test_camera_tracks_root() {
        let mut plan = ScenePlan::new();
        let summary = compose_scene(&mut plan, &sample_pose(), &chain_config()).unwrap();
        let camera = plan.camera.unwrap();
        assert_eq!(camera.focus, summary.focus);
        assert!((camera.focus[2] - 0.1).abs() < EPS);
        assert_eq!(camera.location, CAMERA_LOCATION);
    }

    #[test]
    fn test_default_links_need_seventeen_joints() {
        let mut plan = ScenePlan::new();
        let err = compose_scene(&mut plan, &sample_pose(), &RenderConfig::new()).unwrap_err();
        assert!(matches!(err, PoseError::InvalidInput(_)));
    }

    #[test]
    fn test_ground_truth_overlay() {
        let gt = GroundTruth::new(
            JointSet::from_rows(&[[0.0, 0.0, 0.0], [0.5, 1.0, 0.0], [0.0, 3.0, 1.0]]).unwrap(),
        );
        let config = chain_config().with_ground_truth(gt);

        let mut plan = ScenePlan::new();
        let summary = compose_scene(&mut plan, &sample_pose(), &config).unwrap();
        assert_eq!(summary.skeletons, 2);
        assert_eq!(plan.spheres.len(), 6);
        assert_eq!(plan.curves.len(), 4);
        assert_eq!(plan.materials.len(), 5);

        let gt_material = plan.spheres[3].material;
        assert_eq!(plan.materials[gt_material.0].name, "Material_GT_Joints");
        assert_eq!(plan.materials[gt_material.0].base_color, Rgba::GROUND_TRUTH_RED);
    }

    #[test]
    fn test_shadow_flag_propagates() {
        let mut plan = ScenePlan::new();
        compose_scene(&mut plan, &sample_pose(), &chain_config().with_shadow(false)).unwrap();
        assert!(plan.spheres.iter().all(|s| !s.object.cast_shadow));
        assert!(plan.curves.iter().all(|c| !c.object.cast_shadow));
    }

    #[test]
    fn test_degenerate_pose_adds_nothing() {
        let mut plan = ScenePlan::new();
        let pose = JointSet::from_rows(&[[0.0, 0.0, 0.0]]).unwrap();
        let err = compose_scene(&mut plan, &pose, &RenderConfig::new()).unwrap_err();
        assert!(matches!(err, PoseError::DegeneratePose(_)));
        assert_eq!(plan, ScenePlan::new());
    }

    #[test]
    fn test_degenerate_ground_truth_adds_nothing() {
        let gt = GroundTruth::new(JointSet::from_rows(&[[0.0, 0.0, 0.0]]).unwrap());
        let config = chain_config().with_ground_truth(gt);

        let mut plan = ScenePlan::new();
        let err = compose_scene(&mut plan, &sample_pose(), &config).unwrap_err();
        assert!(matches!(err, PoseError::DegeneratePose(_)));
        assert_eq!(plan, ScenePlan::new());
    }

    #[test]
    fn test_ground_truth_links_out_of_range_adds_nothing() {
        let gt = GroundTruth {
            joint_links: Some(JointLinks::new(vec![[0, 5]])),
            ..GroundTruth::new(sample_pose())
        };
        let config = chain_config().with_ground_truth(gt);

        let mut plan = ScenePlan::new();
        let err = compose_scene(&mut plan, &sample_pose(), &config).unwrap_err();
        assert!(matches!(err, PoseError::InvalidInput(_)));
        assert_eq!(plan, ScenePlan::new());
    }

    #[test]
    fn test_plan_rejects_unknown_material() {
        let mut plan = ScenePlan::new();
        let plane = Plane {
            name: "Floor".to_string(),
            size: FLOOR_SIZE,
        };
        assert!(matches!(
            plan.add_plane(&plane, MaterialId(0)),
            Err(PoseError::SceneError(_))
        ));
    }

    #[test]
    fn test_plan_json() {
        let mut plan = ScenePlan::new();
        compose_scene(&mut plan, &sample_pose(), &chain_config()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();

        assert_eq!(value["spheres"].as_array().unwrap().len(), 3);
        assert_eq!(value["spheres"][0]["material"], 0);
        assert_eq!(value["spheres"][0]["name"], "joint0");
        assert_eq!(value["planes"][0]["name"], "Floor");
        assert_eq!(value["render"]["resolution_x"], 1080);
        assert_eq!(value["lights"][0]["name"], "Main Light");
        assert!(value["materials"][2]["subsurface"].is_object());
        assert!(value["materials"][0].get("subsurface").is_none());
    }
}
