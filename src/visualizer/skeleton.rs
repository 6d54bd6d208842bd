// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

/// Number of joints in the default 17-joint body topology.
pub const NUM_JOINTS: usize = 17;

/// Default limb connections (pairs of joint indices) for the 17-joint body.
/// Pelvis-spine-neck-head chain, both arms from the thorax, both legs from the pelvis.
pub const DEFAULT_JOINT_LINKS: [[usize; 2]; 16] = [
    [0, 7],   // pelvis to spine
    [7, 8],   // spine to thorax
    [8, 9],   // thorax to neck
    [9, 10],  // neck to head
    [8, 11],  // thorax to left shoulder
    [11, 12], // left shoulder to left elbow
    [12, 13], // left elbow to left wrist
    [8, 14],  // thorax to right shoulder
    [14, 15], // right shoulder to right elbow
    [15, 16], // right elbow to right wrist
    [0, 1],   // pelvis to right hip
    [1, 2],   // right hip to right knee
    [2, 3],   // right knee to right ankle
    [0, 4],   // pelvis to left hip
    [4, 5],   // left hip to left knee
    [5, 6],   // left knee to left ankle
];

/// Index of the root joint. The camera tracks this joint.
pub const ROOT_JOINT: usize = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_reference_valid_joints() {
        for [a, b] in DEFAULT_JOINT_LINKS {
            assert!(a < NUM_JOINTS && b < NUM_JOINTS);
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_links_form_a_tree() {
        // 16 edges over 17 joints, every joint reachable from the root.
        let mut reached = [false; NUM_JOINTS];
        reached[ROOT_JOINT] = true;
        for _ in 0..NUM_JOINTS {
            for [a, b] in DEFAULT_JOINT_LINKS {
                if reached[a] || reached[b] {
                    reached[a] = true;
                    reached[b] = true;
                }
            }
        }
        assert!(reached.iter().all(|&r| r));
        assert_eq!(DEFAULT_JOINT_LINKS.len(), NUM_JOINTS - 1);
    }
}
