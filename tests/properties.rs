mod common;

use common::synthetic_cloud::{cone_cloud, shift_seam, waisted_leg_points};
use std::fs;
use std::io::Write;
use taper_cut::axis::find_longest_axis;
use taper_cut::io::load_point_cloud;
use taper_cut::{AnalysisParams, AxisParams, PointCloud, PointOrder, TaperAnalyzer};

fn brute_force_max_distance(cloud: &PointCloud, params: &AxisParams) -> f32 {
    let n = cloud.len();
    let gap = (n as f32 * params.adjacency_fraction) as usize;
    let pts = cloud.points();
    let mut best = 0.0f32;
    for i in 0..n / 2 {
        for j in 0..n {
            if i.abs_diff(j) > gap {
                best = best.max(nalgebra::distance(&pts[i], &pts[j]));
            }
        }
    }
    best
}

#[test]
fn axis_length_is_the_filtered_maximum() {
    let params = AxisParams::default();
    let cloud = PointCloud::from_contour(waisted_leg_points(120));
    let est = find_longest_axis(&cloud, &params).unwrap();
    let expected = brute_force_max_distance(&cloud, &params);
    assert!((est.length - expected).abs() < 1e-6);
}

#[test]
fn axis_length_survives_reindexing() {
    let params = AxisParams::default();
    let base = find_longest_axis(&cone_cloud(200), &params).unwrap();

    let mut reversed = cone_cloud(200).points().to_vec();
    reversed.reverse();
    let shifted = shift_seam(cone_cloud(200).points().to_vec(), 100);

    for points in [reversed, shifted] {
        let est = find_longest_axis(&PointCloud::from_contour(points), &params).unwrap();
        assert!(
            (est.length - base.length).abs() < 1e-6,
            "length {} differs from {}",
            est.length,
            base.length
        );
    }
}

#[test]
fn pcd_file_gives_the_same_pose_as_memory() {
    let cloud = PointCloud::from_contour(waisted_leg_points(200));
    let dir = std::env::temp_dir().join(format!("taper_cut_props_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("leg.pcd");
    let mut f = fs::File::create(&path).unwrap();
    writeln!(
        f,
        "# .PCD v0.7\nVERSION 0.7\nFIELDS x y z\nSIZE 4 4 4\nTYPE F F F\nCOUNT 1 1 1\n\
         WIDTH {n}\nHEIGHT 1\nVIEWPOINT 0 0 0 1 0 0 0\nPOINTS {n}\nDATA ascii",
        n = cloud.len()
    )
    .unwrap();
    for p in cloud.points() {
        // Debug formatting of f32 round-trips exactly.
        writeln!(f, "{:?} {:?} {:?}", p.x, p.y, p.z).unwrap();
    }
    drop(f);

    let loaded = load_point_cloud(&path, PointOrder::Contour).unwrap();
    assert_eq!(loaded.points(), cloud.points());

    let mut params = AnalysisParams::default();
    params.offset.distance = 0.5;
    let analyzer = TaperAnalyzer::new(params);
    assert_eq!(
        analyzer.analyze(&loaded).unwrap(),
        analyzer.analyze(&cloud).unwrap()
    );
}
