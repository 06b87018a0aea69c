// End-to-end runs of every scan variant over fixture log directories
use marker_log_scanner::{
    CuttingConfig, CuttingScan, Evaluator, FileResult, IntroConfig, IntroScan, PointingConfig,
    PointingScan, RatingConfig, RatingScan, TableOptions,
};
use std::fs;
use std::path::{Path, PathBuf};

fn write_log(dir: &Path, sub: &str, name: &str, content: &str) -> PathBuf {
    let sub = dir.join(sub);
    fs::create_dir_all(&sub).unwrap();
    let path = sub.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn csv(report: &marker_log_scanner::VariantReport) -> String {
    let mut out = Vec::new();
    report.table.write_csv(&mut out, TableOptions::default()).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn intro_variant_writes_solve_time() {
    let dir = tempfile::tempdir().unwrap();
    write_log(
        dir.path(),
        "IntroductionTest",
        "Alice_Introduction.log",
        "[10.0]: Button pressed successfully\n[12.0]: Looked around\n[15.5]: Tutorial Completed\n",
    );

    let variant = IntroScan::new(&IntroConfig::default()).unwrap();
    let report = Evaluator::new(dir.path()).evaluate(&variant).unwrap();

    assert_eq!(report.files_scanned, 1);
    let text = csv(&report);
    let mut lines = text.split("\r\n");
    assert_eq!(lines.next(), Some("File,Line Number,SolveTime"));
    let row = lines.next().unwrap();
    assert!(row.starts_with("File 1 "));
    assert!(row.ends_with("Alice_Introduction.log,3,5.5"));
}

#[test]
fn pointing_and_rating_share_one_log() {
    let dir = tempfile::tempdir().unwrap();
    let mut log = String::from("[0.5]: Spawn pointing targets\n");
    for n in 1..=6 {
        log.push_str(&format!("[{}.5]: [Pointing]Pointed at: Target{} distance {}\n", n, n, n * 2));
    }
    log.push_str("[7.0]: Pointed at: Wall;\n");
    log.push_str("[7.5]: All Targets Successfully hit\n");
    log.push_str("[8.0]: [Rating]Rating Task Started\n");
    log.push_str("[9.0]: [Rating] value 2\n");
    log.push_str("[10.0]: [Rating]Completed Good rating\n");
    log.push_str("[12.0]: [Rating]Completed bad rating\n");
    log.push_str("[13.0]: [Rating] value 1\n");
    log.push_str("[15.0]: [Task]Completed average rating\n");
    write_log(dir.path(), "PointingRatingSceneTest", "Bob_Pointing_Rating.log", &log);

    let evaluator = Evaluator::new(dir.path());

    let pointing = PointingScan::new(&PointingConfig::default()).unwrap();
    let report = evaluator.evaluate(&pointing).unwrap();
    assert_eq!(report.table.len(), 1);
    match &report.table.rows()[0] {
        FileResult::Pointing { timings, mean_distance, fails, incomplete, .. } => {
            assert_eq!(timings, &vec![1.0; 6]);
            assert_eq!(*mean_distance, 7.0);
            assert_eq!(*fails, 1);
            assert!(!*incomplete);
        }
        other => panic!("unexpected row: {other:?}"),
    }

    let rating = RatingScan::new(&RatingConfig::default()).unwrap();
    let report = evaluator.evaluate(&rating).unwrap();
    let text = csv(&report);
    assert!(text.ends_with("Bob_Pointing_Rating.log,2.0,1,2.0,0,3.0,1\r\n"));
}

#[test]
fn pointing_overflow_row_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let mut log = String::new();
    for n in 1..=7 {
        log.push_str(&format!("[{n}.0]: Pointed at: Target1 distance 1\n"));
    }
    log.push_str("[9.0]: All Targets Successfully hit\n");
    write_log(dir.path(), "PointingRatingSceneTest", "Pointing_Rating_7.log", &log);

    let variant = PointingScan::new(&PointingConfig::default()).unwrap();
    let report = Evaluator::new(dir.path()).evaluate(&variant).unwrap();
    let text = csv(&report);
    let lines: Vec<&str> = text.split("\r\n").collect();
    assert_eq!(lines[1], "ERROR too many targets");
    assert!(lines[2].ends_with(",1.0,1.0,1.0,1.0,1.0,1.0,1.0,0"));
}

#[test]
fn rating_without_final_marker_has_no_row() {
    let dir = tempfile::tempdir().unwrap();
    write_log(
        dir.path(),
        "PointingRatingSceneTest",
        "Carol_Pointing_Rating.log",
        "[1.0]: [Rating]Rating Task Started\n[2.0]: [Rating]Completed Good rating\n",
    );

    let variant = RatingScan::new(&RatingConfig::default()).unwrap();
    let report = Evaluator::new(dir.path()).evaluate(&variant).unwrap();
    assert_eq!(report.files_scanned, 1);
    assert!(report.table.is_empty());
}

#[test]
fn cutting_skips_files_without_cuts() {
    let dir = tempfile::tempdir().unwrap();
    write_log(dir.path(), "Cutting", "CuttingScene_empty.log", "[1.0]: knife picked up\n");

    let variant = CuttingScan::new(&CuttingConfig::default()).unwrap();
    let report = Evaluator::new(dir.path()).evaluate(&variant).unwrap();
    assert_eq!(csv(&report), "File,CuttingCount,SolveTime\r\n");
}

#[test]
fn rows_follow_given_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_log(dir.path(), "Cutting", "CuttingScene_a.log", "[1.0]: a was cut\n");
    let b = write_log(dir.path(), "Cutting", "CuttingScene_b.log", "[2.0]: b was cut\n");

    let variant = CuttingScan::new(&CuttingConfig::default()).unwrap();
    let report = Evaluator::new(dir.path())
        .evaluate_files(&variant, &[b, a])
        .unwrap();

    let suffixes: Vec<&str> = report
        .table
        .rows()
        .iter()
        .map(|row| row.label().suffix.as_str())
        .collect();
    assert!(suffixes[0].ends_with("CuttingScene_b.log"));
    assert!(suffixes[1].ends_with("CuttingScene_a.log"));
    assert_eq!(report.table.rows()[0].label().index, 1);
}
