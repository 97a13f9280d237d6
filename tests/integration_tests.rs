use budget_forecast::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Workspace {
    _root: TempDir,
    raw: PathBuf,
    output: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let raw = root.path().join("raw");
        let output = root.path().join("output");
        fs::create_dir(&raw).unwrap();
        Self {
            _root: root,
            raw,
            output,
        }
    }

    fn add(&self, name: &str, contents: &str) {
        fs::write(self.raw.join(name), contents).unwrap();
    }

    fn config(&self) -> PipelineConfig {
        PipelineConfig {
            raw_dir: self.raw.clone(),
            output_dir: self.output.clone(),
            ..Default::default()
        }
    }
}

fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    let headers = rdr.headers().unwrap().iter().map(str::to_string).collect();
    let rows = rdr
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

fn scenario(ws: &Workspace) {
    ws.add(
        "a_health.csv",
        "Year,Sector,Amount(Rs Cr)\n2021,Health,₹100 cr\n2022,Health,150cr\n",
    );
    ws.add("b_defence.csv", "FY,Dept,Budget\n2023,Defence,\"2,000 crore\"\n");
}

#[test]
fn test_two_file_scenario_clean_dataset() {
    let ws = Workspace::new();
    scenario(&ws);

    let summary = run_pipeline(ws.config()).unwrap();
    assert_eq!(summary.files_processed, 2);
    assert_eq!(summary.clean_rows, 3);

    let (headers, rows) = read_rows(&summary.clean_path);
    assert_eq!(headers, CLEAN_HEADERS);
    assert_eq!(
        rows,
        vec![
            vec!["2021", "Health", "", "100.0"],
            vec!["2022", "Health", "", "150.0"],
            vec!["2023", "", "Defence", "2000.0"],
        ]
    );
}

#[test]
fn test_two_file_scenario_forecast() {
    let ws = Workspace::new();
    scenario(&ws);

    let summary = run_pipeline(ws.config()).unwrap();
    assert_eq!(summary.sectors_forecast, 2);
    assert_eq!(summary.fallbacks, 2);

    let (headers, rows) = read_rows(&summary.forecast_path);
    assert_eq!(headers, FORECAST_HEADERS);

    // Health has two points, the missing-sector group holds the Defence row.
    assert_eq!(rows[0], vec!["Health", "2023", "150.0"]);
    assert_eq!(rows[1], vec!["", "2024", "2000.0"]);
}

#[test]
fn test_rerun_is_byte_identical() {
    let ws = Workspace::new();
    scenario(&ws);
    ws.add(
        "c_rail.csv",
        "Fiscal Year,Sector,Ministry,Outlay\nFY 2021-22,Rail,Railways,60\nFY 2022-23,Rail,Railways,80\nFY 2023-24,Rail,Railways,90\nFY 2024-25,Rail,Railways,95\n",
    );

    let first = run_pipeline(ws.config()).unwrap();
    let clean_a = fs::read(&first.clean_path).unwrap();
    let forecast_a = fs::read(&first.forecast_path).unwrap();

    let second = run_pipeline(ws.config()).unwrap();
    assert_eq!(clean_a, fs::read(&second.clean_path).unwrap());
    assert_eq!(forecast_a, fs::read(&second.forecast_path).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_fitted_sector_forecast() {
    let ws = Workspace::new();
    ws.add(
        "rail.csv",
        "Fiscal Year,Sector,Ministry,Outlay\nFY 2021-22,Rail,Railways,60\nFY 2022-23,Rail,Railways,80\nFY 2023-24,Rail,Railways,90\nFY 2024-25,Rail,Railways,95\n",
    );

    let pipeline = BudgetPipeline::new(ws.config()).unwrap();
    let (output, summary) = pipeline.build().unwrap();

    assert_eq!(summary.fitted, 1);
    let rail = &output.forecasts[0];
    assert_eq!(rail.record.sector.as_deref(), Some("Rail"));
    assert_eq!(rail.record.next_year, 2025);
    assert_eq!(rail.record.predicted_allocation_cr, 84.78);
    assert!(matches!(rail.outcome, ForecastOutcome::Fitted { .. }));
    assert!(!ws.output.exists(), "build must not write outputs");
}

#[test]
fn test_aggregate_invariant_under_file_and_row_order() {
    let forward = Workspace::new();
    forward.add("1.csv", "Year,Sector,Amt\n2021,Health,0.1\n2021,Health,0.2\n2022,Energy,5\n");
    forward.add("2.csv", "Year,Sector,Amt\n2021,Health,0.3\n2022,Health,7\n");

    let reversed = Workspace::new();
    reversed.add("1.csv", "Year,Sector,Amt\n2022,Health,7\n2021,Health,0.3\n");
    reversed.add("2.csv", "Year,Sector,Amt\n2022,Energy,5\n2021,Health,0.2\n2021,Health,0.1\n");

    let (a, _) = BudgetPipeline::new(forward.config()).unwrap().build().unwrap();
    let (b, _) = BudgetPipeline::new(reversed.config()).unwrap().build().unwrap();

    assert_eq!(sum_by_sector_year(&a.clean), sum_by_sector_year(&b.clean));
    assert_eq!(a.forecast_records(), b.forecast_records());
}

#[test]
fn test_empty_directory_writes_headers_only() {
    let ws = Workspace::new();
    let summary = run_pipeline(ws.config()).unwrap();

    assert_eq!(summary.files_processed, 0);
    assert_eq!(
        fs::read_to_string(&summary.clean_path).unwrap(),
        "Year,Sector,Ministry,Allocation_Cr\n"
    );
    assert_eq!(
        fs::read_to_string(&summary.forecast_path).unwrap(),
        "Sector,Next_Year,Predicted_Allocation_Cr\n"
    );
}

#[test]
fn test_unreadable_file_is_fatal_by_default() {
    let ws = Workspace::new();
    scenario(&ws);
    ws.add("c_broken.csv", "Year,Sector\n2021,Health,extra,fields\n");

    let err = run_pipeline(ws.config()).unwrap_err();
    assert!(matches!(err, BudgetError::RaggedRow { .. }));
    assert!(!ws.output.join("union_budget_clean.csv").exists());
}

#[test]
fn test_unreadable_file_can_be_skipped() {
    let ws = Workspace::new();
    scenario(&ws);
    ws.add("c_broken.csv", "Year,Sector\n2021,Health,extra,fields\n");

    let config = PipelineConfig {
        skip_unreadable_files: true,
        ..ws.config()
    };
    let summary = run_pipeline(config).unwrap();

    assert_eq!(summary.files_processed, 2);
    assert_eq!(summary.files_skipped.len(), 1);
    assert_eq!(summary.clean_rows, 3);
}

#[test]
fn test_configured_years_and_keywords() {
    let ws = Workspace::new();
    ws.add(
        "heads.csv",
        "Period,Head,Outlay\n2025-26,Space,\"1,200 Cr\"\n2024-25,Space,900\n",
    );
    fs::write(
        ws.raw.join("..").join("config.json"),
        format!(
            r#"{{
                "raw_dir": {raw:?},
                "output_dir": {out:?},
                "known_years": [2021, 2022, 2023, 2024, 2025],
                "year_keywords": ["Period"],
                "sector_keywords": ["head"]
            }}"#,
            raw = ws.raw.to_string_lossy(),
            out = ws.output.to_string_lossy()
        ),
    )
    .unwrap();

    let config = PipelineConfig::from_json_file(&ws.raw.join("..").join("config.json")).unwrap();
    let summary = run_pipeline(config).unwrap();

    let (_, rows) = read_rows(&summary.clean_path);
    assert_eq!(rows[0], vec!["2025", "Space", "", "1200.0"]);
    assert_eq!(rows[1], vec!["2024", "Space", "", "900.0"]);

    let (_, forecast) = read_rows(&summary.forecast_path);
    assert_eq!(forecast, vec![vec!["Space", "2026", "1200.0"]]);
}
