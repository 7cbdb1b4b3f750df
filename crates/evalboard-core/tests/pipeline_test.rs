//! End-to-end tests: result trees on disk through to the dashboard report

use std::fs;
use std::path::Path;

use evalboard_core::{
    BenchmarkSetup, DashboardSetup, JsonReporter, MetricScale, MetricsCollector, ModelScanner,
    ModelsSetup, ReportBuilder, ResultDocument, config::ExclusionSet, metrics::summarize,
};
use serde_json::{Value, json};

fn write_results(model_dir: &Path, benchmark: &str, shot: &str, name: &str, doc: &Value) {
    let dir = model_dir
        .join(benchmark)
        .join(format!("{}-shot", shot))
        .join("org__model");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), serde_json::to_string(doc).unwrap()).unwrap();
}

const SETUP: &str = r#"
X:
  pretty_name: Benchmark X
  main_metric: acc
  random_baseline: 0.25
Y:
  pretty_name: Benchmark Y
  main_metric: f1
  random_baseline: 0
  metric_scale: percent
Z:
  pretty_name: Benchmark Z
  main_metric: acc
  random_baseline: 0.5
  excluded_metrics: [acc_norm]
  subtasks:
    p1:
      pretty_name: Person
      description: Person agreement
W:
  pretty_name: Benchmark W
  main_metric: acc
  random_baseline: 0
"#;

#[test]
fn test_single_variant_with_reported_stderr() {
    let doc = ResultDocument::from_value(json!({
        "results": {"X": {"acc,none": 0.8, "acc_stderr,none": 0.05}}
    }))
    .unwrap();
    let collector = MetricsCollector::new("X", None, MetricScale::Unit, ExclusionSet::none());
    let scores = summarize(&collector.collect(&doc).unwrap());

    let acc = &scores["acc"];
    assert_eq!((acc.max, acc.mean, acc.median, acc.min), (0.8, 0.8, 0.8, 0.8));
    assert_eq!(acc.max_stderr, Some(0.05));
    assert_eq!(acc.min_stderr, Some(0.05));
    assert_eq!(acc.mean_stderr, Some(0.05));
    assert_eq!(acc.median_stderr, Some(0.05));
    assert_eq!(acc.n_prompts, 1);
    assert_eq!(acc.prompt_sd, 0.0);
    assert_eq!(acc.prompt_mad, 0.0);
}

#[test]
fn test_percent_variants_with_estimated_stderr() {
    let doc = ResultDocument::from_value(json!({
        "results": {
            "Y_p0": {"f1,none": 60, "f1_stderr,none": "N/A"},
            "Y_p1": {"f1,none": 80}
        },
        "n-samples": {
            "Y_p0": {"effective": 100, "original": 100},
            "Y_p1": {"effective": 100, "original": 100}
        }
    }))
    .unwrap();
    let collector = MetricsCollector::new("Y", None, MetricScale::Percent, ExclusionSet::none());
    let scores = summarize(&collector.collect(&doc).unwrap());

    let f1 = &scores["f1"];
    assert_eq!(f1.max, 80.0);
    assert_eq!(f1.max_prompt_idx, 1);
    assert_eq!(f1.min, 60.0);
    assert_eq!(f1.mean, 70.0);
    assert_eq!(f1.median, 70.0);
    assert_eq!(f1.max_stderr, Some(4.0));
    assert_eq!(f1.min_stderr, Some(4.898979));
    // both variants are 10 away from the median; the first one wins
    assert_eq!(f1.median_stderr, Some(4.898979));
    assert_eq!(f1.mean_stderr, Some(3.162278));
    assert_eq!(f1.n_prompts, 2);
    assert_eq!(f1.prompt_sd, 14.142136);
    assert_eq!(f1.prompt_mad, 10.0);
}

#[test]
fn test_excluded_metric_on_subtask_key() {
    let setup = BenchmarkSetup::from_yaml_str(SETUP).unwrap();
    let dashboard = DashboardSetup::default();
    let config = setup.get("Z").unwrap();
    let doc = ResultDocument::from_value(json!({
        "results": {
            "Z_p1": {"acc_norm,none": 0.5},
            "Z": {"acc,none": 0.7}
        }
    }))
    .unwrap();

    let collector =
        MetricsCollector::for_benchmark("Z", config, config.exclusions(&dashboard.excluded_metrics));
    let observations = collector.collect(&doc).unwrap();
    let names: Vec<_> = observations.keys().cloned().collect();
    assert_eq!(names, vec!["acc"]);
    assert_eq!(observations["acc"].len(), 1);
    assert_eq!(observations["acc"][0].value, 0.7);
}

#[test]
fn test_percent_extremes_get_no_estimate() {
    let doc = ResultDocument::from_value(json!({
        "results": {"Y_p0": {"f1,none": 100}, "Y_p1": {"f1,none": 0}},
        "n-samples": {"Y_p0": {"original": 250}, "Y_p1": {"original": 250}}
    }))
    .unwrap();
    let collector = MetricsCollector::new("Y", None, MetricScale::Percent, ExclusionSet::none());
    let observations = collector.collect(&doc).unwrap();
    assert!(observations["f1"].iter().all(|o| o.stderr.is_none()));

    let f1 = &summarize(&observations)["f1"];
    assert_eq!(f1.max_stderr, None);
    assert_eq!(f1.mean_stderr, None);
    let json = serde_json::to_value(f1).unwrap();
    assert!(json.get("max_stderr").is_none());
    assert!(json.get("median_stderr").is_none());
}

#[test]
fn test_build_report_from_directory_tree() {
    let tmp = tempfile::tempdir().unwrap();
    let results = tmp.path().join("results");
    let model = results.join("normistral-7b");

    // an older document that must be ignored
    write_results(
        &model,
        "X",
        "0",
        "results_2024-01-01T00-00-00.json",
        &json!({"results": {"X": {"acc,none": 0.1}}}),
    );
    write_results(
        &model,
        "X",
        "0",
        "results_2024-03-01T00-00-00.json",
        &json!({"results": {"X": {"acc,none": 0.8, "acc_stderr,none": 0.05}}}),
    );
    write_results(
        &model,
        "W",
        "5",
        "results_2024-03-01T00-00-00.json",
        &json!({"results": {"W": {"f1,none": 0.4, "alias": "W"}}}),
    );
    write_results(
        &model,
        "Z",
        "0",
        "results_2024-03-01T00-00-00.json",
        &json!({"results": {
            "Z": {"acc,none": 0.7, "acc_norm,none": 0.6},
            "Z_p1": {"acc,none": 0.9, "acc_norm,none": 0.5}
        }}),
    );
    // shot directory without any usable metric
    write_results(
        &model,
        "Y",
        "1",
        "results_2024-03-01T00-00-00.json",
        &json!({"results": {"other": {"f1,none": 50}}}),
    );
    // a corrupt document is a failed unit, not an empty one
    write_results(&model, "Y", "5", "results_2024-03-01T00-00-00.json", &json!([]));

    let benchmarks = BenchmarkSetup::from_yaml_str(SETUP).unwrap();
    let models = ModelsSetup::from_yaml_str("normistral-7b: {display_name: NorMistral 7B}").unwrap();
    let dashboard = DashboardSetup::default();

    let scan = ModelScanner::new(&benchmarks, &dashboard).scan(&model);
    assert_eq!(scan.failures.len(), 1);
    assert_eq!(scan.failures[0].benchmark, "Y");
    assert_eq!(scan.failures[0].shot, "5");

    let mut builder = ReportBuilder::new(&benchmarks, &models, &dashboard);
    builder.add_model("normistral-7b", scan);
    let report = builder.build();

    let scores = &report.models["normistral-7b"];
    assert_eq!(scores["X"]["0"]["acc"].max, 0.8);
    assert!(!scores.contains_key("Y"));

    // Z_p1 is both a prompt variant and the "Person" subtask
    let z = &scores["Z"]["0"];
    assert_eq!(z["acc"].n_prompts, 2);
    assert_eq!(z["acc: Person"].n_prompts, 1);
    assert!(!z.contains_key("acc_norm"));

    let catalog = &report.metrics_setup;
    assert_eq!(catalog["W"].available_metrics, vec!["f1"]);
    assert_eq!(catalog["Z"].available_metrics, vec!["acc", "acc: Person"]);
    assert!(catalog["Y"].available_metrics.is_empty());
    assert_eq!(catalog["Y"].max_performance, 100.0);

    let out = tmp.path().join("docs/data.json");
    JsonReporter::write(&report, &out).unwrap();
    let value: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["model_display_names"]["normistral-7b"], "NorMistral 7B");
    assert_eq!(value["models"]["normistral-7b"]["W"]["5"]["f1"]["n_prompts"], 1);
    assert!(value["models"]["normistral-7b"]["W"]["5"]["f1"]
        .get("max_stderr")
        .is_none());
    assert_eq!(value["progress"], json!({}));
}

#[test]
fn test_checkpoints_keyed_by_step() {
    let tmp = tempfile::tempdir().unwrap();
    let progress = tmp.path().join("progress");
    for step in ["2000", "500"] {
        write_results(
            &progress.join(format!("norolmo-step-{}", step)),
            "X",
            "0",
            "results_1.json",
            &json!({"results": {"X_p0": {"acc,none": 0.3}, "X_p1": {"acc,none": 0.4}}}),
        );
    }

    let benchmarks = BenchmarkSetup::from_yaml_str(SETUP).unwrap();
    let models = ModelsSetup::default();
    let dashboard = DashboardSetup::default();
    let scanner = ModelScanner::new(&benchmarks, &dashboard);

    let mut builder = ReportBuilder::new(&benchmarks, &models, &dashboard);
    for (step, name, path) in evalboard_core::scan::list_checkpoints(&progress).unwrap() {
        builder.add_checkpoint(step, &name, scanner.scan(&path));
    }
    let report = builder.build();

    assert_eq!(report.checkpoint_steps(), vec![500, 2000]);
    assert_eq!(report.progress[&500]["X"]["0"]["acc"].n_prompts, 2);
    assert_eq!(report.metrics_setup["X"].available_metrics, vec!["acc"]);
}

#[test]
fn test_demo_setups_load() {
    let benchmarks =
        BenchmarkSetup::from_yaml_str(include_str!("../../../demos/metrics_setup.yaml")).unwrap();
    let models =
        ModelsSetup::from_yaml_str(include_str!("../../../demos/models_setup.yaml")).unwrap();
    let dashboard =
        DashboardSetup::from_yaml_str(include_str!("../../../demos/dashboard_setup.yaml")).unwrap();

    let report = ReportBuilder::new(&benchmarks, &models, &dashboard).build();
    assert_eq!(report.language_lists["sme_benchmarks"], vec!["noreval_multiblimp", "tatoeba_nob_sme"]);
    assert!(report.language_lists["nno_benchmarks"].is_empty());
    assert_eq!(report.default_models, vec!["normistral-7b-warm"]);
    assert_eq!(report.model_colors.len(), 1);
    assert_eq!(report.model_display_names["mistral-7b"], "Mistral 7B");
    assert_eq!(report.metrics_setup["norquad"].category, "Reading comprehension");
}

#[test]
fn test_stray_entries_do_not_fail_the_unit() {
    let tmp = tempfile::tempdir().unwrap();
    let model = tmp.path().join("nora-7b");
    write_results(
        &model,
        "X",
        "0",
        "results_1.json",
        &json!({
            "results": {"X": {"acc,none": 0.8}, "unrelated_group": "N/A"},
            "n-samples": {"X": {"effective": 200}, "other": 5}
        }),
    );

    let benchmarks = BenchmarkSetup::from_yaml_str(SETUP).unwrap();
    let dashboard = DashboardSetup::default();
    let scan = ModelScanner::new(&benchmarks, &dashboard).scan(&model);

    assert!(scan.failures.is_empty());
    let acc = &scan.scores["X"]["0"]["acc"];
    assert_eq!(acc.max, 0.8);
    // binomial estimate from the 200 effective samples
    assert_eq!(acc.max_stderr, Some(0.028284));
}
